use crate::{
    error::EngineError,
    event::PlayerId,
    game::{new_game, CancelReason, Ending, GameType, Phase},
    registry::SessionRegistry,
    session::SessionKey,
};

mod lookup;

const ALICE: PlayerId = PlayerId(100);
const BOB: PlayerId = PlayerId(200);
const CAROL: PlayerId = PlayerId(300);
const CHANNEL: u64 = 1;

fn duel(players: [PlayerId; 2]) -> Box<dyn crate::game::Game> {
    new_game(GameType::Duel, players.to_vec()).unwrap()
}
