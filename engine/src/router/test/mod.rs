use std::time::Duration;
use tokio::sync::mpsc;

use crate::{
    coordinator::Coordinator,
    error::EngineError,
    event::{Coord, InboundEvent, Payload, PlayerId},
    game::{new_game, Effect, GameFamily, GameType, Phase},
    registry::SessionRegistry,
    render::Prompt,
    router::{control_id, InteractionRouter, Route, RouteOutcome, RouteTable},
};

mod parse;

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);
const CAROL: PlayerId = PlayerId(3);

fn router() -> InteractionRouter {
    let (tx, _) = mpsc::unbounded_channel();
    let coordinator = Coordinator::new(SessionRegistry::new(), Duration::from_secs(60), tx);
    InteractionRouter::new(RouteTable::default(), coordinator)
}

/// Starts a game between Alice and Bob and returns its session serial.
async fn start(router: &InteractionRouter, game_type: GameType) -> u64 {
    let game = new_game(game_type, vec![ALICE, BOB]).unwrap();
    router
        .coordinator()
        .start(game, 1)
        .await
        .unwrap()
        .session_id
}

async fn click(router: &InteractionRouter, actor: PlayerId, id: &str) -> RouteOutcome {
    router.route(InboundEvent::click(id, actor)).await
}
