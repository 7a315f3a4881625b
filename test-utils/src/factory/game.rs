//! Game factory for creating seeded games.

use engine::{new_seeded_game, Game, GameType, PlayerId, RenderRequest};
use rand::{rngs::StdRng, SeedableRng};

use crate::{context::TestContext, factory::player::create_player};

/// Channel id games are started in unless a test picks one.
pub const DEFAULT_CHANNEL: u64 = 555;

/// Factory for creating games with customizable players and seed.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::game::GameFactory;
///
/// let game = GameFactory::new(GameType::Blackjack)
///     .players(alice, bob)
///     .seed(42)
///     .build();
/// ```
pub struct GameFactory {
    game_type: GameType,
    initiator: PlayerId,
    opponent: PlayerId,
    seed: u64,
}

impl GameFactory {
    /// Creates a factory with defaults.
    ///
    /// Defaults:
    /// - initiator and opponent: fresh unique players
    /// - seed: `0`
    pub fn new(game_type: GameType) -> Self {
        Self {
            game_type,
            initiator: create_player(),
            opponent: create_player(),
            seed: 0,
        }
    }

    /// Sets the players, initiator first.
    pub fn players(mut self, initiator: PlayerId, opponent: PlayerId) -> Self {
        self.initiator = initiator;
        self.opponent = opponent;
        self
    }

    /// Sets the seed for everything random in the game.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the game in its setup phase.
    ///
    /// # Panics
    /// - If the initiator and opponent are the same player
    pub fn build(self) -> Box<dyn Game> {
        new_seeded_game(
            self.game_type,
            vec![self.initiator, self.opponent],
            StdRng::seed_from_u64(self.seed),
        )
        .expect("factory players must be distinct")
    }
}

/// Creates a seeded game between two fresh players.
pub fn create_game(game_type: GameType) -> Box<dyn Game> {
    GameFactory::new(game_type).build()
}

/// Starts a seeded game on the test context's engine.
///
/// # Arguments
/// - `test` - Context whose coordinator registers the session
/// - `game_type` - Game to start
/// - `initiator` - Player issuing the challenge
/// - `opponent` - Player being challenged
///
/// # Returns
/// - `RenderRequest` - Initial render of the new session
///
/// # Panics
/// - If either player is already in a game
pub async fn start_game(
    test: &TestContext,
    game_type: GameType,
    initiator: PlayerId,
    opponent: PlayerId,
) -> RenderRequest {
    let game = GameFactory::new(game_type)
        .players(initiator, opponent)
        .build();

    test.coordinator
        .start(game, DEFAULT_CHANNEL)
        .await
        .expect("players must be free to start a game")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use engine::Phase;

    #[test]
    fn builds_game_with_given_players() {
        let (alice, bob) = crate::factory::create_pair();

        let game = GameFactory::new(GameType::Duel).players(alice, bob).build();

        assert_eq!(game.participants(), &[alice, bob]);
        assert_eq!(game.phase(), Phase::Setup);
    }

    #[tokio::test]
    async fn starts_game_on_context() {
        let test = TestBuilder::new().build();
        let (alice, bob) = crate::factory::create_pair();

        let render = start_game(&test, GameType::WordChain, alice, bob).await;

        assert_eq!(render.channel_id, DEFAULT_CHANNEL);
        assert_eq!(test.registry.len().await, 1);
    }
}
