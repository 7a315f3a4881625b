use dioxus_logger::tracing;
use engine::{
    new_game, EngineError, GameType, InboundEvent, InteractionRouter, PlayerId, RenderRequest,
    RouteOutcome,
};

/// What the bot should answer after handling a player's input.
#[derive(Debug)]
pub enum GameReply {
    /// The game changed; show the new state.
    Render(RenderRequest),
    /// The input was refused or is stale; tell only the player who sent it.
    Notice(String),
}

impl From<RouteOutcome> for GameReply {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Render(render) => Self::Render(render),
            RouteOutcome::Rejected(err) => Self::Notice(err.user_message()),
            RouteOutcome::Unavailable => Self::Notice(EngineError::NotFound.user_message()),
        }
    }
}

impl From<Result<RenderRequest, EngineError>> for GameReply {
    fn from(result: Result<RenderRequest, EngineError>) -> Self {
        match result {
            Ok(render) => Self::Render(render),
            Err(err) => Self::Notice(err.user_message()),
        }
    }
}

pub struct GameService<'a> {
    router: &'a InteractionRouter,
}

impl<'a> GameService<'a> {
    pub fn new(router: &'a InteractionRouter) -> Self {
        Self { router }
    }

    /// Starts a game between the player issuing a challenge and their opponent.
    ///
    /// The game begins in its setup phase: ready-style games wait for the opponent to
    /// accept, battleship waits for both fleets.
    ///
    /// # Arguments
    /// - `game_type` - Game to play
    /// - `initiator` - Player who issued the challenge; takes seat 0
    /// - `opponent` - Player being challenged
    /// - `channel_id` - Channel the game is played in
    ///
    /// # Returns
    /// - `GameReply::Render` - Initial state of the new game
    /// - `GameReply::Notice` - Self-challenge, or either player is already playing
    pub async fn challenge(
        &self,
        game_type: GameType,
        initiator: PlayerId,
        opponent: PlayerId,
        channel_id: u64,
    ) -> GameReply {
        let game = match new_game(game_type, vec![initiator, opponent]) {
            Ok(game) => game,
            Err(err) => return GameReply::Notice(err.user_message()),
        };

        let reply = self.router.coordinator().start(game, channel_id).await;
        if let Ok(render) = &reply {
            tracing::info!(
                "{} challenged {} to {} (session {})",
                initiator,
                opponent,
                game_type.command_name(),
                render.session_id
            );
        }
        reply.into()
    }

    /// Forfeits the player's live game on request.
    pub async fn forfeit(&self, actor: PlayerId) -> GameReply {
        self.router.coordinator().forfeit(actor).await.into()
    }

    /// Handles a button press.
    ///
    /// # Arguments
    /// - `actor` - Player who pressed the button
    /// - `custom_id` - Identifier of the pressed button
    ///
    /// # Returns
    /// - `GameReply::Render` - The press was applied
    /// - `GameReply::Notice` - The press was refused, or the button is stale or foreign
    pub async fn click(&self, actor: PlayerId, custom_id: &str) -> GameReply {
        self.router
            .route(InboundEvent::click(custom_id, actor))
            .await
            .into()
    }

    /// Handles a chat message that may be a typed move.
    ///
    /// # Returns
    /// - `Some(GameReply)` - The message was taken as a move
    /// - `None` - The message is ordinary chat
    pub async fn reply(&self, actor: PlayerId, text: &str) -> Option<GameReply> {
        self.router
            .route_reply(actor, text)
            .await
            .map(GameReply::from)
    }
}
