use std::time::Duration;
use tokio::sync::mpsc;

use crate::{
    coordinator::{Coordinator, MAX_TURN_TIMEOUT},
    error::EngineError,
    event::{Command, PlayerId},
    game::{new_game, GameFamily, GameType, Outcome, Phase},
    registry::SessionRegistry,
    render::{Prompt, RenderRequest},
    router::RouteOutcome,
    session::SessionHandle,
};

mod sweep;

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);
const CAROL: PlayerId = PlayerId(3);
const CHANNEL: u64 = 10;
const TURN: Duration = Duration::from_secs(60);

struct Harness {
    coordinator: Coordinator,
    notices: mpsc::UnboundedReceiver<RenderRequest>,
}

impl Harness {
    fn new() -> Self {
        Self::with_turn_timeout(TURN)
    }

    fn with_turn_timeout(turn_timeout: Duration) -> Self {
        let (tx, notices) = mpsc::unbounded_channel();
        Self {
            coordinator: Coordinator::new(SessionRegistry::new(), turn_timeout, tx),
            notices,
        }
    }

    async fn start(&self, game_type: GameType) -> SessionHandle {
        let game = new_game(game_type, vec![ALICE, BOB]).unwrap();
        self.coordinator.start(game, CHANNEL).await.unwrap();
        self.coordinator.registry().lookup(ALICE).await.unwrap()
    }

    /// Tic-tac-toe accepted by Bob, with Alice to move.
    async fn tic_tac_toe(&self) -> SessionHandle {
        let handle = self.start(GameType::TicTacToe).await;
        let outcome = self
            .coordinator
            .dispatch(handle.clone(), BOB, board("board_", "accept"))
            .await;
        assert!(matches!(outcome, RouteOutcome::Render(_)));
        handle
    }

    async fn mark(&self, handle: &SessionHandle, player: PlayerId, cell: usize) -> RouteOutcome {
        self.coordinator
            .dispatch(handle.clone(), player, board("ttt_", &cell.to_string()))
            .await
    }
}

fn board(prefix: &'static str, verb: &str) -> Command {
    Command::new(GameFamily::BoardGames, prefix, verb)
}

fn rendered(outcome: RouteOutcome) -> RenderRequest {
    match outcome {
        RouteOutcome::Render(render) => render,
        other => panic!("expected a render, got {other:?}"),
    }
}
