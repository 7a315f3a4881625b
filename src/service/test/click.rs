use engine::{
    game::{Effect, Outcome},
    render::Prompt,
    router::control_id,
    GameType, Phase,
};
use test_utils::{builder::TestBuilder, factory};

use super::{expect_notice, expect_render};
use crate::service::game::GameService;

/// Tests accepting a challenge through its button.
///
/// Expected: Render of the active game with a turn prompt
#[tokio::test]
async fn accept_starts_game() {
    let test = TestBuilder::new().build();
    let (alice, bob) = factory::create_pair();
    let service = GameService::new(&test.router);
    let challenge = factory::start_game(&test, GameType::ConnectFour, alice, bob).await;

    let render = expect_render(
        service
            .click(bob, &control_id("board_", "accept", challenge.session_id))
            .await,
    );

    assert_eq!(render.phase, Phase::Active);
    assert!(matches!(render.prompt, Prompt::Turn { player, .. } if player == alice));
}

/// Tests a full tic-tac-toe game played through buttons.
///
/// Expected: the last mark wins and the session is released
#[tokio::test]
async fn plays_game_to_the_end() {
    let test = TestBuilder::new().build();
    let (alice, bob) = factory::create_pair();
    let service = GameService::new(&test.router);
    let challenge = factory::start_game(&test, GameType::TicTacToe, alice, bob).await;
    let id = challenge.session_id;
    expect_render(service.click(bob, &control_id("board_", "accept", id)).await);

    // Alice takes the top row while Bob plays the middle row.
    for (player, cell) in [(alice, 0), (bob, 3), (alice, 1), (bob, 4)] {
        expect_render(
            service
                .click(player, &control_id("ttt_", &cell.to_string(), id))
                .await,
        );
    }
    let render = expect_render(service.click(alice, &control_id("ttt_", "2", id)).await);

    assert_eq!(render.prompt, Prompt::Finished(Outcome::Winner(alice)));
    assert_eq!(render.last_effect, Some(Effect::Marked { cell: 2 }));
    assert!(test.registry.is_empty().await);
}

/// Tests pressing a button out of turn.
///
/// Expected: Notice telling the player to wait
#[tokio::test]
async fn out_of_turn_press_is_refused() {
    let test = TestBuilder::new().build();
    let (alice, bob) = factory::create_pair();
    let service = GameService::new(&test.router);
    let challenge = factory::start_game(&test, GameType::TicTacToe, alice, bob).await;
    let id = challenge.session_id;
    expect_render(service.click(bob, &control_id("board_", "accept", id)).await);

    let message = expect_notice(service.click(bob, &control_id("ttt_", "4", id)).await);

    assert_eq!(message, "Wait for your turn.");
}

/// Tests pressing a button left over from an earlier game between the same players.
///
/// Expected: Notice that the game is no longer available
#[tokio::test]
async fn stale_button_is_unavailable() {
    let test = TestBuilder::new().build();
    let (alice, bob) = factory::create_pair();
    let service = GameService::new(&test.router);
    let first = factory::start_game(&test, GameType::Duel, alice, bob).await;
    service.forfeit(alice).await;
    factory::start_game(&test, GameType::Duel, alice, bob).await;

    let message = expect_notice(
        service
            .click(bob, &control_id("duel_", "accept", first.session_id))
            .await,
    );

    assert_eq!(message, "This game is no longer available.");
}
