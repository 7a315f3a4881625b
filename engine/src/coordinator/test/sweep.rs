use super::*;
use chrono::Utc;

/// Tests sweeping an abandoned, idle game.
///
/// Verifies that the session is released, its deadline disarmed, and an expiry
/// notice sent to its channel.
///
/// Expected: 1 released, Expired notice
#[tokio::test]
async fn sweeps_idle_session() {
    let mut harness = Harness::new();
    let handle = harness.tic_tac_toe().await;

    let released = harness
        .coordinator
        .sweep_at(Utc::now() + chrono::Duration::hours(1), chrono::Duration::minutes(15))
        .await;

    assert_eq!(released, 1);
    assert!(handle.lock().await.pending().is_none());
    let notice = harness.notices.recv().await.unwrap();
    assert_eq!(notice.prompt, Prompt::Expired);
    assert_eq!(notice.channel_id, CHANNEL);
    assert!(harness.coordinator.registry().is_empty().await);
}

/// Tests sweeping a recently active game.
///
/// Expected: 0 released, no notice
#[tokio::test]
async fn keeps_active_session() {
    let mut harness = Harness::new();
    harness.tic_tac_toe().await;

    let released = harness.coordinator.sweep(chrono::Duration::minutes(15)).await;

    assert_eq!(released, 0);
    assert!(harness.notices.try_recv().is_err());
}

/// Tests that refused commands do not keep a game alive.
///
/// Verifies that out-of-turn, invalid and stranger commands leave the last activity
/// untouched so the sweep still releases the session, while an applied move refreshes it.
///
/// Expected: activity unchanged after rejects, refreshed after a move, 1 released
#[tokio::test]
async fn rejected_commands_are_not_activity() {
    let harness = Harness::new();
    let handle = harness.tic_tac_toe().await;
    let stale = Utc::now() - chrono::Duration::hours(1);
    handle.lock().await.touch_at(stale);

    assert!(matches!(harness.mark(&handle, BOB, 4).await, RouteOutcome::Rejected(_)));
    assert!(matches!(harness.mark(&handle, ALICE, 9).await, RouteOutcome::Rejected(_)));
    assert!(matches!(harness.mark(&handle, CAROL, 4).await, RouteOutcome::Rejected(_)));
    assert_eq!(handle.lock().await.last_activity_at, stale);

    rendered(harness.mark(&handle, ALICE, 4).await);
    assert!(handle.lock().await.last_activity_at > stale);

    handle.lock().await.touch_at(stale);
    assert!(matches!(harness.mark(&handle, ALICE, 0).await, RouteOutcome::Rejected(_)));
    let released = harness
        .coordinator
        .sweep_at(Utc::now(), chrono::Duration::minutes(15))
        .await;
    assert_eq!(released, 1);
}
