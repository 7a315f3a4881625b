use super::*;
use std::sync::Arc;

/// Tests looking up a session from either participant.
///
/// Expected: both players resolve to the same session handle
#[tokio::test]
async fn finds_session_for_every_participant() -> Result<(), EngineError> {
    let registry = SessionRegistry::new();
    let handle = registry.acquire(duel([ALICE, BOB]), CHANNEL).await?;

    let by_alice = registry.lookup(ALICE).await?;
    let by_bob = registry.lookup(BOB).await?;

    assert!(Arc::ptr_eq(&handle, &by_alice));
    assert!(Arc::ptr_eq(&handle, &by_bob));

    Ok(())
}

/// Tests looking up a player with no session.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_player_is_not_found() {
    let registry = SessionRegistry::new();

    let result = registry.lookup(CAROL).await;

    assert!(matches!(result, Err(EngineError::NotFound)));
}

/// Tests looking up a session by its key.
///
/// Expected: Ok for the live key, Err(NotFound) for an unknown one
#[tokio::test]
async fn finds_session_by_key() -> Result<(), EngineError> {
    let registry = SessionRegistry::new();
    registry.acquire(duel([ALICE, BOB]), CHANNEL).await?;

    let key = SessionKey::from_participants(&[BOB, ALICE])?;
    let unknown = SessionKey::from_participants(&[ALICE, CAROL])?;

    assert!(registry.lookup_key(&key).await.is_ok());
    assert!(matches!(
        registry.lookup_key(&unknown).await,
        Err(EngineError::NotFound)
    ));

    Ok(())
}
