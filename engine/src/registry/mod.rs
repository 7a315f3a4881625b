//! Session registry.
//!
//! Owns every live session and indexes it under each participant, which is what
//! enforces the one-session-per-player rule. The registry is a cheap cloneable
//! handle; all clones share the same index.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::Mutex;

use crate::{
    error::EngineError,
    event::PlayerId,
    game::{CancelReason, Game},
    session::{Session, SessionHandle, SessionKey},
};

#[cfg(test)]
mod test;

struct Slot {
    id: u64,
    handle: SessionHandle,
    participants: Vec<PlayerId>,
}

#[derive(Default)]
struct RegistryInner {
    sessions: HashMap<SessionKey, Slot>,
    by_player: HashMap<PlayerId, SessionKey>,
}

impl RegistryInner {
    fn remove(&mut self, key: &SessionKey) -> Option<Slot> {
        let slot = self.sessions.remove(key)?;
        for player in &slot.participants {
            if self.by_player.get(player) == Some(key) {
                self.by_player.remove(player);
            }
        }
        Some(slot)
    }
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    last_id: Arc<AtomicU64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session for the game's participants.
    ///
    /// The conflict check and the insert happen under one lock, so two overlapping
    /// acquires for the same player can never both succeed.
    ///
    /// # Arguments
    /// - `game` - Freshly created game in the setup phase
    /// - `channel_id` - Channel the game is displayed in
    ///
    /// # Returns
    /// - `Ok(SessionHandle)` - The new session
    /// - `Err(EngineError::Conflict)` - A participant already owns a live session
    /// - `Err(EngineError::Invalid)` - The participants do not form a valid key
    pub async fn acquire(
        &self,
        game: Box<dyn Game>,
        channel_id: u64,
    ) -> Result<SessionHandle, EngineError> {
        let participants = game.participants().to_vec();
        let key = SessionKey::from_participants(&participants)?;
        let game_type = game.game_type();

        let mut inner = self.inner.lock().await;
        if let Some(player) = participants
            .iter()
            .find(|player| inner.by_player.contains_key(*player))
        {
            return Err(EngineError::Conflict { player: *player });
        }

        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = Arc::new(Mutex::new(Session::new(id, key.clone(), game, channel_id)));
        for player in &participants {
            inner.by_player.insert(*player, key.clone());
        }
        inner.sessions.insert(
            key.clone(),
            Slot {
                id,
                handle: handle.clone(),
                participants,
            },
        );

        tracing::info!(
            "Started {} session {} for {}",
            game_type.display_name(),
            id,
            key
        );

        Ok(handle)
    }

    /// Finds the session a player is seated in.
    pub async fn lookup(&self, player: PlayerId) -> Result<SessionHandle, EngineError> {
        let inner = self.inner.lock().await;
        inner
            .by_player
            .get(&player)
            .and_then(|key| inner.sessions.get(key))
            .map(|slot| slot.handle.clone())
            .ok_or(EngineError::NotFound)
    }

    pub async fn lookup_key(&self, key: &SessionKey) -> Result<SessionHandle, EngineError> {
        let inner = self.inner.lock().await;
        inner
            .sessions
            .get(key)
            .map(|slot| slot.handle.clone())
            .ok_or(EngineError::NotFound)
    }

    /// Removes a session from every index. Returns `false` if it was already gone.
    pub async fn release(&self, key: &SessionKey) -> bool {
        let released = self.inner.lock().await.remove(key);
        if let Some(slot) = &released {
            tracing::info!("Released session {} ({})", slot.id, key);
        }
        released.is_some()
    }

    /// Removes a session only if `key` still maps to session serial `id`.
    ///
    /// Used by code paths that finished with a session after giving up its lock, so a
    /// late release can never remove a newer game between the same players.
    pub async fn release_session(&self, key: &SessionKey, id: u64) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.sessions.get(key).map(|slot| slot.id) != Some(id) {
            tracing::debug!("Session {} ({}) was already released", id, key);
            return false;
        }

        inner.remove(key);
        tracing::info!("Released session {} ({})", id, key);
        true
    }

    /// Releases every session idle for longer than `max_idle`.
    pub async fn sweep_expired(&self, max_idle: chrono::Duration) -> Vec<SessionHandle> {
        self.sweep_expired_at(Utc::now(), max_idle).await
    }

    /// Releases every session whose last activity is older than `max_idle` at `now`.
    ///
    /// Each expired game is cancelled as idle and its timer disarmed before removal.
    /// Sessions whose lock is held are being processed and are skipped.
    ///
    /// # Returns
    /// - `Vec<SessionHandle>` - The released sessions, for the caller to announce
    pub async fn sweep_expired_at(
        &self,
        now: DateTime<Utc>,
        max_idle: chrono::Duration,
    ) -> Vec<SessionHandle> {
        let mut inner = self.inner.lock().await;

        let expired: Vec<SessionKey> = inner
            .sessions
            .iter()
            .filter_map(|(key, slot)| {
                let mut session = slot.handle.try_lock().ok()?;
                if !session.is_idle(now, max_idle) {
                    return None;
                }
                session.cancel(CancelReason::Idle);
                Some(key.clone())
            })
            .collect();

        let released: Vec<SessionHandle> = expired
            .iter()
            .filter_map(|key| inner.remove(key))
            .map(|slot| slot.handle)
            .collect();

        if !released.is_empty() {
            tracing::info!("Swept {} idle session(s)", released.len());
        }

        released
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
