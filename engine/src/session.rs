//! Live game sessions.

use chrono::{DateTime, Utc};
use std::{fmt, sync::Arc};
use tokio::{sync::Mutex, task::AbortHandle, time::Instant};

use crate::{
    error::EngineError,
    event::PlayerId,
    game::{CancelReason, Effect, Ending, Game, Phase},
    render::{Prompt, RenderRequest},
};

/// Shared handle to a session. Holding the lock serializes event handling for it.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Registry key derived from the sorted participant ids, e.g. `"17-42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    /// Builds the key for a set of participants regardless of their order.
    ///
    /// # Returns
    /// - `Ok(SessionKey)` - Key shared by every ordering of the same players
    /// - `Err(EngineError::Invalid)` - No participants, or the same player twice
    pub fn from_participants(participants: &[PlayerId]) -> Result<Self, EngineError> {
        let mut ids: Vec<u64> = participants.iter().map(|p| p.get()).collect();
        ids.sort_unstable();

        if ids.is_empty() {
            return Err(EngineError::Invalid("A game needs players".to_string()));
        }
        if ids.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(EngineError::Invalid(
                "A player cannot take two seats in one game".to_string(),
            ));
        }

        let key = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("-");
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single outstanding turn deadline of a session.
#[derive(Debug)]
pub struct PendingTurn {
    pub expected: PlayerId,
    pub deadline: Instant,
    /// Wall-clock equivalent of `deadline`, for display.
    pub due_at: DateTime<Utc>,
    pub generation: u64,
    pub task: AbortHandle,
}

pub struct Session {
    pub id: u64,
    pub key: SessionKey,
    pub game: Box<dyn Game>,
    /// Channel the game is displayed in.
    pub channel_id: u64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pending: Option<PendingTurn>,
    generation: u64,
}

impl Session {
    pub fn new(id: u64, key: SessionKey, game: Box<dyn Game>, channel_id: u64) -> Self {
        let now = Utc::now();
        Self {
            id,
            key,
            game,
            channel_id,
            created_at: now,
            last_activity_at: now,
            pending: None,
            generation: 0,
        }
    }

    pub fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        self.last_activity_at = now;
    }

    pub fn is_idle(&self, now: DateTime<Utc>, max_idle: chrono::Duration) -> bool {
        now - self.last_activity_at > max_idle
    }

    pub fn is_live(&self) -> bool {
        self.game.phase() != Phase::Ended
    }

    /// Reserves the generation number for the next timer.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn pending(&self) -> Option<&PendingTurn> {
        self.pending.as_ref()
    }

    /// Stores a newly scheduled deadline, aborting the one it replaces.
    pub fn arm(&mut self, pending: PendingTurn) {
        self.disarm();
        self.pending = Some(pending);
    }

    /// Aborts the outstanding timer. Returns `false` when none was armed.
    pub fn disarm(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                true
            }
            None => false,
        }
    }

    /// Claims the pending turn for the timer that owns `generation` without aborting
    /// it. Returns `None` when that timer has been replaced or disarmed.
    pub fn take_pending(&mut self, generation: u64) -> Option<PendingTurn> {
        match &self.pending {
            Some(pending) if pending.generation == generation => self.pending.take(),
            _ => None,
        }
    }

    /// Disarms the timer and forces the game to end.
    ///
    /// # Returns
    /// - `true` - The game was live and is now cancelled
    /// - `false` - The game had already ended
    pub fn cancel(&mut self, reason: CancelReason) -> bool {
        self.disarm();
        self.game.cancel(reason)
    }

    /// What the players are currently being asked for.
    pub fn prompt(&self) -> Prompt {
        match self.game.phase() {
            Phase::Setup => Prompt::AwaitingSetup {
                pending: self.game.pending_setup(),
            },
            Phase::Active => match self.game.current_turn() {
                Some(player) => Prompt::Turn {
                    player,
                    deadline: self
                        .pending
                        .as_ref()
                        .filter(|pending| pending.expected == player)
                        .map(|pending| pending.due_at),
                },
                None => Prompt::Expired,
            },
            Phase::Ended => match self.game.ending() {
                Some(Ending::Finished(outcome)) => Prompt::Finished(outcome),
                Some(Ending::Cancelled(CancelReason::Timeout(by))) => Prompt::Abandoned { by },
                Some(Ending::Cancelled(CancelReason::Forfeit(by))) => Prompt::Forfeited { by },
                Some(Ending::Cancelled(CancelReason::Idle)) | None => Prompt::Expired,
            },
        }
    }

    /// Public render of the session.
    pub fn render(&self, last_effect: Option<Effect>) -> RenderRequest {
        RenderRequest {
            session_key: self.key.clone(),
            session_id: self.id,
            channel_id: self.channel_id,
            game_type: self.game.game_type(),
            phase: self.game.phase(),
            participants: self.game.participants().to_vec(),
            board_views: self.game.views(),
            prompt: self.prompt(),
            last_effect,
            private_view: None,
        }
    }

    /// Render for a reply to `viewer`, including what only they may see.
    pub fn render_for(&self, viewer: PlayerId, last_effect: Option<Effect>) -> RenderRequest {
        let mut request = self.render(last_effect);
        request.private_view = self
            .game
            .private_view(viewer)
            .map(|view| (viewer, view));
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{new_game, GameType};

    const ALICE: PlayerId = PlayerId(42);
    const BOB: PlayerId = PlayerId(17);

    fn session(game_type: GameType) -> Session {
        let game = new_game(game_type, vec![ALICE, BOB]).unwrap();
        let key = SessionKey::from_participants(game.participants()).unwrap();
        Session::new(1, key, game, 99)
    }

    #[test]
    fn key_ignores_participant_order() {
        let forward = SessionKey::from_participants(&[ALICE, BOB]).unwrap();
        let backward = SessionKey::from_participants(&[BOB, ALICE]).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.as_str(), "17-42");
    }

    #[test]
    fn key_rejects_duplicate_participants() {
        let result = SessionKey::from_participants(&[ALICE, ALICE]);
        assert!(matches!(result, Err(EngineError::Invalid(_))));
    }

    #[test]
    fn idle_after_max_idle_elapses() {
        let mut session = session(GameType::Duel);
        let start = Utc::now();
        session.touch_at(start);

        let limit = chrono::Duration::minutes(15);
        assert!(!session.is_idle(start + chrono::Duration::minutes(10), limit));
        assert!(session.is_idle(start + chrono::Duration::minutes(16), limit));
    }

    #[test]
    fn prompt_follows_the_phase() {
        let mut session = session(GameType::TicTacToe);
        assert_eq!(session.prompt(), Prompt::AwaitingSetup { pending: vec![BOB] });

        session.cancel(CancelReason::Forfeit(BOB));
        assert_eq!(session.prompt(), Prompt::Forfeited { by: BOB });
        assert!(!session.is_live());
        assert!(!session.cancel(CancelReason::Idle));
    }

    #[test]
    fn render_carries_session_identity() {
        let session = session(GameType::Battleship);

        let public = session.render(None);
        let private = session.render_for(ALICE, None);

        assert_eq!(public.session_id, 1);
        assert_eq!(public.channel_id, 99);
        assert_eq!(public.board_views.len(), 2);
        assert!(public.private_view.is_none());
        assert_eq!(private.private_view.map(|(viewer, _)| viewer), Some(ALICE));
        assert_eq!(
            public.prompt,
            Prompt::AwaitingSetup {
                pending: vec![ALICE, BOB]
            }
        );
    }
}
