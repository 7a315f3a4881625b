//! Turn and timeout coordination.
//!
//! The coordinator drives a session through its phases: it hands setup commands and
//! turn actions to the game, arms a deadline for whoever has to move next, and
//! releases the session once the game ends. Deadlines are tokio tasks that sleep
//! until the turn expires; each carries the generation it was armed with so a timer
//! that was replaced can never cancel a newer turn.
//!
//! Results of a handled event are returned to the caller. Results nobody asked for
//! (timeouts, idle expiry) are pushed over the notice channel instead.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use std::{
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::{
    sync::{mpsc, Mutex, MutexGuard},
    time::Instant,
};

use crate::{
    error::EngineError,
    event::{Command, PlayerId},
    game::{ActionResult, CancelReason, Game, GameError, Phase, SetupProgress},
    registry::SessionRegistry,
    render::RenderRequest,
    router::RouteOutcome,
    session::{PendingTurn, Session, SessionHandle, SessionKey},
};

#[cfg(test)]
mod test;

/// Longest turn a coordinator will arm; longer timeouts are clamped to it.
pub const MAX_TURN_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Clone)]
pub struct Coordinator {
    registry: SessionRegistry,
    turn_timeout: Duration,
    notices: mpsc::UnboundedSender<RenderRequest>,
}

impl Coordinator {
    /// Creates a coordinator over `registry`.
    ///
    /// # Arguments
    /// - `registry` - Registry owning the sessions
    /// - `turn_timeout` - How long a player has to act before the game is abandoned,
    ///   at most `MAX_TURN_TIMEOUT`
    /// - `notices` - Receives renders for timeouts and idle expiry
    pub fn new(
        registry: SessionRegistry,
        turn_timeout: Duration,
        notices: mpsc::UnboundedSender<RenderRequest>,
    ) -> Self {
        Self {
            registry,
            turn_timeout: turn_timeout.min(MAX_TURN_TIMEOUT),
            notices,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn turn_timeout(&self) -> Duration {
        self.turn_timeout
    }

    /// Registers a new game and renders its setup prompt.
    ///
    /// # Returns
    /// - `Ok(RenderRequest)` - Initial render of the new session
    /// - `Err(EngineError::Conflict)` - A participant is already playing
    pub async fn start(
        &self,
        game: Box<dyn Game>,
        channel_id: u64,
    ) -> Result<RenderRequest, EngineError> {
        let handle = self.registry.acquire(game, channel_id).await?;
        let session = handle.lock().await;
        Ok(session.render(None))
    }

    /// Handles one command for a session.
    ///
    /// The session lock is held for the whole call, which serializes events for the
    /// same session. Commands for another family, a previous session serial, or a game
    /// that already ended are `Unavailable`. Only applied commands count as activity.
    ///
    /// # Arguments
    /// - `handle` - Session the actor is seated in
    /// - `actor` - Player who sent the command
    /// - `command` - Classified command
    ///
    /// # Returns
    /// - `RouteOutcome::Render` - The command was applied
    /// - `RouteOutcome::Rejected` - The command was refused; nothing changed
    /// - `RouteOutcome::Unavailable` - The command does not belong to this session
    pub async fn dispatch(
        &self,
        handle: SessionHandle,
        actor: PlayerId,
        command: Command,
    ) -> RouteOutcome {
        let mut session = handle.lock().await;

        if command.family != session.game.family()
            || command.session_id.is_some_and(|id| id != session.id)
            || !session.is_live()
        {
            return RouteOutcome::Unavailable;
        }
        if !session.game.participants().contains(&actor) {
            return RouteOutcome::Rejected(EngineError::NotParticipant);
        }

        if command.is_forfeit() {
            session.cancel(CancelReason::Forfeit(actor));
            tracing::info!("Player {} forfeited session {}", actor, session.id);
            return RouteOutcome::Render(self.finish(session).await);
        }

        match session.game.phase() {
            Phase::Setup => match session.game.setup(actor, &command) {
                Ok(SetupProgress::Waiting) => {
                    session.touch();
                    RouteOutcome::Render(session.render_for(actor, None))
                }
                Ok(SetupProgress::Started { first }) => {
                    session.touch();
                    tracing::debug!("Session {} started, {} moves first", session.id, first);
                    self.arm(&handle, &mut session, first);
                    RouteOutcome::Render(session.render_for(actor, None))
                }
                Err(err) => RouteOutcome::Rejected(err.into()),
            },
            Phase::Active => match session.game.act(actor, &command) {
                ActionResult::RejectedWrongPhase(phase) => {
                    RouteOutcome::Rejected(GameError::WrongPhase(phase).into())
                }
                ActionResult::RejectedNotYourTurn => RouteOutcome::Rejected(EngineError::NotYourTurn),
                ActionResult::RejectedInvalidTarget(reason) => {
                    RouteOutcome::Rejected(EngineError::InvalidTarget(reason))
                }
                ActionResult::Accepted(effect) => {
                    session.touch();
                    if let Some(next) = session.game.current_turn() {
                        self.arm(&handle, &mut session, next);
                    }
                    RouteOutcome::Render(session.render_for(actor, Some(effect)))
                }
                ActionResult::AcceptedTerminal(effect, outcome) => {
                    session.disarm();
                    tracing::info!("Session {} finished: {:?}", session.id, outcome);
                    let render = session.render_for(actor, Some(effect));
                    let (key, id) = (session.key.clone(), session.id);
                    drop(session);
                    self.registry.release_session(&key, id).await;
                    RouteOutcome::Render(render)
                }
            },
            Phase::Ended => RouteOutcome::Unavailable,
        }
    }

    /// Forfeits the actor's live game without going through a control.
    ///
    /// # Returns
    /// - `Ok(RenderRequest)` - Render of the forfeited game
    /// - `Err(EngineError::NotFound)` - The actor is not playing
    pub async fn forfeit(&self, actor: PlayerId) -> Result<RenderRequest, EngineError> {
        let handle = self.registry.lookup(actor).await?;
        let mut session = handle.lock().await;
        if !session.cancel(CancelReason::Forfeit(actor)) {
            return Err(EngineError::NotFound);
        }
        tracing::info!("Player {} forfeited session {}", actor, session.id);

        Ok(self.finish(session).await)
    }

    /// Releases sessions idle for longer than `max_idle` and announces each one.
    ///
    /// # Returns
    /// - `usize` - Number of sessions released
    pub async fn sweep(&self, max_idle: chrono::Duration) -> usize {
        self.sweep_at(Utc::now(), max_idle).await
    }

    pub async fn sweep_at(&self, now: DateTime<Utc>, max_idle: chrono::Duration) -> usize {
        let released = self.registry.sweep_expired_at(now, max_idle).await;

        for handle in &released {
            let session = handle.lock().await;
            tracing::info!("Session {} expired after sitting idle", session.id);
            self.notify(session.render(None));
        }

        released.len()
    }

    /// Renders an ended session, then releases it after giving up its lock.
    async fn finish(&self, session: MutexGuard<'_, Session>) -> RenderRequest {
        let render = session.render(None);
        let key: SessionKey = session.key.clone();
        let id = session.id;
        drop(session);

        self.registry.release_session(&key, id).await;
        render
    }

    /// Schedules the deadline for `expected`, replacing any armed timer.
    fn arm(&self, handle: &SessionHandle, session: &mut Session, expected: PlayerId) {
        let generation = session.next_generation();
        let now = Instant::now();
        let deadline = now.checked_add(self.turn_timeout).unwrap_or(now);
        let due_at = chrono::Duration::from_std(self.turn_timeout)
            .ok()
            .and_then(|timeout| Utc::now().checked_add_signed(timeout))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let weak = Arc::downgrade(handle);
        let coordinator = self.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            coordinator.expire(weak, generation).await;
        });

        session.arm(PendingTurn {
            expected,
            deadline,
            due_at,
            generation,
            task: task.abort_handle(),
        });
    }

    /// Runs when a deadline passes. A timer whose generation is no longer the armed
    /// one, or whose session is gone, does nothing.
    async fn expire(&self, session: Weak<Mutex<Session>>, generation: u64) {
        let Some(handle) = session.upgrade() else {
            return;
        };
        let mut session = handle.lock().await;

        let Some(pending) = session.take_pending(generation) else {
            tracing::debug!(
                "Ignoring stale timer {} for session {}",
                generation,
                session.id
            );
            return;
        };
        if !session.cancel(CancelReason::Timeout(pending.expected)) {
            return;
        }

        tracing::info!(
            "Session {} abandoned: {} did not act in time",
            session.id,
            pending.expected
        );

        let render = self.finish(session).await;
        self.notify(render);
    }

    fn notify(&self, render: RenderRequest) {
        if self.notices.send(render).is_err() {
            tracing::warn!("Notice channel closed; dropping game notice");
        }
    }
}
