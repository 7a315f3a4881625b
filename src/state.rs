//! Application state shared by the Discord event handler and background tasks.

use engine::{Coordinator, InteractionRouter};

/// Shared engine handles.
///
/// Cloning is cheap: the router and coordinator share one session registry behind
/// reference counting, so every clone sees the same live games.
#[derive(Clone)]
pub struct AppState {
    /// Routes button presses and typed moves to their sessions.
    pub router: InteractionRouter,
}

impl AppState {
    pub fn new(router: InteractionRouter) -> Self {
        Self { router }
    }

    pub fn coordinator(&self) -> &Coordinator {
        self.router.coordinator()
    }
}
