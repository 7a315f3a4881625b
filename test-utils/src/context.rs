use engine::{
    router::control_id, Coordinator, InboundEvent, InteractionRouter, PlayerId, RenderRequest,
    RouteOutcome, SessionHandle, SessionRegistry,
};
use tokio::sync::mpsc;

/// Test context containing a wired engine.
///
/// The fields are public so tests can reach past the router when they need to, e.g.
/// to inspect a session directly or drive the coordinator's sweep.
pub struct TestContext {
    pub registry: SessionRegistry,
    pub coordinator: Coordinator,
    pub router: InteractionRouter,
    /// Renders the engine pushed on its own (timeouts, idle expiry).
    pub notices: mpsc::UnboundedReceiver<RenderRequest>,
}

impl TestContext {
    /// Gets the session a player is seated in.
    ///
    /// # Panics
    /// - If the player has no session
    pub async fn session(&self, player: PlayerId) -> SessionHandle {
        self.registry
            .lookup(player)
            .await
            .unwrap_or_else(|_| panic!("player {} has no session", player))
    }

    /// Presses a control of the player's current session.
    ///
    /// Builds the identifier the presentation layer would have rendered, including the
    /// session serial.
    ///
    /// # Arguments
    /// - `actor` - Player pressing the control
    /// - `prefix` - Route prefix, e.g. `col_`
    /// - `verb` - Control verb, e.g. `3`
    ///
    /// # Returns
    /// - `RouteOutcome` - What the router made of the press
    pub async fn click(&self, actor: PlayerId, prefix: &str, verb: &str) -> RouteOutcome {
        let session_id = self.session(actor).await.lock().await.id;
        self.router
            .route(InboundEvent::click(control_id(prefix, verb, session_id), actor))
            .await
    }

    /// Sends a chat message as the player.
    pub async fn reply(&self, actor: PlayerId, text: &str) -> Option<RouteOutcome> {
        self.router.route_reply(actor, text).await
    }
}
