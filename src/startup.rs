use engine::{Coordinator, InteractionRouter, RenderRequest, RouteTable, SessionRegistry};
use tokio::sync::mpsc;

use crate::{config::Config, state::AppState};

/// Wires the game engine together.
///
/// Creates the session registry, the coordinator that owns turn deadlines and the
/// router using the default identifier table. The coordinator reports timeouts and
/// idle expiry over a channel whose receiving end is returned for the notice relay.
///
/// # Arguments
/// - `config` - Application configuration containing the turn timeout
///
/// # Returns
/// - `(AppState, UnboundedReceiver<RenderRequest>)` - Shared state and the notice stream
pub fn build_engine(config: &Config) -> (AppState, mpsc::UnboundedReceiver<RenderRequest>) {
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();

    let registry = SessionRegistry::new();
    let coordinator = Coordinator::new(registry, config.turn_timeout, notice_tx);
    let router = InteractionRouter::new(RouteTable::default(), coordinator);

    (AppState::new(router), notice_rx)
}
