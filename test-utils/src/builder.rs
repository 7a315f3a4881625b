use engine::{
    router::{Route, RouteTable},
    Coordinator, InteractionRouter, SessionRegistry,
};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::context::TestContext;

/// Turn timeout used when a test does not pick one.
pub const DEFAULT_TURN_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for creating test contexts around a fresh engine.
///
/// Every built context gets its own registry, so tests never share sessions.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_turn_timeout(Duration::from_secs(5))
///     .build();
/// ```
pub struct TestBuilder {
    turn_timeout: Duration,
    routes: Option<Vec<Route>>,
}

impl TestBuilder {
    /// Creates a builder with the default turn timeout and route table.
    pub fn new() -> Self {
        Self {
            turn_timeout: DEFAULT_TURN_TIMEOUT,
            routes: None,
        }
    }

    /// Sets how long players have to act before their game is abandoned.
    ///
    /// # Arguments
    /// - `turn_timeout` - Deadline armed after every accepted move
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_turn_timeout(mut self, turn_timeout: Duration) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }

    /// Replaces the default route table.
    pub fn with_routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes = Some(routes.into_iter().collect());
        self
    }

    /// Wires registry, coordinator and router together.
    ///
    /// # Returns
    /// - `TestContext` - Engine ready for use, with the receiving end of its notice channel
    pub fn build(self) -> TestContext {
        let (tx, notices) = mpsc::unbounded_channel();
        let registry = SessionRegistry::new();
        let coordinator = Coordinator::new(registry.clone(), self.turn_timeout, tx);
        let table = match self.routes {
            Some(routes) => RouteTable::new(routes),
            None => RouteTable::default(),
        };
        let router = InteractionRouter::new(table, coordinator.clone());

        TestContext {
            registry,
            coordinator,
            router,
            notices,
        }
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
