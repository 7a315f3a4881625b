//! Interaction routing.
//!
//! Control identifiers have the form `<prefix><verb>[:<session id>]`, e.g.
//! `col_3:12` or `blackjack_hit`. The prefix selects the game family through a
//! route table, the optional suffix pins the control to the session it was rendered
//! for. Routing never fails loudly: anything that cannot be delivered becomes
//! `RouteOutcome::Unavailable`.

use dioxus_logger::tracing;
use std::sync::Arc;

use crate::{
    coordinator::Coordinator,
    error::EngineError,
    event::{Command, InboundEvent, PlayerId},
    game::{GameFamily, Phase},
    render::RenderRequest,
};

#[cfg(test)]
mod test;

/// Separates the verb from the session serial in a control identifier.
pub const SESSION_SEPARATOR: char = ':';

/// Verb synthesized for text replies.
pub const REPLY_VERB: &str = "reply";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub prefix: &'static str,
    pub family: GameFamily,
}

impl Route {
    pub const fn new(prefix: &'static str, family: GameFamily) -> Self {
        Self { prefix, family }
    }
}

pub const DEFAULT_ROUTES: [Route; 7] = [
    Route::new("bs_", GameFamily::Battleship),
    Route::new("board_", GameFamily::BoardGames),
    Route::new("col_", GameFamily::BoardGames),
    Route::new("ttt_", GameFamily::BoardGames),
    Route::new("duel_", GameFamily::TurnDuel),
    Route::new("blackjack_", GameFamily::Blackjack),
    Route::new("word_", GameFamily::WordGame),
];

/// Prefix table, searched longest prefix first so a specific prefix always wins
/// over a shorter one it extends.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut routes: Vec<Route> = routes.into_iter().collect();
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    pub fn resolve(&self, opaque_id: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| opaque_id.starts_with(route.prefix))
    }

    /// Classifies an identifier into its game family.
    ///
    /// # Returns
    /// - `Ok(GameFamily)` - Family owning the matched prefix
    /// - `Err(EngineError::Unrecognized)` - No prefix matches
    pub fn classify(&self, opaque_id: &str) -> Result<GameFamily, EngineError> {
        self.resolve(opaque_id)
            .map(|route| route.family)
            .ok_or_else(|| EngineError::Unrecognized(opaque_id.to_string()))
    }

    /// Splits an identifier into a command.
    ///
    /// # Returns
    /// - `Ok(Command)` - Classified command without payload
    /// - `Err(EngineError::Unrecognized)` - Unknown prefix, empty verb, or a session
    ///   suffix that is not a number
    pub fn parse(&self, opaque_id: &str) -> Result<Command, EngineError> {
        let unrecognized = || EngineError::Unrecognized(opaque_id.to_string());

        let route = self.resolve(opaque_id).ok_or_else(unrecognized)?;
        let rest = &opaque_id[route.prefix.len()..];

        let (verb, session_id) = match rest.rsplit_once(SESSION_SEPARATOR) {
            Some((verb, id)) => (verb, Some(id.parse::<u64>().map_err(|_| unrecognized())?)),
            None => (rest, None),
        };
        if verb.is_empty() {
            return Err(unrecognized());
        }

        let command = Command::new(route.family, route.prefix, verb);
        Ok(match session_id {
            Some(id) => command.with_session(id),
            None => command,
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTES)
    }
}

/// Builds the identifier for a control bound to a session.
pub fn control_id(prefix: &str, verb: &str, session_id: u64) -> String {
    format!("{}{}{}{}", prefix, verb, SESSION_SEPARATOR, session_id)
}

/// What became of a routed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The event was applied; redraw the session.
    Render(RenderRequest),
    /// The event was refused; tell the actor why. Nothing changed.
    Rejected(EngineError),
    /// Stale, foreign or unrecognized control.
    Unavailable,
}

#[derive(Clone)]
pub struct InteractionRouter {
    table: Arc<RouteTable>,
    coordinator: Coordinator,
}

impl InteractionRouter {
    pub fn new(table: RouteTable, coordinator: Coordinator) -> Self {
        Self {
            table: Arc::new(table),
            coordinator,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Delivers a UI event to the session of the player who triggered it.
    ///
    /// # Arguments
    /// - `event` - Control identifier, actor and payload from the presentation layer
    ///
    /// # Returns
    /// - `RouteOutcome` - Render, rejection, or `Unavailable` when the identifier is
    ///   unknown, the actor has no session, or the control belongs to another game
    pub async fn route(&self, event: InboundEvent) -> RouteOutcome {
        let command = match self.table.parse(&event.opaque_id) {
            Ok(command) => command.with_payload(event.payload),
            Err(err) => {
                tracing::debug!("{}", err);
                return RouteOutcome::Unavailable;
            }
        };

        let handle = match self.coordinator.registry().lookup(event.actor).await {
            Ok(handle) => handle,
            Err(_) => return RouteOutcome::Unavailable,
        };

        self.coordinator.dispatch(handle, event.actor, command).await
    }

    /// Delivers a chat message as a game move when the sender is expected to type one.
    ///
    /// Only families that read replies take part, and only from a player who is due:
    /// the current player in an active game, or a player still placing in setup for
    /// families that accept typed setup. Everything else is ordinary chat.
    ///
    /// # Returns
    /// - `Some(RouteOutcome)` - The message was routed as a move
    /// - `None` - The message is not meant for a game
    pub async fn route_reply(&self, actor: PlayerId, text: &str) -> Option<RouteOutcome> {
        let handle = self.coordinator.registry().lookup(actor).await.ok()?;

        let opaque_id = {
            let session = handle.lock().await;
            let family = session.game.family();
            let prefix = family.reply_prefix()?;

            let expected = match session.game.phase() {
                Phase::Setup => {
                    family.accepts_setup_replies() && session.game.pending_setup().contains(&actor)
                }
                Phase::Active => session.game.current_turn() == Some(actor),
                Phase::Ended => false,
            };
            if !expected {
                return None;
            }

            control_id(prefix, REPLY_VERB, session.id)
        };

        Some(
            self.route(InboundEvent::reply(opaque_id, actor, text.trim()))
                .await,
        )
    }
}
