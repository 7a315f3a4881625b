//! Arcade game engine.
//!
//! Session-scoped engine for the turn-based mini-games the bot hosts. The engine
//! knows nothing about Discord: it receives `InboundEvent`s carrying an opaque
//! control identifier and emits `RenderRequest`s that the presentation layer turns
//! into embeds and buttons.
//!
//! # Components
//!
//! - **Game** (`game/`) - Per-game state machines (setup → active → ended) behind the
//!   object-safe `Game` trait, implemented once by `Machine<R>` for every `Rules` type
//! - **Registry** (`registry/`) - Maps participants to their single live session and
//!   sweeps idle sessions
//! - **Router** (`router/`) - Classifies control identifiers into game families and
//!   forwards events to the owning session
//! - **Coordinator** (`coordinator/`) - Phase dispatch, turn deadlines and forfeits
//!
//! # Event Flow
//!
//! 1. **Router** classifies the identifier and looks up the actor's session
//! 2. **Coordinator** locks the session and dispatches by phase to `setup` or `act`
//! 3. **Game** validates and applies the input
//! 4. **Coordinator** re-arms the turn deadline or releases the finished session
//! 5. The resulting `RenderRequest` is returned to the caller; timeouts and idle
//!    expiry are pushed over the coordinator's notice channel instead

pub mod coordinator;
pub mod error;
pub mod event;
pub mod game;
pub mod registry;
pub mod render;
pub mod router;
pub mod session;

pub use coordinator::Coordinator;
pub use error::EngineError;
pub use event::{Command, Coord, InboundEvent, Payload, PlayerId};
pub use game::{new_game, new_seeded_game, Game, GameFamily, GameType, Phase};
pub use registry::SessionRegistry;
pub use render::{Prompt, RenderRequest};
pub use router::{InteractionRouter, RouteOutcome, RouteTable};
pub use session::{Session, SessionHandle, SessionKey};
