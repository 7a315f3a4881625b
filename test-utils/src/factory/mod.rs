//! Factory methods for creating test data.
//!
//! Factories hand out unique players and games with sensible defaults so tests only
//! spell out what they care about. Games are seeded, which makes random first turns,
//! fleets and card draws the same on every run.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let (alice, bob) = factory::player::create_pair();
//! let game = factory::game::GameFactory::new(GameType::Duel)
//!     .players(alice, bob)
//!     .seed(7)
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `player` - Unique player ids
//! - `game` - Seeded games, and games started on a test context
//! - `battleship` - Battleship games with both fleets already placed

pub mod battleship;
pub mod game;
pub mod player;

pub use game::{create_game, start_game};
pub use player::{create_pair, create_player};
