//! Arcade Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the arcade
//! bot. This crate offers a builder pattern for creating test contexts with a fully wired
//! engine (registry, coordinator and router) and factories for players and games.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring the engine under test
//! - **TestContext**: Test environment holding the engine and its notice receiver
//! - **factory**: Unique players, seeded games and pre-placed battleship fleets
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_game_flow() {
//!     let mut test = TestBuilder::new().build();
//!     let (alice, bob) = factory::player::create_pair();
//!
//!     let render = factory::game::start_game(&test, GameType::TicTacToe, alice, bob).await;
//!     let outcome = test.click(bob, "board_", "accept").await;
//! }
//! ```

pub mod builder;
pub mod context;
pub mod factory;
