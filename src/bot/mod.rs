//! Discord bot hosting the arcade games.
//!
//! Players start games with slash commands, play them with the buttons on the game
//! message, and type moves for the games that read chat (battleship targets and
//! placements, word chain words). The bot's HTTP client is shared with the notice
//! relay so timeout and expiry messages use the same connection.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive slash command and component interactions in guilds
//! - `GUILD_MESSAGES` - Receive typed moves in guild channels
//! - `DIRECT_MESSAGES` - Receive typed moves sent to the bot privately
//! - `MESSAGE_CONTENT` - Read the text of those messages (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
