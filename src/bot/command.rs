//! Slash command definitions.

use engine::GameType;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

/// Name of the command that gives up the caller's current game.
pub const FORFEIT_COMMAND: &str = "forfeit";

/// Name of the user option every game command takes.
pub const OPPONENT_OPTION: &str = "opponent";

/// A slash command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    /// Challenge another player to a game.
    Challenge(GameType),
    Forfeit,
}

impl SlashCommand {
    /// Looks up a command by the name Discord reports.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == FORFEIT_COMMAND {
            return Some(Self::Forfeit);
        }
        GameType::ALL
            .into_iter()
            .find(|game_type| game_type.command_name() == name)
            .map(Self::Challenge)
    }
}

/// Builds the definitions registered with Discord: one command per game plus
/// `/forfeit`.
pub fn definitions() -> Vec<CreateCommand> {
    let mut commands: Vec<CreateCommand> = GameType::ALL
        .into_iter()
        .map(|game_type| {
            CreateCommand::new(game_type.command_name())
                .description(format!("Challenge someone to {}", game_type.display_name()))
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::User,
                        OPPONENT_OPTION,
                        "Player to challenge",
                    )
                    .required(true),
                )
        })
        .collect();

    commands.push(CreateCommand::new(FORFEIT_COMMAND).description("Give up your current game"));
    commands
}
