//! Discord presentation of engine renders.
//!
//! The engine describes a session as typed board views and a prompt; this module is
//! the only place that turns them into embeds, emoji and buttons.

pub mod board;
pub mod controls;

use engine::{
    game::Outcome,
    render::{BoardView, Prompt},
    GameFamily, Phase, RenderRequest,
};
use serenity::all::{CreateEmbed, CreateEmbedFooter};

use self::board::mention;

/// Color of games still being played.
const LIVE_COLOR: u32 = 0x3498db;
/// Color of games that ran to completion.
const FINISHED_COLOR: u32 = 0x2ecc71;
/// Color of games that were abandoned, forfeited or expired.
const CANCELLED_COLOR: u32 = 0x95a5a6;

/// Builds the public embed of a session.
///
/// # Arguments
/// - `render` - Render returned by the engine
///
/// # Returns
/// - `CreateEmbed` - Title, prompt, boards and last move of the game
pub fn embed(render: &RenderRequest) -> CreateEmbed {
    let mut description = prompt_text(render);
    if let Some(hint) = controls::typing_hint(render) {
        description = format!("{}\n{}", description, hint);
    }

    let mut embed = CreateEmbed::new()
        .title(render.game_type.display_name())
        .description(description)
        .color(color(render));

    for view in &render.board_views {
        for (name, value) in board::fields(render.game_type, view) {
            embed = embed.field(name, value, false);
        }
    }

    if let Some(effect) = &render.last_effect {
        embed = embed.field("Last move", board::effect(effect), false);
    }

    embed.footer(CreateEmbedFooter::new(format!("Game #{}", render.session_id)))
}

/// Builds the embed only the viewer may see, e.g. their own fleet.
///
/// # Returns
/// - `Some(CreateEmbed)` - The render carries a private view
/// - `None` - Nothing private to show
pub fn private_embed(render: &RenderRequest) -> Option<CreateEmbed> {
    let (_, view) = render.private_view.as_ref()?;
    let title = match view {
        BoardView::Grid { .. } if render.game_type.family() == GameFamily::Battleship => {
            "Your fleet"
        }
        _ => "Only you can see this",
    };

    let mut embed = CreateEmbed::new().title(title).color(LIVE_COLOR);
    for (name, value) in board::fields(render.game_type, view) {
        embed = embed.field(name, value, false);
    }
    Some(embed)
}

fn color(render: &RenderRequest) -> u32 {
    match render.prompt {
        _ if render.phase != Phase::Ended => LIVE_COLOR,
        Prompt::Finished(_) => FINISHED_COLOR,
        _ => CANCELLED_COLOR,
    }
}

/// What the players are asked to do, or how the game ended.
pub fn prompt_text(render: &RenderRequest) -> String {
    match &render.prompt {
        Prompt::AwaitingSetup { pending } if render.game_type.family() == GameFamily::Battleship => {
            let waiting: Vec<String> = pending.iter().map(|player| mention(*player)).collect();
            format!("Waiting for {} to place their ships.", waiting.join(" and "))
        }
        Prompt::AwaitingSetup { pending } => {
            let challenger = render.participants.first().copied();
            let challenged: Vec<String> = pending.iter().map(|player| mention(*player)).collect();
            match challenger {
                Some(challenger) => format!(
                    "{} challenged {} to a game of {}!",
                    mention(challenger),
                    challenged.join(" and "),
                    render.game_type.display_name()
                ),
                None => "Waiting for players to accept.".to_string(),
            }
        }
        Prompt::Turn { player, deadline } => {
            let mut text = format!("It's {}'s turn.", mention(*player));
            if let Some(deadline) = deadline {
                text.push_str(&format!(" Time runs out <t:{}:R>.", deadline.timestamp()));
            }
            text
        }
        Prompt::Finished(Outcome::Winner(winner)) => format!("🏆 {} wins!", mention(*winner)),
        Prompt::Finished(Outcome::Draw) => "The game ended in a draw.".to_string(),
        Prompt::Abandoned { by } => {
            format!("{} ran out of time. The game was abandoned.", mention(*by))
        }
        Prompt::Forfeited { by } => format!("{} forfeited the game.", mention(*by)),
        Prompt::Expired => "This game expired after sitting idle.".to_string(),
    }
}
