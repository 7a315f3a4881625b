//! Slash command and button handling.
//!
//! Accepted moves replace the game message in place. Refusals, and anything only
//! the acting player may see, go out as ephemeral replies.

use dioxus_logger::tracing;
use engine::{PlayerId, RenderRequest};
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Interaction,
};

use crate::{
    bot::command::{SlashCommand, OPPONENT_OPTION},
    error::AppError,
    service::{
        game::{GameReply, GameService},
        render,
    },
    state::AppState,
};

/// Handles an interaction, logging failures to answer it.
///
/// # Arguments
/// - `state` - Engine the interaction is routed to
/// - `ctx` - Discord context used to respond
/// - `interaction` - Slash command or component press; other kinds are ignored
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    let result = match interaction {
        Interaction::Command(command) => handle_command(state, &ctx, &command).await,
        Interaction::Component(component) => handle_component(state, &ctx, &component).await,
        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::error!("Failed to answer interaction: {}", e);
    }
}

async fn handle_command(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(slash) = SlashCommand::from_name(&command.data.name) else {
        tracing::debug!("Ignoring unknown command /{}", command.data.name);
        return Ok(());
    };

    let service = GameService::new(&state.router);
    let actor = PlayerId(command.user.id.get());

    let reply = match slash {
        SlashCommand::Forfeit => service.forfeit(actor).await,
        SlashCommand::Challenge(game_type) => {
            let opponent = command
                .data
                .options
                .iter()
                .find(|option| option.name == OPPONENT_OPTION)
                .and_then(|option| option.value.as_user_id());

            let Some(opponent) = opponent else {
                return notify(ctx, command, "Pick an opponent to challenge.").await;
            };
            let opponent_is_bot = command
                .data
                .resolved
                .users
                .get(&opponent)
                .is_some_and(|user| user.bot);
            if opponent_is_bot {
                return notify(ctx, command, "Bots do not play games.").await;
            }

            service
                .challenge(
                    game_type,
                    actor,
                    PlayerId(opponent.get()),
                    command.channel_id.get(),
                )
                .await
        }
    };

    match reply {
        GameReply::Render(render) => {
            let mut message = CreateInteractionResponseMessage::new()
                .embed(render::embed(&render))
                .components(render::controls::action_rows(&render));
            if let (SlashCommand::Challenge(_), Some(opponent)) = (slash, render.participants.get(1)) {
                message = message.content(format!("<@{}>", opponent));
            }
            command
                .create_response(&ctx.http, CreateInteractionResponse::Message(message))
                .await?;
        }
        GameReply::Notice(text) => notify(ctx, command, &text).await?,
    }

    Ok(())
}

async fn handle_component(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let service = GameService::new(&state.router);
    let actor = PlayerId(component.user.id.get());

    match service.click(actor, &component.data.custom_id).await {
        GameReply::Render(render) => {
            let message = CreateInteractionResponseMessage::new()
                .embed(render::embed(&render))
                .components(render::controls::action_rows(&render));
            component
                .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(message))
                .await?;
            send_private_view(ctx, component, &render).await?;
        }
        GameReply::Notice(text) => {
            let message = CreateInteractionResponseMessage::new()
                .content(text)
                .ephemeral(true);
            component
                .create_response(&ctx.http, CreateInteractionResponse::Message(message))
                .await?;
        }
    }

    Ok(())
}

/// Follows up with what only the acting player may see, when there is any.
async fn send_private_view(
    ctx: &Context,
    component: &ComponentInteraction,
    render: &RenderRequest,
) -> Result<(), AppError> {
    let Some(embed) = render::private_embed(render) else {
        return Ok(());
    };

    let followup = CreateInteractionResponseFollowup::new()
        .embed(embed)
        .ephemeral(true);
    component.create_followup(&ctx.http, followup).await?;

    Ok(())
}

async fn notify(ctx: &Context, command: &CommandInteraction, text: &str) -> Result<(), AppError> {
    let message = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}
