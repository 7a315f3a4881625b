use dioxus_logger::tracing;
use engine::{Phase, PlayerId};
use serenity::all::{ChannelId, Context, CreateMessage, Message};

use crate::{
    error::AppError,
    service::{
        game::{GameReply, GameService},
        render,
    },
    state::AppState,
};

/// Handle message creation in a channel or a direct message
///
/// Messages from players who are due to type a move are routed to their game;
/// everything else is ordinary chat and left alone.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let service = GameService::new(&state.router);
    let actor = PlayerId(message.author.id.get());

    let Some(reply) = service.reply(actor, &message.content).await else {
        return;
    };

    if let Err(e) = answer(&ctx, &message, reply).await {
        tracing::error!(
            "Failed to answer move from {} in channel {}: {}",
            actor,
            message.channel_id,
            e
        );
    }
}

async fn answer(ctx: &Context, message: &Message, reply: GameReply) -> Result<(), AppError> {
    let render = match reply {
        GameReply::Render(render) => render,
        GameReply::Notice(text) => {
            message.reply(ctx, text).await?;
            return Ok(());
        }
    };

    // Chat has no ephemeral replies, so private views go to the player's DMs.
    if let Some(embed) = render::private_embed(&render) {
        message
            .author
            .direct_message(ctx, CreateMessage::new().embed(embed))
            .await?;
    }

    // Placements only change what the placing player sees.
    if render.phase == Phase::Setup {
        return Ok(());
    }

    let public = CreateMessage::new()
        .embed(render::embed(&render))
        .components(render::controls::action_rows(&render));
    ChannelId::new(render.channel_id)
        .send_message(&ctx.http, public)
        .await?;

    Ok(())
}
