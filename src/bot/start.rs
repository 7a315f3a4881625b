use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};
use std::sync::Arc;

use crate::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Builds the Discord client and hands out its HTTP client.
///
/// The client is not connected yet; pass it to `start_bot` to open the gateway.
///
/// # Arguments
/// - `config` - Configuration carrying the bot token
/// - `state` - Engine shared with the event handler
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client to start and its shareable HTTP client
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(config: &Config, state: AppState) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Connects to the gateway and processes events until the connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    client.start().await?;

    Ok(())
}
