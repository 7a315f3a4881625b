mod bot;
mod config;
mod error;
mod scheduler;
mod service;
mod startup;
mod state;

use dioxus_logger::tracing;

use crate::{
    bot::start::{init_bot, start_bot},
    config::Config,
    error::AppError,
    scheduler::session_sweep,
    service::notice::NoticeService,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    if let Err(e) = dioxus_logger::init(config.log_level) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let (state, notices) = startup::build_engine(&config);

    tracing::info!("Starting arcade bot");

    let (bot_client, discord_http) = init_bot(&config, state.clone()).await?;

    // Relay timeout and expiry notices for the lifetime of the process
    tokio::spawn(NoticeService::new(discord_http).relay(notices));

    session_sweep::start_scheduler(
        state.coordinator().clone(),
        &config.sweep_schedule,
        config.session_max_idle,
    )
    .await?;

    start_bot(bot_client).await
}
