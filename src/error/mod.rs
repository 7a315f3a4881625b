//! Error types for the bot process.
//!
//! `AppError` is the top-level error of startup and of the long-running tasks
//! (gateway client, notice relay, sweep scheduler). Errors raised while handling a
//! single interaction never reach it: the engine turns those into `EngineError`s
//! that are shown to the player who caused them.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Engine error that could not be answered in place, e.g. starting a game on
    /// behalf of a command whose reply already failed.
    #[error(transparent)]
    EngineErr(#[from] engine::EngineError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error from the idle session sweep.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
