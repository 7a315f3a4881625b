//! Posting of renders nobody asked for.
//!
//! Turn timeouts and idle expiry happen inside the engine without an interaction to
//! answer. The coordinator pushes their renders over a channel; this relay posts each
//! one to the game's channel.

use dioxus_logger::tracing;
use engine::RenderRequest;
use serenity::{
    all::{ChannelId, CreateMessage},
    http::Http,
};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::{error::AppError, service::render};

pub struct NoticeService {
    http: Arc<Http>,
}

impl NoticeService {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Posts a render as a new message in the game's channel.
    ///
    /// # Returns
    /// - `Ok(())` - The message was sent
    /// - `Err(AppError::DiscordErr)` - Discord refused the message
    pub async fn post(&self, render: &RenderRequest) -> Result<(), AppError> {
        let message = CreateMessage::new()
            .embed(render::embed(render))
            .components(render::controls::action_rows(render));

        ChannelId::new(render.channel_id)
            .send_message(&self.http, message)
            .await?;

        tracing::debug!(
            "Posted notice for session {} to channel {}",
            render.session_id,
            render.channel_id
        );
        Ok(())
    }

    /// Posts every notice the engine emits until the engine shuts down.
    pub async fn relay(self, mut notices: mpsc::UnboundedReceiver<RenderRequest>) {
        while let Some(render) = notices.recv().await {
            if let Err(e) = self.post(&render).await {
                tracing::error!(
                    "Failed to post notice for session {}: {}",
                    render.session_id,
                    e
                );
            }
        }

        tracing::info!("Notice relay stopped");
    }
}
