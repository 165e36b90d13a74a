use super::build_pipeline;
use crate::command::CommandStrategy;
use crate::server;
use ethiopack_config::Config;
use ethiopack_core::UserStore;
use ethiopack_telegram::TelegramBot;
use ethiopack_users::JsonUserStore;
use std::sync::Arc;
use tracing::{error, info};

/// Input for Telegram bot command.
pub struct TelegramInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
}

/// Strategy for running Telegram bot.
pub struct TelegramStrategy;

impl CommandStrategy for TelegramStrategy {
    type Input = TelegramInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        let token = input
            .token
            .unwrap_or_else(|| config.telegram.token.clone());
        if token.trim().is_empty() {
            anyhow::bail!("❌ TELEGRAM_BOT_TOKEN is missing. Set it in the environment or config");
        }

        info!("Starting Telegram bot...");

        let users: Arc<dyn UserStore> =
            Arc::new(JsonUserStore::open(&config.telegram.users_file).await?);
        info!("Known users: {}", users.count().await?);

        let pipeline = build_pipeline(&config, true);

        if config.server.enabled {
            let port = config.server.port;
            tokio::spawn(async move {
                if let Err(e) = server::serve(port).await {
                    error!("Keep-alive server error: {e}");
                }
            });
        }

        let bot = TelegramBot::new(token, pipeline, users, config.telegram.admin_id)?;

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
