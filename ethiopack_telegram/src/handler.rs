use crate::{Command, Error, Result, TelegramBot};
use teloxide::{requests::Requester, types::Message};
use tracing::{debug, info, warn};

/// Handle bot commands
pub async fn handle_command(bot: TelegramBot, msg: Message, cmd: Command) -> Result<()> {
    let user = msg.from.as_ref();
    let username = user
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    match cmd {
        Command::Start => {
            info!("[@{username}] Command: /start");
            let name = user.map_or("there", |u| u.first_name.as_str());
            bot.send_html(msg.chat.id, Command::welcome_text(name))
                .await?;
        }
        Command::Help => {
            info!("[@{username}] Command: /help");
            bot.send_html(msg.chat.id, bot.pipeline.formatter().guidance())
                .await?;
        }
        Command::Stats => {
            info!("[@{username}] Command: /stats");
            if user.is_some_and(|u| bot.is_admin(u.id.0)) {
                let users = bot.users().users().await.map_err(Error::Users)?;
                bot.send_html(msg.chat.id, Command::stats_text(&users))
                    .await?;
            } else {
                bot.bot
                    .send_message(msg.chat.id, Command::owner_only_text())
                    .await?;
            }
        }
    }

    Ok(())
}

/// Handle any message (commands or regular text)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!("Ignoring message without text in chat {}", msg.chat.id);
        return Ok(());
    };

    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    if let Some(user) = &msg.from {
        if let Err(e) = bot.users().record(user.id.0, &user.first_name).await {
            warn!("Failed to record user {}: {e}", user.id);
        }
    }

    if let Some(cmd) = Command::parse_from_text(text) {
        return handle_command(bot, msg.clone(), cmd).await;
    }

    info!("[@{username}] Message: {text}");

    bot.bot
        .send_chat_action(msg.chat.id, teloxide::types::ChatAction::Typing)
        .await?;

    let response = bot.pipeline.summarize(text).await;

    info!("[@{username}] Response: {response}");

    bot.send_html(msg.chat.id, response).await
}
