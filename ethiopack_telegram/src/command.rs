use teloxide::types::{BotCommand, UserId};
use teloxide::utils::html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Stats,
}

impl Command {
    fn all() -> Vec<BotCommand> {
        vec![
            BotCommand {
                command: "start".to_string(),
                description: "Start the bot".to_string(),
            },
            BotCommand {
                command: "help".to_string(),
                description: "Show what to send".to_string(),
            },
            BotCommand {
                command: "stats".to_string(),
                description: "User statistics (owner only)".to_string(),
            },
        ]
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::all()
    }

    /// Parse a command, accepting a `@bot_name` suffix and trailing arguments.
    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?.to_lowercase();
        let name = first.split('@').next().unwrap_or(&first);

        match name {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/stats" => Some(Self::Stats),
            _ => None,
        }
    }

    #[must_use]
    pub fn welcome_text(name: &str) -> String {
        format!(
            "👋 Hi {}! Welcome to Ethio Tele Package Shortener Bot.\n\
             Send your Ethio Telecom package SMS and I’ll summarize it neatly. ⚡",
            html::escape(name)
        )
    }

    #[must_use]
    pub const fn owner_only_text() -> &'static str {
        "⚠️ Sorry, this command is only for the bot owner."
    }

    #[must_use]
    pub fn stats_text(users: &[(u64, String)]) -> String {
        let mut text = format!(
            "📊 Total unique users: {}\n\n👥 User list (click to chat):\n",
            users.len()
        );
        for (id, name) in users {
            text.push_str("- ");
            text.push_str(&html::user_mention(UserId(*id), name));
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_mentions_and_arguments() {
        assert_eq!(Command::parse_from_text("/start"), Some(Command::Start));
        assert_eq!(Command::parse_from_text("/START@ethio_bot"), Some(Command::Start));
        assert_eq!(Command::parse_from_text("  /stats now"), Some(Command::Stats));
        assert_eq!(Command::parse_from_text("/help"), Some(Command::Help));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse_from_text("your remaining balance"), None);
        assert_eq!(Command::parse_from_text("/unknown"), None);
        assert_eq!(Command::parse_from_text(""), None);
    }

    #[test]
    fn stats_lists_users_as_links() {
        let text = Command::stats_text(&[(1, "A<b>".to_string()), (2, "Sara".to_string())]);
        assert!(text.starts_with("📊 Total unique users: 2"));
        assert!(text.contains("A&lt;b&gt;</a>\n"));
        assert!(!text.contains("A<b>"));
        assert!(text.contains("tg://user"));
        assert!(text.contains("id=1"));
        assert!(text.contains("id=2"));
    }

    #[test]
    fn welcome_escapes_name() {
        assert!(Command::welcome_text("<Abebe>").contains("Hi &lt;Abebe&gt;!"));
    }

    #[test]
    fn menu_has_every_command() {
        let names: Vec<_> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command)
            .collect();
        assert_eq!(names, ["start", "help", "stats"]);
    }
}
