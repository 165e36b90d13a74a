use ethiopack_config::Config;

/// Strategy for displaying configuration information.
///
/// Secrets are masked; everything else is printed as loaded, after
/// environment overrides.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== ethiopack Configuration ===\n");

        println!("Telegram:");
        println!("  Token: {}", mask_secret(&config.telegram.token));
        println!("  Admin ID: {}", config.telegram.admin_id);
        println!("  Users File: {}", config.telegram.users_file.display());
        println!();

        println!("AI Summarizer:");
        println!("  Enabled: {}", config.ai.enabled);
        println!(
            "  API Key: {}",
            mask_secret(&config.providers.openai.api_key)
        );
        println!("  Base URL: {}", config.providers.openai.base_url);
        println!("  Model: {}", config.providers.openai.model);
        println!("  Timeout: {}s", config.providers.openai.timeout_secs);
        println!(
            "  Retry Delays: {:?}s",
            config.providers.openai.retry_delays_secs
        );
        println!(
            "  Status: {}",
            if config.ai_available() {
                "Active"
            } else {
                "Inactive (pattern engine only)"
            }
        );
        println!();

        println!("Keep-alive Server:");
        println!("  Enabled: {}", config.server.enabled);
        println!("  Port: {}", config.server.port);
        println!();

        println!("Promo Link:");
        println!("  {} ({})", config.promo.label, config.promo.url);

        Ok(())
    }
}

/// Show the first and last four characters of long secrets only.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "(not set)".to_string(),
        n if n > 8 => {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[n - 4..].iter().collect();
            format!("{head}...{tail}")
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret("123456:ABCDEFGH"), "1234...EFGH");
    }
}
