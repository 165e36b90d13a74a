use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub promo: PromoConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    /// Only this user may run `/stats`.
    #[serde(default = "TelegramConfig::default_admin_id")]
    pub admin_id: u64,
    #[serde(default = "TelegramConfig::default_users_file")]
    pub users_file: PathBuf,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            admin_id: Self::default_admin_id(),
            users_file: Self::default_users_file(),
        }
    }
}

impl TelegramConfig {
    const fn default_admin_id() -> u64 {
        413_906_777
    }

    fn default_users_file() -> PathBuf {
        PathBuf::from("users.json")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "OpenAiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "OpenAiConfig::default_model")]
    pub model: String,
    #[serde(default = "OpenAiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seconds to wait before each retry of a failed request.
    #[serde(default = "OpenAiConfig::default_retry_delays_secs")]
    pub retry_delays_secs: Vec<u64>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            timeout_secs: Self::default_timeout_secs(),
            retry_delays_secs: Self::default_retry_delays_secs(),
        }
    }
}

impl OpenAiConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    fn default_retry_delays_secs() -> Vec<u64> {
        vec![1, 2]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    const fn default_port() -> u16 {
        8080
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromoConfig {
    #[serde(default = "PromoConfig::default_url")]
    pub url: String,
    #[serde(default = "PromoConfig::default_label")]
    pub label: String,
}

impl Default for PromoConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            label: Self::default_label(),
        }
    }
}

impl PromoConfig {
    fn default_url() -> String {
        "https://t.me/Hossiy_DevDiary".to_string()
    }

    fn default_label() -> String {
        "Join our channel for more powerful resources".to_string()
    }
}

const fn default_true() -> bool {
    true
}

/// Variables from a local `.env` file. The process environment takes
/// precedence over them; a missing file yields nothing.
fn dotenv_vars(path: &Path) -> HashMap<String, String> {
    let Ok(iter) = dotenvy::from_path_iter(path) else {
        return HashMap::new();
    };

    let vars: HashMap<String, String> = iter
        .filter_map(|item| {
            item.map_err(|e| warn!("Skipping malformed line in {}: {e}", path.display()))
                .ok()
        })
        .collect();

    if !vars.is_empty() {
        info!("Loaded {} variables from {}", vars.len(), path.display());
    }
    vars
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("ethiopack"))
    }

    /// Load `~/ethiopack/config.json` if present, then apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)?
        } else {
            info!(
                "No config file at {}, using defaults and environment",
                config_path.display()
            );
            Self::default()
        };

        let dotenv = dotenv_vars(Path::new(".env"));
        config.apply_env(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()));
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Override fields from `TELEGRAM_BOT_TOKEN`, `OPENAI_API_KEY`, `PORT`,
    /// `ETHIOPACK_ADMIN_ID` and `ETHIOPACK_USERS_FILE`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = token;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.providers.openai.api_key = key;
        }
        if let Some(path) = lookup("ETHIOPACK_USERS_FILE") {
            self.telegram.users_file = PathBuf::from(path);
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Ignoring invalid PORT {port:?}: {e}"),
            }
        }
        if let Some(id) = lookup("ETHIOPACK_ADMIN_ID") {
            match id.trim().parse() {
                Ok(id) => self.telegram.admin_id = id,
                Err(e) => warn!("Ignoring invalid ETHIOPACK_ADMIN_ID {id:?}: {e}"),
            }
        }
    }

    /// The AI summarizer is used only when enabled and a key is configured.
    #[must_use]
    pub fn ai_available(&self) -> bool {
        self.ai.enabled && !self.providers.openai.api_key.trim().is_empty()
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "admin_id": 413906777,
    "users_file": "users.json"
  },
  "providers": {
    "openai": {
      "api_key": "",
      "base_url": "https://api.openai.com/v1",
      "model": "gpt-4o-mini",
      "timeout_secs": 30,
      "retry_delays_secs": [1, 2]
    }
  },
  "ai": {
    "enabled": true
  },
  "server": {
    "enabled": true,
    "port": 8080
  },
  "promo": {
    "url": "https://t.me/Hossiy_DevDiary",
    "label": "Join our channel for more powerful resources"
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set telegram.token (or export TELEGRAM_BOT_TOKEN)");
        println!("   2. Optionally set providers.openai.api_key for AI summaries");
        println!("   3. Run 'ethiopack telegram' to start the bot");
        println!();
        println!("🔧 Environment overrides:");
        println!("   TELEGRAM_BOT_TOKEN, OPENAI_API_KEY, PORT, ETHIOPACK_ADMIN_ID, ETHIOPACK_USERS_FILE");
        println!();
        Ok(())
    }
}
