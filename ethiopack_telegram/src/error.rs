use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("User store error: {0}")]
    Users(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
