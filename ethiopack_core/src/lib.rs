#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod ai;
pub mod balance;
pub mod pipeline;

pub use ai::AiSummarizer;
pub use balance::{
    BalanceRecord, DataAmount, DataUnit, Field, Formatter, Outcome, classify, extract,
    extract_package, extract_remaining, summarize_text,
};
pub use pipeline::SummaryPipeline;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse>;
    fn get_default_model(&self) -> &str;
}

/// A remote summarizer tried before the extraction engine.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, message: &str) -> anyhow::Result<String>;
}

/// Registry of users who have talked to the bot.
///
/// Lives outside the engine; the bot receives one as an injected dependency.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Record a user, returning `true` if they were not known before.
    async fn record(&self, id: u64, name: &str) -> anyhow::Result<bool>;
    async fn users(&self) -> anyhow::Result<Vec<(u64, String)>>;
    async fn count(&self) -> anyhow::Result<usize>;
}
