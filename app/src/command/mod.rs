//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use ethiopack_config::Config;
use ethiopack_core::{AiSummarizer, Formatter, SummaryPipeline};
use ethiopack_providers::{OpenAiProvider, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod info;
mod init;
mod parse;
mod telegram;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use parse::{ParseInput, ParseStrategy};
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;

/// Build the summary pipeline, attaching the AI summarizer when requested
/// and configured.
fn build_pipeline(config: &Config, use_ai: bool) -> SummaryPipeline {
    let formatter = Formatter::new(config.promo.url.clone(), config.promo.label.clone());
    let pipeline = SummaryPipeline::new(formatter.clone());

    if !use_ai || !config.ai_available() {
        info!("AI summarizer disabled, using pattern engine only");
        return pipeline;
    }

    let openai = &config.providers.openai;
    info!("AI summarizer enabled: model={}", openai.model);

    let provider = OpenAiProvider::new(openai.api_key.clone())
        .with_base_url(openai.base_url.clone())
        .with_model(openai.model.clone())
        .with_timeout(Duration::from_secs(openai.timeout_secs))
        .with_retry(RetryPolicy::from_secs(&openai.retry_delays_secs));

    pipeline.with_summarizer(Arc::new(AiSummarizer::new(provider, formatter)))
}

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn pipeline_without_key_has_no_summarizer() {
        let config = Config::from_json("{}").unwrap();
        assert!(!build_pipeline(&config, true).has_summarizer());
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn pipeline_with_key_uses_ai_only_when_asked() {
        let config =
            Config::from_json(r#"{ "providers": { "openai": { "api_key": "k" } } }"#).unwrap();
        assert!(build_pipeline(&config, true).has_summarizer());
        assert!(!build_pipeline(&config, false).has_summarizer());
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn pipeline_uses_configured_promo() {
        let config = Config::from_json(r#"{ "promo": { "url": "https://example.org" } }"#).unwrap();
        let pipeline = build_pipeline(&config, false);
        assert!(pipeline.formatter().footer().contains("https://example.org"));
    }
}
