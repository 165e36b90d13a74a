//! AI-first summarization with the extraction engine as fallback.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::Summarizer;
use crate::balance::{Formatter, summarize_text};

/// Produces the reply for one incoming balance message.
#[derive(Clone, Default)]
pub struct SummaryPipeline {
    summarizer: Option<Arc<dyn Summarizer>>,
    formatter: Formatter,
}

impl SummaryPipeline {
    #[must_use]
    pub const fn new(formatter: Formatter) -> Self {
        Self {
            summarizer: None,
            formatter,
        }
    }

    #[must_use]
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    #[must_use]
    pub const fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    #[must_use]
    pub const fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Try the remote summarizer, then the engine.
    pub async fn summarize(&self, text: &str) -> String {
        if let Some(summarizer) = &self.summarizer {
            match summarizer.summarize(text).await {
                Ok(summary) => return summary,
                Err(e) => warn!("AI summarization failed, falling back to patterns: {e}"),
            }
        }

        debug!("Summarizing with extraction engine");
        self.fallback(text)
    }

    /// The deterministic engine alone.
    #[must_use]
    pub fn fallback(&self, text: &str) -> String {
        summarize_text(text, &self.formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl Summarizer for Fixed {
        async fn summarize(&self, _message: &str) -> anyhow::Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("missing OPENAI_API_KEY"))
        }
    }

    const SAMPLE: &str =
        "your remaining Monthly voice 440 Min,1.1GB and 105 from telebirr SMS is 90 minute";

    #[tokio::test]
    async fn uses_summarizer_when_it_succeeds() {
        let pipeline = SummaryPipeline::default().with_summarizer(Arc::new(Fixed(Some("ai"))));
        assert_eq!(pipeline.summarize(SAMPLE).await, "ai");
    }

    #[tokio::test]
    async fn falls_back_to_engine_on_failure() {
        let pipeline = SummaryPipeline::default().with_summarizer(Arc::new(Fixed(None)));
        let reply = pipeline.summarize(SAMPLE).await;

        assert_eq!(reply, pipeline.fallback(SAMPLE));
        assert!(reply.contains("Minutes: 440"));
    }

    #[tokio::test]
    async fn engine_is_primary_without_summarizer() {
        let pipeline = SummaryPipeline::new(Formatter::default());
        assert!(!pipeline.has_summarizer());

        let reply = pipeline.summarize("good morning").await;
        assert_eq!(reply, pipeline.formatter().guidance());
    }
}
