//! Remote LLM summarization, tried before the extraction engine.

use async_trait::async_trait;
use tracing::info;

use crate::balance::Formatter;
use crate::{ChatMessage, LLMProvider, Summarizer};

const SYSTEM_PROMPT: &str = "You are an assistant that summarizes Ethio Telecom SMS into a short structured report with key data (original minutes, remaining minutes, GB, SMS, etc.).";

/// [`Summarizer`] backed by any chat-completion provider.
pub struct AiSummarizer<P: LLMProvider> {
    provider: P,
    model: String,
    formatter: Formatter,
}

impl<P: LLMProvider> AiSummarizer<P> {
    pub fn new(provider: P, formatter: Formatter) -> Self {
        let model = provider.get_default_model().to_string();
        Self {
            provider,
            model,
            formatter,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn prompt(message: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Summarize clearly and neatly for Telegram:\n\n{message}"
            )),
        ]
    }
}

#[async_trait]
impl<P: LLMProvider> Summarizer for AiSummarizer<P> {
    async fn summarize(&self, message: &str) -> anyhow::Result<String> {
        let response = self
            .provider
            .chat(&Self::prompt(message), &self.model)
            .await?;

        let summary = response.content.trim();
        if summary.is_empty() {
            anyhow::bail!("empty AI response");
        }

        if let Some(usage) = &response.usage {
            info!(
                "AI summary used {} tokens ({} prompt, {} completion)",
                usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(format!(
            "🧠 <b>Summary</b>\n{summary}\n\n{}",
            self.formatter.footer()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LLMResponse, Role};
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: String,
        seen: Mutex<Vec<(Vec<ChatMessage>, String)>>,
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((messages.to_vec(), model.to_string()));
            }
            Ok(LLMResponse {
                content: self.reply.clone(),
                usage: None,
            })
        }

        fn get_default_model(&self) -> &'static str {
            "scripted"
        }
    }

    fn provider(reply: &str) -> ScriptedProvider {
        ScriptedProvider {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn wraps_reply_with_header_and_footer() {
        let summarizer = AiSummarizer::new(provider("440 min left"), Formatter::default());
        let text = summarizer.summarize("sms").await.unwrap();

        assert!(text.starts_with("🧠 <b>Summary</b>\n440 min left\n\n👉"));
    }

    #[tokio::test]
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn sends_system_and_user_prompt_with_model() {
        let summarizer =
            AiSummarizer::new(provider("ok"), Formatter::default()).with_model("gpt-4o-mini");
        summarizer.summarize("is 90 minute").await.unwrap();

        let seen = summarizer.provider.seen.lock().unwrap();
        let (messages, model) = &seen[0];
        assert_eq!(model, "gpt-4o-mini");
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].content.ends_with("is 90 minute"));
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let summarizer = AiSummarizer::new(provider("   "), Formatter::default());
        assert!(summarizer.summarize("sms").await.is_err());
    }
}
