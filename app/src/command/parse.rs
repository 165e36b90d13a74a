use super::build_pipeline;
use ethiopack_config::Config;
use tokio::io::AsyncReadExt;

/// Input for the one-shot parse command.
pub struct ParseInput {
    /// Message text; stdin is read when absent
    pub message: Option<String>,
    /// Try the AI summarizer first
    pub ai: bool,
}

/// Strategy for summarizing a single message from the command line.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        let message = if let Some(message) = input.message {
            message
        } else {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        };

        if message.trim().is_empty() {
            anyhow::bail!("No message given. Pass -m \"...\" or pipe the SMS on stdin");
        }

        let pipeline = build_pipeline(&config, input.ai);
        println!("{}", pipeline.summarize(&message).await);

        Ok(())
    }
}
