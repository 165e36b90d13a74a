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

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod command;
mod server;

use command::{
    CommandStrategy, InfoStrategy, InitStrategy, ParseInput, ParseStrategy, TelegramInput,
    TelegramStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "ethiopack")]
#[command(about = "Ethio Telecom package SMS shortener", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot and keep-alive HTTP endpoint
    Telegram {
        /// Bot token (overrides config and TELEGRAM_BOT_TOKEN)
        #[arg(short = 't', long)]
        token: Option<String>,
    },
    /// Summarize one balance message and print the result
    Parse {
        /// Message text; read from stdin when omitted
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Try the AI summarizer before the pattern engine
        #[arg(long)]
        ai: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Telegram { token } => TelegramStrategy.execute(TelegramInput { token }).await,
        Commands::Parse { message, ai } => ParseStrategy.execute(ParseInput { message, ai }).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
