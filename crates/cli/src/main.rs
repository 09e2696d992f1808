//! OneMinute CLI entry point.
//!
//! Commands:
//! - `explain`: Explain a topic for an audience level
//! - `onboard`: Write a default config file
//! - `doctor`: Diagnose configuration and connectivity
//! - `config`: Validate, show, or locate the config file

use clap::{Parser, Subcommand};
use oneminute_core::AudienceLevel;

mod commands;

#[derive(Parser)]
#[command(
    name = "oneminute",
    about = "OneMinute — explain any topic in about a minute of reading",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a topic
    Explain {
        /// The topic to explain (multiple words are joined)
        #[arg(required = true)]
        topic: Vec<String>,

        /// Audience level: beginner, intermediate, or advanced
        #[arg(short, long, default_value = "beginner")]
        level: AudienceLevel,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Skip takeaways and the real-world example
        #[arg(long)]
        no_insights: bool,
    },

    /// Initialize configuration
    Onboard,

    /// Diagnose configuration and connectivity
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate the config file
    Validate,
    /// Print the effective configuration (API key redacted)
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Explain {
            topic,
            level,
            json,
            no_insights,
        } => {
            let options = commands::explain::ExplainOptions {
                level,
                json,
                insights: !no_insights,
            };
            commands::explain::run(&topic.join(" "), options).await?
        }
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
