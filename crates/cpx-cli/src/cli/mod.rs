//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cpx_core::config;
use cpx_core::problem::Language;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cpx")]
#[command(version)]
#[command(about = "Terminal AI assistant for competitive programming")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate driver code for a problem page
    Generate {
        /// Target language (c++, python, javascript, java, c, go, rust)
        #[arg(short, long)]
        language: Language,

        /// Problem page file; reads stdin when omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Boilerplate file overriding the configured scaffold
        #[arg(short, long, value_name = "FILE")]
        boilerplate: Option<PathBuf>,

        /// Problem URL, used to sanity-check the judge site
        #[arg(long)]
        url: Option<String>,
    },

    /// Extract a submittable solution from driver code
    Extract {
        /// Language of the pasted code
        #[arg(short, long)]
        language: Language,

        /// Code file; reads stdin when omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Ask the mentor for a hint
    Mentor {
        /// The question
        question: String,

        /// Print raw Markdown instead of rendering for the terminal
        #[arg(long)]
        plain: bool,
    },

    /// Check connectivity and credentials with a tiny request
    Ping,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create the config file from the default template
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Logs go to stderr so command output stays pipeable. `CPX_LOG` follows
/// the usual env-filter syntax.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("CPX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    match cli.command {
        Commands::Generate {
            language,
            input,
            boilerplate,
            url,
        } => {
            commands::generate::run(
                &config,
                language,
                input.as_deref(),
                boilerplate.as_deref(),
                url.as_deref(),
            )
            .await
        }
        Commands::Extract { language, input } => {
            commands::extract::run(&config, language, input.as_deref()).await
        }
        Commands::Mentor { question, plain } => {
            commands::mentor::run(&config, &question, plain).await
        }
        Commands::Ping => commands::ping::run(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
        },
    }
}
