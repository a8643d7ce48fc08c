//! modelrank CLI — grades claims about a model catalog.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "modelrank",
    version,
    about = "Grade claims about when models in a catalog were created"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a claim against the model catalog
    Grade {
        /// Claim text
        #[arg(long, required_unless_present = "input_file", conflicts_with = "input_file")]
        input: Option<String>,

        /// Read the claim text from a file
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Catalog source name from the config (default: config's default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// API key, overriding the configured one
        #[arg(long, env = "MODELRANK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Grade against a local JSON catalog instead of a provider
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that a claim parses and show the extracted assertions
    Parse {
        /// Claim text
        #[arg(long)]
        input: String,
    },

    /// List the catalog newest first
    ListModels {
        /// Only show models created before this date (e.g. "1 January 2024")
        #[arg(long)]
        before: Option<String>,

        /// Catalog source name from the config
        #[arg(long)]
        provider: Option<String>,

        /// API key, overriding the configured one
        #[arg(long, env = "MODELRANK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Read a local JSON catalog instead of a provider
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modelrank=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            input,
            input_file,
            provider,
            api_key,
            catalog,
            format,
            config,
        } => {
            let source = commands::SourceArgs {
                provider,
                api_key,
                catalog,
                config,
            };
            commands::grade::execute(input, input_file, source, format).await
        }
        Commands::Parse { input } => commands::parse::execute(&input),
        Commands::ListModels {
            before,
            provider,
            api_key,
            catalog,
            config,
        } => {
            let source = commands::SourceArgs {
                provider,
                api_key,
                catalog,
                config,
            };
            commands::list_models::execute(before, source).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
