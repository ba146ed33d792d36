//! todoctl CLI - Todo / TodoItem REST backend
//!
//! This is the main entry point for the todoctl command-line tool, which provides:
//! - The HTTP API server (`serve`)
//! - Schema bootstrap for PostgreSQL (`schema`)
//! - Configuration file management (`config`)
//! - Shell completions (`completions`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

use config::AppConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Todo lists with items over a REST API backed by PostgreSQL"
)]
struct Cli {
    /// Config file (default: ~/.todoctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::ServeArgs),
    /// Create the todo tables if they are missing
    Schema(commands::SchemaArgs),
    /// Manage todoctl configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the real environment
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let loaded = AppConfig::load(cli.config.as_deref());
    let tracing_config = TracingConfig {
        debug: cli.debug,
        level: loaded
            .as_ref()
            .map(|c| c.log.level.clone())
            .unwrap_or_else(|_| "info".to_string()),
    };
    tracing_setup::init(&tracing_config).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, loaded?).await?,
        Commands::Schema(args) => commands::run_schema(args, loaded?).await?,
        Commands::Config(args) => config::run_config(args, cli.config.as_deref())?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
