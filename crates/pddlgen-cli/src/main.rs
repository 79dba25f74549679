mod config;
mod generate_cmd;
#[cfg(test)]
mod test_util;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use pddlgen_core::{GeminiClient, GeminiOptions, ProjectGenerator};

use config::ResolvedConfig;

#[derive(Parser)]
#[command(name = "pddlgen", version, about = "Classical planning project generator")]
struct Cli {
    /// Model identifier (overrides PDDLGEN_MODEL env var and config file)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 120)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate the project once and write all four artifacts to disk
    Generate {
        /// Output directory for the artifacts
        #[arg(long, default_value = "pddl-project")]
        out: PathBuf,
    },
    /// Launch the interactive studio (tabbed artifact viewer)
    Studio {
        /// Output directory for artifacts saved from the studio
        #[arg(long, default_value = "pddl-project")]
        out: PathBuf,
    },
}

/// Execute the `pddlgen init` command: write the starter config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::write_starter_config(force)?;

    println!("Config written to {}", path.display());
    println!();
    println!("Next: export GEMINI_API_KEY (or set gemini.api_key in the config file),");
    println!("then run `pddlgen studio` or `pddlgen generate`.");

    Ok(())
}

/// Build the generation adapter from resolved configuration.
///
/// A missing API key does NOT fail here: the adapter reports it through
/// the normal error path on the first generate call, so the studio can
/// render it like any other generation failure.
fn build_generator(cli: &Cli) -> anyhow::Result<Arc<dyn ProjectGenerator>> {
    let resolved = ResolvedConfig::resolve(cli.model.as_deref());
    let client = GeminiClient::new(GeminiOptions {
        api_key: resolved.api_key,
        model: resolved.model,
        timeout: Duration::from_secs(cli.timeout_secs),
    })?;
    Ok(Arc::new(client))
}

/// Log to stderr for headless commands.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Log to a file for the studio so diagnostics never write over the
/// alternate screen. The returned guard must stay alive for the run.
fn init_studio_logging() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pddlgen");
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, "studio.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { force } => {
            init_stderr_logging();
            cmd_init(*force)?;
        }
        Commands::Generate { out } => {
            init_stderr_logging();
            let generator = build_generator(&cli)?;
            generate_cmd::run(generator, out).await?;
        }
        Commands::Studio { out } => {
            let _guard = init_studio_logging()?;
            let generator = build_generator(&cli)?;
            tui::run_studio(generator, out.clone()).await?;
        }
    }

    Ok(())
}
