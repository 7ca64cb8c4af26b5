//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{commentary, plan, reference};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "douay")]
#[command(author, version, about = "Reading plan and commentary lookup for the Douay-Rheims Bible")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "DOUAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the commentary TSV files
    #[arg(long, global = true, env = "DOUAY_COMMENTARY_DIR")]
    pub commentary_dir: Option<PathBuf>,

    /// File recording reading plan progress
    #[arg(long, global = true, env = "DOUAY_PROGRESS_FILE")]
    pub progress_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the books of the canon
    Books {
        /// Show only the deuterocanonical books
        #[arg(long)]
        deuterocanonical: bool,
    },

    /// Follow the one-year reading plan
    #[command(subcommand)]
    Plan(plan::PlanCommands),

    /// Resolve a passage such as "Genesis 1-3" to a book and chapter
    Resolve {
        /// Passage text; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        passage: Vec<String>,
    },

    /// Look up verse commentary
    #[command(subcommand)]
    Commentary(commentary::CommentaryCommands),
}

/// Paths resolved from flags, environment and config file
pub struct Settings {
    pub commentary_dir: PathBuf,
    pub progress_file: PathBuf,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            commentary_dir: cli
                .commentary_dir
                .clone()
                .unwrap_or_else(|| config.commentary_dir()),
            progress_file: cli
                .progress_file
                .clone()
                .unwrap_or_else(|| config.progress_file()),
        }
    }
}

/// Installs the stderr tracing subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "douay_reader=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);
    let settings = Settings::resolve(&cli, &config);

    output.verbose("Douay reader starting");
    output.verbose_ctx(
        "config",
        &format!(
            "commentary dir: {}, progress file: {}",
            settings.commentary_dir.display(),
            settings.progress_file.display()
        ),
    );

    match cli.command {
        Commands::Books { deuterocanonical } => reference::books(&output, deuterocanonical)?,

        Commands::Plan(cmd) => plan::run(cmd, &output, &settings)?,

        Commands::Resolve { passage } => {
            let passage = passage.join(" ");
            output.verbose_ctx("resolve", &format!("Resolving: {:?}", passage));
            reference::resolve(&output, &passage)?
        }

        Commands::Commentary(cmd) => commentary::run(cmd, &output, &settings)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
