//! ccee-decks CLI
//!
//! Searches the CCEE archive and downloads Newave/Decomp price decks.
//! Needs a WebDriver endpoint (e.g. `chromedriver --port=9515`) for anything
//! that touches the archive.

use std::path::PathBuf;

use ccee_decks::{
    error::{AppError, Result},
    models::{Config, DownloadRequest, PeriodSpec},
    pipeline,
};
use clap::{Args, Parser, Subcommand};

/// ccee-decks - CCEE archive deck downloader
#[derive(Parser, Debug)]
#[command(
    name = "ccee-decks",
    version,
    about = "Download Newave/Decomp price decks from the CCEE archive"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// WebDriver endpoint, overrides archive.webdriver_url
    #[arg(long, global = true)]
    webdriver: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the files of a deck
    Download {
        /// Deck key, e.g. DeckDecomp or decomp (see `decks`)
        deck: String,

        #[command(flatten)]
        period: PeriodArgs,

        /// Destination folder (default: download.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search the archive and list every result
    Search {
        /// Text typed into the archive's search box
        query: String,

        #[command(flatten)]
        period: PeriodArgs,

        /// Save the results as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List built-in and configured decks
    Decks,

    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct PeriodArgs {
    /// Reference month, MM/YYYY (searches 40 days either side)
    #[arg(long)]
    month: Option<String>,

    /// Publication window, DD/MM/YYYY,DD/MM/YYYY
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    range: Option<Vec<String>>,
}

impl PeriodArgs {
    fn into_spec(self) -> Result<PeriodSpec> {
        match (self.month, self.range) {
            (Some(month), None) => Ok(PeriodSpec::Month(month)),
            (None, Some(range)) => Ok(PeriodSpec::Dates(range)),
            _ => Err(AppError::period("use either --month or --range")),
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    init_logging(cli.verbose, &config.logging.level);

    if cli.config.exists() {
        log::info!("Loaded configuration from {}", cli.config.display());
    } else {
        log::info!(
            "No configuration at {}, using defaults",
            cli.config.display()
        );
    }
    if let Some(url) = cli.webdriver {
        config.archive.webdriver_url = url;
    }

    match cli.command {
        Command::Download {
            deck,
            period,
            output,
        } => {
            config.validate()?;
            let request = DownloadRequest::new(period.into_spec()?, config.resolve_deck(&deck)?);
            let destination =
                output.unwrap_or_else(|| PathBuf::from(&config.download.output_dir));

            let outcome = pipeline::run_download(&config, &request, &destination).await?;
            for path in &outcome.files {
                log::info!("Saved {}", path.display());
            }
        }

        Command::Search {
            query,
            period,
            output,
        } => {
            config.validate()?;
            let period = period.into_spec()?;
            let results =
                pipeline::run_search(&config, &query, &period, output.as_deref()).await?;
            log::info!("{} result(s)", results.len());
        }

        Command::Decks => {
            for deck in config.all_decks() {
                println!("{}", deck.key);
                println!("    search: {}", deck.search_text);
                println!("    name:   {}", deck.match_name.as_deref().unwrap_or("-"));
                println!("    info:   {}", deck.match_info.as_deref().unwrap_or("-"));
            }
        }

        Command::Validate => pipeline::run_validate(&config)?,
    }

    Ok(())
}
