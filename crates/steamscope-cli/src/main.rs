use chrono::NaiveDate;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use commands::{collect, config, games};
use review_harvest_models::SentimentFilter;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "steamscope")]
#[command(about = "Collect, filter and summarize Steam product reviews")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect reviews for a game and summarize them
    #[command(long_about = "Fetch all recent reviews for a game from the Steam store, \
        deduplicate them, apply the configured filters, and print summary statistics. \
        Use --out to also write the admitted reviews as CSV.")]
    Collect(CollectArgs),

    /// List configured game presets
    Games,

    /// Show configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["game", "app_id"])))]
pub struct CollectArgs {
    /// Game preset name from config (see `steamscope games`)
    #[arg(long)]
    pub game: Option<String>,

    /// Steam app id (alternative to --game)
    #[arg(long, value_name = "ID")]
    pub app_id: Option<String>,

    /// Review language (all, english, koreana, schinese, japanese, german,
    /// french, spanish, brazilian, italian, polish, ...)
    #[arg(long)]
    pub language: Option<String>,

    /// Start of the posted-at date range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", default_value = "2025-03-01")]
    pub from: NaiveDate,

    /// End of the posted-at date range (YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Recommendation filter: all, positive, negative
    #[arg(long, default_value = "all")]
    pub sentiment: SentimentFilter,

    /// Only admit reviews with at least one hour of playtime on record
    #[arg(long, action = ArgAction::SetTrue)]
    pub min_playtime: bool,

    /// Only admit reviews from verified Steam purchases
    #[arg(long, action = ArgAction::SetTrue)]
    pub purchased_only: bool,

    /// Minimum helpful-vote count (no upper bound is applied)
    #[arg(long, value_name = "N")]
    pub min_votes: Option<u32>,

    /// Write the admitted reviews as CSV. Without a value, writes
    /// "<game>_reviews.csv" into the default export directory; a directory
    /// gets the same file inside it.
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    pub out: Option<PathBuf>,

    /// Delay between page requests in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Collect(args) => collect::run_collect(args, &output).await,
        Commands::Games => games::run_games(&output),
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => config::run_show(&output),
        },
    }
}
