//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Multi-format educational quiz engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session at the terminal
    Play {
        /// Path to a question bank .toml file
        #[arg(long)]
        bank: PathBuf,

        /// Seed for the question sampler (deterministic draws)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory holding the leaderboard data
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Show a topic's leaderboard
    Ranking {
        /// Topic id the results were saved under
        #[arg(long)]
        topic: String,

        /// Maximum entries to show
        #[arg(long)]
        limit: Option<usize>,

        /// Show this player's best scores instead of the full board
        #[arg(long)]
        player: Option<String>,

        /// Directory holding the leaderboard data
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge_core=info".parse().unwrap())
                .add_directive("quizforge_store=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            seed,
            data_dir,
            config,
        } => commands::play::execute(bank, seed, data_dir, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Ranking {
            topic,
            limit,
            player,
            data_dir,
            config,
        } => commands::ranking::execute(topic, limit, player, data_dir, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
