use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strongkids_core::Category;
use tracing_subscriber::EnvFilter;

mod commands;
mod confirm;
mod render;

#[derive(Parser)]
#[command(name = "strongkids", version, about = "75 Strong Kids challenge tracker")]
struct Cli {
    /// Directory holding the challenge database and config.toml
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's checklist, day count, strikes and next milestone
    Status {
        /// Category whose items and ideas are listed
        #[arg(long, short)]
        expand: Option<Category>,
        /// Print the state snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check or uncheck one checklist item
    Toggle {
        /// nutrition, movement, learning, responsibility or kindness
        category: String,
        /// Item key, e.g. fruits, noSugar, outsidePlay, activity, task
        item: String,
        #[arg(long)]
        json: bool,
    },
    /// End the day: advance when everything is done, otherwise add a strike
    Complete {
        /// Do not wait out the celebration; the next command applies the advance
        #[arg(long)]
        no_wait: bool,
        #[arg(long)]
        json: bool,
    },
    /// Reset all progress back to day 1 (parent only)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List milestone rewards
    Milestones {
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = commands::resolve_data_dir(cli.data_dir).and_then(|dir| match cli.command {
        Commands::Status { expand, json } => commands::challenge::status(&dir, expand, json),
        Commands::Toggle {
            category,
            item,
            json,
        } => commands::challenge::toggle(&dir, &category, &item, json),
        Commands::Complete { no_wait, json } => commands::challenge::complete(&dir, no_wait, json),
        Commands::Reset { yes } => commands::challenge::reset(&dir, yes),
        Commands::Milestones { json } => commands::milestones::run(&dir, json),
        Commands::Config { action } => commands::config::run(&dir, action),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
