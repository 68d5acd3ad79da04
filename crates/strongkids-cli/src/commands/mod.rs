pub mod challenge;
pub mod config;
pub mod milestones;

use std::path::{Path, PathBuf};

use strongkids_core::storage::{self, database::DB_FILE};
use strongkids_core::{ChallengeSession, Clock, Config, Database};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Use `--data-dir` when given, otherwise the default data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> CliResult<PathBuf> {
    let dir = match explicit {
        Some(dir) => storage::ensure_dir(dir)?,
        None => storage::data_dir()?,
    };
    Ok(dir)
}

pub fn load_config(dir: &Path) -> CliResult<Config> {
    Ok(Config::load_from(&Config::path_in(dir))?)
}

pub fn open_database(dir: &Path) -> CliResult<Database> {
    Ok(Database::open_at(&dir.join(DB_FILE))?)
}

/// Open a session on the system clock and apply any pending advance that
/// is already due.
pub fn open_session<'a>(db: &'a Database, config: &Config) -> ChallengeSession<&'a Database> {
    let mut session = ChallengeSession::open(db, config, Clock::System);
    session.tick();
    session
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
