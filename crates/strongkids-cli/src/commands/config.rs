use std::path::Path;

use clap::Subcommand;
use strongkids_core::{Config, ConfigError};

use super::{load_config, print_json, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "celebration.delay_ms", "display.show_ideas")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(dir: &Path, action: ConfigAction) -> CliResult {
    let path = Config::path_in(dir);
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(dir)?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(dir)?;
            config.set(&key, &value)?;
            config.save_to(&path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = load_config(dir)?;
            print_json(&config)?;
        }
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
