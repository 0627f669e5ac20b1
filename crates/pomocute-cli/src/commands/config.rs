use clap::Subcommand;
use pomocute_core::error::Result;
use pomocute_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. "alarm.bell" or "ui.bar_width"
    Get { key: String },
    /// Change one value and write config.toml (empty clears an optional string)
    Set { key: String, value: String },
    /// Print the whole config as JSON
    List,
    /// Overwrite config.toml with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<()> {
    let mut config = match action {
        ConfigAction::Reset => Config::default(),
        _ => Config::load()?,
    };
    match action {
        ConfigAction::Get { key } => {
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => println!("{}", serde_json::to_string_pretty(&config)?),
        ConfigAction::Reset => {
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
