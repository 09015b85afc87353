use clap::Subcommand;
use studystreak_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dotted key: storage.key, storage.database, clock.timezone or watch.interval_secs
        key: String,
    },
    /// Change one setting and save config.toml
    Set {
        /// Dotted key
        key: String,
        /// New value, checked before anything is saved
        value: String,
    },
    /// Print every setting as `key = value`
    List {
        /// Print the raw config.toml contents instead
        #[arg(long)]
        toml: bool,
    },
    /// Overwrite config.toml with the defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List { toml } => {
            let config = Config::load()?;
            if toml {
                print!("{}", toml::to_string_pretty(&config)?);
            } else {
                for (key, value) in config.entries() {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("reset {} to defaults", Config::path()?.display());
        }
    }
    Ok(())
}
