use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "qbot.toml";

#[derive(Debug, Parser)]
#[command(name = "qbot", version, about = "Turn-token queue chat bot")]
pub struct Cli {
    /// Bot token of the chat platform
    pub token: String,
    /// Path of the queue file
    pub data_file: PathBuf,
    /// Path to the config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dispatch: Dispatch,
    pub commands: Commands,
    pub connection: Connection,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Dispatch {
    /// Shut down if no event arrives for this long.
    pub inactivity_timeout_secs: u64,
    pub keepalive_interval_secs: u64,
    pub channel_buffer: usize,
}

impl Default for Dispatch {
    fn default() -> Self {
        Dispatch {
            inactivity_timeout_secs: 60,
            keepalive_interval_secs: 30,
            channel_buffer: 16,
        }
    }
}

impl Dispatch {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_secs(self.keepalive_interval_secs)
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Commands {
    pub oust_confirmation_secs: u64,
}

impl Default for Commands {
    fn default() -> Self {
        Commands {
            oust_confirmation_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Connection {
    pub max_backoff_secs: u64,
}

impl Default for Connection {
    fn default() -> Self {
        Connection { max_backoff_secs: 64 }
    }
}

impl Config {
    /// Periods of zero seconds cannot drive a timer, so they are refused up front.
    fn validate(&self) -> Result<()> {
        let periods = [
            ("dispatch.inactivity_timeout_secs", self.dispatch.inactivity_timeout_secs),
            ("dispatch.keepalive_interval_secs", self.dispatch.keepalive_interval_secs),
            ("commands.oust_confirmation_secs", self.commands.oust_confirmation_secs),
            ("connection.max_backoff_secs", self.connection.max_backoff_secs),
        ];

        for (key, secs) in periods {
            if secs == 0 {
                bail!("{} must be greater than zero", key);
            }
        }

        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    config.validate()?;

    Ok(config)
}

/// Read the config file given on the command line, or `qbot.toml` if it exists. Without any
/// config file the defaults apply.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(Config::default()),
    };

    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.dispatch.inactivity_timeout(), Duration::from_secs(60));
        assert_eq!(config.connection.max_backoff_secs, 64);
    }

    #[test]
    fn partial_config() {
        let config = parse_config(
            r#"
            [dispatch]
            inactivity_timeout_secs = 120

            [commands]
            oust_confirmation_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatch.inactivity_timeout_secs, 120);
        assert_eq!(config.dispatch.keepalive_interval_secs, 30);
        assert_eq!(config.commands.oust_confirmation_secs, 10);
    }

    #[test]
    fn zero_periods_are_refused() {
        let err = parse_config("[dispatch]\nkeepalive_interval_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("dispatch.keepalive_interval_secs"));

        assert!(parse_config("[dispatch]\ninactivity_timeout_secs = 0\n").is_err());
        assert!(parse_config("[commands]\noust_confirmation_secs = 0\n").is_err());
        assert!(parse_config("[connection]\nmax_backoff_secs = 0\n").is_err());
    }

    #[test]
    fn zero_period_in_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.toml");
        std::fs::write(&path, "[dispatch]\nkeepalive_interval_secs = 0\n").unwrap();

        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn cli_needs_token_and_file() {
        let cli = Cli::try_parse_from(["qbot", "xoxb-1", "queue.json", "-c", "bot.toml"]).unwrap();

        assert_eq!(cli.token, "xoxb-1");
        assert_eq!(cli.data_file, PathBuf::from("queue.json"));
        assert_eq!(cli.config, Some(PathBuf::from("bot.toml")));

        assert!(Cli::try_parse_from(["qbot", "xoxb-1"]).is_err());
    }
}
