//! Configuration for the watch loop, read from a JSON file

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::language::{validate_username, LoadingError};

pub const DEFAULT_NAME: &str = "notifyi";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// The username the bot is logged in as. Our own lines are never
    /// alerted on or answered.
    #[serde(default = "default_name")]
    pub name: String,

    /// TinyTemplate source used to render an alert; see alerting.
    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub mentions: Vec<Mention>,
}

/// A named set of keywords. When one of them turns up in something said in
/// the room, an alert is raised; if a command is given it is run with the
/// rendered alert on its standard input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Mention {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: default_name(),
            template: None,
            mentions: Vec::new(),
        }
    }
}

impl Config {
    /// Decode configuration from JSON text.
    pub fn parse(content: &str) -> Result<Config, String> {
        let config: Config = serde_json::from_str(content).map_err(|e| e.to_string())?;

        if validate_username(&config.name).is_none() {
            return Err(format!("'{}' is not a valid username", config.name));
        }

        for mention in &config.mentions {
            if let Some(command) = &mention.command {
                if command.is_empty() {
                    return Err(format!("mention '{}' has an empty command", mention.name));
                }
            }
        }

        Ok(config)
    }

    pub fn load(filename: &Path) -> Result<Config, LoadingError<'_>> {
        let content = match std::fs::read_to_string(filename) {
            Ok(content) => content,
            Err(error) => {
                debug!(?error);
                return match error.kind() {
                    std::io::ErrorKind::NotFound => Err(LoadingError {
                        problem: "Configuration file not found".to_string(),
                        details: String::new(),
                        filename,
                    }),
                    _ => Err(LoadingError {
                        problem: "Failed reading configuration".to_string(),
                        details: error
                            .kind()
                            .to_string(),
                        filename,
                    }),
                };
            }
        };

        let config = Config::parse(&content).map_err(|details| LoadingError {
            problem: "Invalid configuration".to_string(),
            details,
            filename,
        })?;

        debug!(
            "Loaded {} mention{}",
            config
                .mentions
                .len(),
            if config
                .mentions
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );

        Ok(config)
    }
}
