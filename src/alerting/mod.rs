//! Keyword alerts for things said in the room

use serde::Serialize;
use std::fmt;
use tinytemplate::TinyTemplate;
use tracing::{debug, info, warn};

use crate::config::{Config, Mention};
use crate::language::RoomMessage;

mod command;

pub use command::CommandNotifier;

pub const DEFAULT_TEMPLATE: &str = "{from} said: {text}";

#[derive(Debug)]
pub enum AlertError {
    Template(String),
    Spawn(String, std::io::Error),
    Failed(String, Option<i32>),
}

impl fmt::Display for AlertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertError::Template(details) => write!(f, "invalid alert template: {}", details),
            AlertError::Spawn(program, error) => {
                write!(f, "unable to run '{}': {}", program, error)
            }
            AlertError::Failed(program, Some(code)) => {
                write!(f, "'{}' exited with status {}", program, code)
            }
            AlertError::Failed(program, None) => write!(f, "'{}' was terminated", program),
        }
    }
}

impl std::error::Error for AlertError {}

/// Something said in the room that matched one of the configured
/// mentions. This is also the context the alert template is rendered
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert<'a> {
    pub mention: &'a str,
    pub keyword: &'a str,
    pub from: &'a str,
    pub text: &'a str,
}

/// Delivers a rendered alert somewhere a human will see it.
pub trait Notifier {
    fn notify(&self, alert: &Alert, rendered: &str) -> Result<(), AlertError>;
}

/// Writes alerts to the log and nowhere else.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, alert: &Alert, rendered: &str) -> Result<(), AlertError> {
        info!(mention = alert.mention, keyword = alert.keyword, "{}", rendered);
        Ok(())
    }
}

/// Returns the first keyword that appears in the text. Matching is a plain
/// case-sensitive substring search; empty keywords are ignored.
pub fn matching_keyword<'k>(text: &str, keywords: &'k [String]) -> Option<&'k str> {
    keywords
        .iter()
        .filter(|word| !word.is_empty())
        .find(|word| text.contains(word.as_str()))
        .map(String::as_str)
}

pub struct Alerter {
    name: String,
    template: String,
    mentions: Vec<Mention>,
}

impl Alerter {
    pub fn new(config: &Config) -> Result<Alerter, AlertError> {
        let template = config
            .template
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

        // fail early rather than on the first alert
        let mut tt = TinyTemplate::new();
        tt.add_template("alert", &template)
            .map_err(|e| AlertError::Template(e.to_string()))?;

        Ok(Alerter {
            name: config
                .name
                .clone(),
            template,
            mentions: config
                .mentions
                .clone(),
        })
    }

    /// Work out which mentions a message triggers. Only things people say
    /// (public, private, and action messages) are considered, and never
    /// anything we said ourselves.
    pub fn check<'a>(&'a self, message: &'a RoomMessage) -> Vec<Alert<'a>> {
        let (from, text) = match message.speaker() {
            Some(speaker) => speaker,
            None => return Vec::new(),
        };

        if from.as_str() == self.name {
            return Vec::new();
        }

        self.mentions
            .iter()
            .filter_map(|mention| {
                matching_keyword(text, &mention.keywords).map(|keyword| Alert {
                    mention: &mention.name,
                    keyword,
                    from: from.as_str(),
                    text,
                })
            })
            .collect()
    }

    pub fn render(&self, alert: &Alert) -> Result<String, AlertError> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template("alert", &self.template)
            .map_err(|e| AlertError::Template(e.to_string()))?;

        tt.render("alert", alert)
            .map_err(|e| AlertError::Template(e.to_string()))
    }

    fn mention(&self, name: &str) -> Option<&Mention> {
        self.mentions
            .iter()
            .find(|mention| mention.name == name)
    }

    /// Check the message and hand every resulting alert to the notifier
    /// for its mention: the configured command if there is one, otherwise
    /// the log. Failures are logged and do not stop the other alerts.
    /// Returns the number of alerts delivered.
    pub fn dispatch(&self, message: &RoomMessage) -> usize {
        let mut delivered = 0;

        for alert in self.check(message) {
            debug!(mention = alert.mention, keyword = alert.keyword, "Found keyword");

            let command = self
                .mention(alert.mention)
                .and_then(|mention| {
                    mention
                        .command
                        .clone()
                })
                .map(CommandNotifier::new);

            let result = self
                .render(&alert)
                .and_then(|rendered| match &command {
                    Some(notifier) => notifier.notify(&alert, &rendered),
                    None => LogNotifier.notify(&alert, &rendered),
                });

            match result {
                Ok(()) => delivered += 1,
                Err(error) => warn!(mention = alert.mention, "Unable to deliver alert: {}", error),
            }
        }

        delivered
    }
}
