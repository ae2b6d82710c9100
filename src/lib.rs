//! Classify the lines of an ssh-chat transcript and react to them.

#[macro_use]
mod regex;

pub mod alerting;
pub mod bot;
pub mod config;
pub mod language;
pub mod parsing;
pub mod transcript;
pub mod watch;
