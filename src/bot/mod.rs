//! The bot that sits in the room and answers private messages

use std::fmt;
use std::io;
use tracing::{debug, info};

use crate::language::{ConnectionStatus, RoomMessage};

mod command;
mod writer;

pub use command::Command;
pub use writer::{ChatWriter, RateExceeded, RateLimiter};

#[derive(Debug)]
pub struct SendError(pub io::Error);

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to write line: {}", self.0)
    }
}

impl std::error::Error for SendError {}

/// How the bot talks back to the room.
pub trait Comms {
    fn private_message(&mut self, to: &str, text: &str) -> Result<(), SendError>;
    fn public_message(&mut self, text: &str) -> Result<(), SendError>;
}

pub struct Bot<C> {
    name: String,
    comms: C,
}

impl<C: Comms> Bot<C> {
    pub fn new(name: &str, comms: C) -> Bot<C> {
        Bot {
            name: name.to_string(),
            comms,
        }
    }

    pub fn comms(&self) -> &C {
        &self.comms
    }

    /// React to one classified line. Only private messages get an answer;
    /// everything else is noted in the log.
    pub fn handle(&mut self, message: &RoomMessage) -> Result<(), SendError> {
        match message {
            RoomMessage::Private { from, text } => {
                if from.as_str() == self.name {
                    return Ok(());
                }
                info!("Private Message \"{}\" -> {}", from, text);
                self.answer(from.as_str(), text)
            }
            RoomMessage::Public { from, text } => {
                info!("Public Message \"{}\" -> {}", from, text);
                Ok(())
            }
            RoomMessage::Action { from, text } => {
                info!("Action \"{}\" -> {}", from, text);
                Ok(())
            }
            RoomMessage::NickChange { from, to } => {
                info!("Nick change \"{}\" -> {}", from, to);
                Ok(())
            }
            RoomMessage::Join { username, status } => {
                match status {
                    ConnectionStatus::Joined => info!("User \"{}\" has joined", username),
                    ConnectionStatus::Left => info!("User \"{}\" has left", username),
                }
                Ok(())
            }
            RoomMessage::Acknowledgement { .. } | RoomMessage::System { .. } => {
                debug!("{}", message);
                Ok(())
            }
        }
    }

    fn answer(&mut self, from: &str, text: &str) -> Result<(), SendError> {
        match Command::parse(text) {
            None | Some(Command::Help) => self.send_help(from),
            Some(command) => {
                debug!(?command);
                let reply = format!("'{}' is not available yet, sorry", command.name());
                self.comms
                    .private_message(from, &reply)
            }
        }
    }

    fn send_help(&mut self, to: &str) -> Result<(), SendError> {
        for usage in Command::usage() {
            let line = format!("/msg {} {}", self.name, usage);
            self.comms
                .private_message(to, &line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::language::*;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<(Option<String>, String)>,
    }

    impl Comms for Recorder {
        fn private_message(&mut self, to: &str, text: &str) -> Result<(), SendError> {
            self.sent
                .push((Some(to.to_string()), text.to_string()));
            Ok(())
        }

        fn public_message(&mut self, text: &str) -> Result<(), SendError> {
            self.sent
                .push((None, text.to_string()));
            Ok(())
        }
    }

    fn private(from: &'static str, text: &str) -> RoomMessage<'static> {
        RoomMessage::Private {
            from: Username(from),
            text: text.to_string(),
        }
    }

    #[test]
    fn help_for_unknown_requests() {
        let mut bot = Bot::new("notifyi", Recorder::default());
        bot.handle(&private("chris", "what do you do?"))
            .unwrap();

        let sent = &bot
            .comms()
            .sent;
        assert_eq!(sent.len(), 5);
        assert_eq!(
            sent[0],
            (Some("chris".to_string()), "/msg notifyi help".to_string())
        );
        assert_eq!(
            sent[2],
            (
                Some("chris".to_string()),
                "/msg notifyi verify <email> <verification code>".to_string()
            )
        );
    }

    #[test]
    fn known_command_acknowledged() {
        let mut bot = Bot::new("notifyi", Recorder::default());
        bot.handle(&private("chris", "register chris@example.com"))
            .unwrap();

        assert_eq!(
            bot.comms()
                .sent,
            vec![(
                Some("chris".to_string()),
                "'register' is not available yet, sorry".to_string()
            )]
        );
    }

    #[test]
    fn other_messages_ignored() {
        let mut bot = Bot::new("notifyi", Recorder::default());
        bot.handle(&RoomMessage::Public {
            from: Username("chris"),
            text: "help".to_string(),
        })
        .unwrap();
        bot.handle(&RoomMessage::Join {
            username: Username("mike"),
            status: ConnectionStatus::Left,
        })
        .unwrap();
        bot.handle(&private("notifyi", "help"))
            .unwrap();

        assert!(bot
            .comms()
            .sent
            .is_empty());
    }
}
