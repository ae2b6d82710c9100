//! Types representing the classified lines of an ssh-chat transcript

use std::fmt;

use serde::Serialize;

/// A chat identity as the server prints it. The charset is the server's
/// business; all we know is that it is made of word characters, `.` and
/// `-`. It may be empty.
#[derive(Clone, Copy, Eq, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Username<'i>(pub &'i str);

impl<'i> Username<'i> {
    pub fn as_str(&self) -> &'i str {
        self.0
    }
}

impl fmt::Display for Username<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Eq, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Joined,
    Left,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Joined => f.write_str("joined"),
            ConnectionStatus::Left => f.write_str("left"),
        }
    }
}

/// Which of our own outgoing messages the server is echoing back.
#[derive(Clone, Copy, Eq, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AckKind {
    Public,
    Private,
}

/// One line of the room, classified. The `text` fields are rebuilt from
/// whitespace separated chunks joined by a single space, so runs of
/// whitespace in the original line are not preserved.
#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RoomMessage<'i> {
    Public {
        from: Username<'i>,
        text: String,
    },
    Private {
        from: Username<'i>,
        text: String,
    },
    // "/me" style
    Action {
        from: Username<'i>,
        text: String,
    },
    Join {
        username: Username<'i>,
        status: ConnectionStatus,
    },
    NickChange {
        from: Username<'i>,
        to: Username<'i>,
    },
    Acknowledgement {
        username: Username<'i>,
        text: String,
        kind: AckKind,
    },
    System {
        text: String,
    },
}

impl<'i> RoomMessage<'i> {
    /// The user who said something, for the variants that carry speech.
    pub fn speaker(&self) -> Option<(Username<'i>, &str)> {
        match self {
            RoomMessage::Public { from, text }
            | RoomMessage::Private { from, text }
            | RoomMessage::Action { from, text } => Some((*from, text.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for RoomMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomMessage::Public { from, text } => write!(f, "{}: {}", from, text),
            RoomMessage::Private { from, text } => write!(f, "[PM from {}] {}", from, text),
            RoomMessage::Action { from, text } => write!(f, "** {} {}", from, text),
            RoomMessage::Join { username, status } => write!(f, "* {} {}.", username, status),
            RoomMessage::NickChange { from, to } => {
                write!(f, "* {} is now known as {}.", from, to)
            }
            RoomMessage::Acknowledgement {
                username,
                text,
                kind: AckKind::Public,
            } => write!(f, "[{}] {}", username, text),
            RoomMessage::Acknowledgement {
                username,
                kind: AckKind::Private,
                ..
            } => write!(f, "-> [Sent PM to {}]", username),
            RoomMessage::System { text } => write!(f, "-> {}", text),
        }
    }
}

/// A line that none of the grammar rules recognized. Carries the line
/// exactly as it was given so the caller can report it.
#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub struct ParseFailure<'i> {
    pub line: &'i str,
}

impl fmt::Display for ParseFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized line '{}'", self.line)
    }
}

// the validate functions all need to have start and end anchors.

pub fn validate_username(input: &str) -> Option<Username<'_>> {
    let re = regex!(r"^[\w.-]+$");

    if re.is_match(input) {
        Some(Username(input))
    } else {
        None
    }
}
