//! Output generation for the notifyi command line

use owo_colors::OwoColorize;
use serde::Serialize;

use notifyi::language::{AckKind, ConnectionStatus, RoomMessage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Plain,
    Colour,
    Json,
}

#[derive(Serialize)]
struct Record<'a, 'i> {
    line: usize,
    #[serde(flatten)]
    message: &'a RoomMessage<'i>,
}

/// Render one classified line for standard output.
pub fn render(number: usize, message: &RoomMessage, style: Style) -> String {
    match style {
        Style::Json => {
            let record = Record {
                line: number,
                message,
            };
            // a Serialize derive over strings and enums can't fail
            serde_json::to_string(&record).unwrap_or_default()
        }
        Style::Plain => format!("{:>5}  {:<12} {}", number, kind(message), describe(message)),
        Style::Colour => format!(
            "{:>5}  {} {}",
            number.bright_black(),
            format!("{:<12}", kind(message)).color(colour(message)),
            describe(message)
        ),
    }
}

fn kind(message: &RoomMessage) -> &'static str {
    match message {
        RoomMessage::Public { .. } => "public",
        RoomMessage::Private { .. } => "private",
        RoomMessage::Action { .. } => "action",
        RoomMessage::Join { .. } => "join",
        RoomMessage::NickChange { .. } => "nick",
        RoomMessage::Acknowledgement { .. } => "ack",
        RoomMessage::System { .. } => "system",
    }
}

fn colour(message: &RoomMessage) -> owo_colors::AnsiColors {
    use owo_colors::AnsiColors;

    match message {
        RoomMessage::Public { .. } => AnsiColors::Green,
        RoomMessage::Private { .. } => AnsiColors::Magenta,
        RoomMessage::Action { .. } => AnsiColors::Cyan,
        RoomMessage::Join { .. } | RoomMessage::NickChange { .. } => AnsiColors::Blue,
        RoomMessage::Acknowledgement { .. } | RoomMessage::System { .. } => AnsiColors::BrightBlack,
    }
}

fn describe(message: &RoomMessage) -> String {
    match message {
        RoomMessage::Public { from, text }
        | RoomMessage::Private { from, text }
        | RoomMessage::Action { from, text } => format!("{} {}", from, text),
        RoomMessage::Join { username, status } => match status {
            ConnectionStatus::Joined => format!("{} joined", username),
            ConnectionStatus::Left => format!("{} left", username),
        },
        RoomMessage::NickChange { from, to } => format!("{} -> {}", from, to),
        RoomMessage::Acknowledgement {
            username,
            text,
            kind: AckKind::Public,
        } => format!("{} {}", username, text),
        RoomMessage::Acknowledgement {
            username,
            kind: AckKind::Private,
            ..
        } => format!("sent private message to {}", username),
        RoomMessage::System { text } => text.to_string(),
    }
}
