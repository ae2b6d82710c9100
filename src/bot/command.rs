/// Requests a user can make of the bot by private message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'i> {
    Help,
    Register { email: &'i str },
    Verify { email: &'i str, code: &'i str },
    AddWatch { token: &'i str },
    StopWatch { token: &'i str },
}

impl<'i> Command<'i> {
    /// Recognize a command by its first word. Anything with the wrong
    /// number of arguments isn't a command.
    pub fn parse(text: &'i str) -> Option<Command<'i>> {
        let words: Vec<&'i str> = text
            .split_whitespace()
            .collect();

        match words.as_slice() {
            ["help"] => Some(Command::Help),
            ["register", email] => Some(Command::Register { email: *email }),
            ["verify", email, code] => Some(Command::Verify {
                email: *email,
                code: *code,
            }),
            ["add-watch", token] => Some(Command::AddWatch { token: *token }),
            ["stop-watch", token] => Some(Command::StopWatch { token: *token }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Register { .. } => "register",
            Command::Verify { .. } => "verify",
            Command::AddWatch { .. } => "add-watch",
            Command::StopWatch { .. } => "stop-watch",
        }
    }

    pub fn usage() -> [&'static str; 5] {
        [
            "help",
            "register <email>",
            "verify <email> <verification code>",
            "add-watch <token>",
            "stop-watch <token>",
        ]
    }
}
