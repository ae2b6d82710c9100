use regex::Regex;

use crate::language::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    Expected(usize, &'static str),
    UnexpectedEndOfInput(usize),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::Expected(offset, _) => *offset,
            ParsingError::UnexpectedEndOfInput(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::Expected(_, value) => format!("expected '{}'", value),
            ParsingError::UnexpectedEndOfInput(_) => "unexpected end of input".to_string(),
        }
    }
}

/// Signature shared by every grammar rule.
pub type Rule<'i> = fn(&mut Parser<'i>) -> Result<RoomMessage<'i>, ParsingError>;

/// The grammar, in priority order. Prefixes overlap (a line starting with
/// "**" also starts with "*", and almost anything can begin with a
/// zero-length username) so the order here is part of the contract.
pub fn rules<'i>() -> [(&'static str, Rule<'i>); 7] {
    [
        ("info", Parser::read_info),
        ("action", Parser::read_action),
        ("private", Parser::read_private),
        ("public", Parser::read_public),
        ("sent-private", Parser::read_sent_private),
        ("system", Parser::read_system),
        ("echo", Parser::read_echo),
    ]
}

/// A cursor over a single line. Rules move it forward as they consume
/// input; nothing ever moves it backward except attempt().
#[derive(Debug)]
pub struct Parser<'i> {
    original: &'i str,
    source: &'i str,
    offset: usize,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            original: "",
            source: "",
            offset: 0,
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.original = content;
        self.source = content;
        self.offset = 0;
    }

    fn advance(&mut self, width: usize) {
        // advance the parser position
        self.source = &self.source[width..];
        self.offset += width;
    }

    pub fn entire(&self) -> &'i str {
        self.source
    }

    /// The part of the line the rules have eaten so far.
    pub fn consumed(&self) -> &'i str {
        &self.original[..self.offset]
    }

    pub fn is_finished(&self) -> bool {
        self.source
            .is_empty()
    }

    /// Run the given function and, if it fails, put the cursor back where
    /// it was before the function started consuming.
    pub fn attempt<A, F>(&mut self, function: F) -> Result<A, ParsingError>
    where
        F: FnOnce(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let source = self.source;
        let offset = self.offset;

        let result = function(self);

        if result.is_err() {
            self.source = source;
            self.offset = offset;
        }
        result
    }

    /// Trim any leading whitespace from the front of the current parser
    /// text. Zero characters is fine.
    pub fn trim_whitespace(&mut self) {
        let l = self
            .source
            .len()
            - self
                .source
                .trim_start()
                .len();

        self.advance(l);
    }

    /// Match an exact, case-sensitive string at the cursor. On failure
    /// nothing is consumed.
    pub fn read_literal(&mut self, text: &'static str) -> Result<(), ParsingError> {
        if self.is_finished() {
            return Err(ParsingError::UnexpectedEndOfInput(self.offset));
        }

        if self
            .source
            .starts_with(text)
        {
            self.advance(text.len());
            Ok(())
        } else {
            Err(ParsingError::Expected(self.offset, text))
        }
    }

    /// Greedily consume the longest run matching the given pattern, which
    /// must be anchored with `^`. Zero-length matches succeed.
    pub fn read_token(&mut self, re: &Regex) -> Result<&'i str, ParsingError> {
        let found = re
            .find(self.source)
            .filter(|m| m.start() == 0)
            .ok_or(ParsingError::Expected(self.offset, "a token"))?;

        let token = &self.source[..found.end()];
        self.advance(found.end());

        Ok(token)
    }

    pub fn read_username(&mut self) -> Result<Username<'i>, ParsingError> {
        let re = regex!(r"^[\w.-]*");

        let token = self.read_token(re)?;
        Ok(Username(token))
    }

    /// Consume everything up to the end of the line, returning the
    /// whitespace separated chunks rejoined by single spaces. Always
    /// succeeds, possibly with an empty string.
    pub fn read_rest_of_line(&mut self) -> String {
        let text = self
            .source
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ");

        self.advance(
            self.source
                .len(),
        );

        text
    }

    // " * gurken joined. (Connected: 12)"
    // " * mike left. (After 60 seconds)"
    // " * bob is now known as alice."
    pub fn read_info(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        self.read_literal("*")?;
        self.trim_whitespace();
        let username = self.read_username()?;

        if self
            .read_literal(" joined.")
            .is_ok()
        {
            // whatever the server appends is of no interest
            self.read_rest_of_line();
            return Ok(RoomMessage::Join {
                username,
                status: ConnectionStatus::Joined,
            });
        }

        if self
            .read_literal(" left.")
            .is_ok()
        {
            self.read_rest_of_line();
            return Ok(RoomMessage::Join {
                username,
                status: ConnectionStatus::Left,
            });
        }

        self.attempt(|inner| {
            inner.read_literal(" is now known as")?;
            inner.trim_whitespace();
            let to = inner.read_username()?;

            // the server finishes that sentence with a full stop, and '.' is
            // a legal username character, so it lands in the token.
            let to = match to
                .0
                .strip_suffix('.')
            {
                Some(stripped) => Username(stripped),
                None => to,
            };

            Ok(RoomMessage::NickChange { from: username, to })
        })
    }

    // "** voldyman has flexible moral values"
    pub fn read_action(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        self.read_literal("**")?;
        self.trim_whitespace();
        let from = self.read_username()?;
        let text = self.read_rest_of_line();

        Ok(RoomMessage::Action { from, text })
    }

    // "[PM from Guest91] private message for testing."
    pub fn read_private(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        self.read_literal("[PM from ")?;
        let from = self.read_username()?;
        self.read_literal("] ")?;
        let text = self.read_rest_of_line();

        Ok(RoomMessage::Private { from, text })
    }

    // "chris: it might not merge nicely that way though unless rebasing"
    pub fn read_public(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        let from = self.read_username()?;
        self.read_literal(":")?;
        let text = self.read_rest_of_line();

        Ok(RoomMessage::Public { from, text })
    }

    // "-> [Sent PM to voldyman]"
    pub fn read_sent_private(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        self.read_literal("-> [Sent PM to ")?;
        let username = self.read_username()?;
        self.read_literal("]")?;
        self.read_rest_of_line();

        Ok(RoomMessage::Acknowledgement {
            username,
            text: String::new(),
            kind: AckKind::Private,
        })
    }

    // "-> Message rejected: Rate limiting is in effect."
    pub fn read_system(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        self.read_literal("-> ")?;
        let text = self.read_rest_of_line();

        if text.is_empty() {
            return Err(ParsingError::UnexpectedEndOfInput(self.offset));
        }

        Ok(RoomMessage::System { text })
    }

    // "[voldyman] some complicated, ardous message"
    pub fn read_echo(&mut self) -> Result<RoomMessage<'i>, ParsingError> {
        self.read_literal("[")?;
        let username = self.read_username()?;
        self.read_literal("] ")?;
        let text = self.read_rest_of_line();

        Ok(RoomMessage::Acknowledgement {
            username,
            text,
            kind: AckKind::Public,
        })
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Parser::new()
    }
}
