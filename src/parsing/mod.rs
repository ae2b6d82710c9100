//! Classifier for lines of an ssh-chat transcript

use tracing::{debug, trace};

use crate::language::{ParseFailure, RoomMessage};
use crate::parsing::parser::{Parser, ParsingError};

pub mod parser;

/// Classify one cleaned line. Each grammar rule gets a fresh cursor at the
/// start of the line (after any indentation) and the first rule to succeed
/// wins. Lines that nothing recognizes are common and come back as a
/// ParseFailure holding the line unchanged.
pub fn classify(line: &str) -> Result<RoomMessage<'_>, ParseFailure<'_>> {
    let mut input = Parser::new();

    for (name, rule) in parser::rules() {
        input.initialize(line);
        input.trim_whitespace();

        match rule(&mut input) {
            Ok(message) => {
                debug!(rule = name, "{}", message);
                return Ok(message);
            }
            Err(error) => {
                trace!(
                    rule = name,
                    offset = error.offset(),
                    consumed = input.consumed(),
                    "{}",
                    error.message()
                );
            }
        }
    }

    debug!(?line, "no rule matched");
    Err(ParseFailure { line })
}

/// Explain why a line didn't classify: of all the rules, find the one that
/// got furthest into the line before giving up, and the error it gave up
/// with. Returns None if the line does in fact classify.
pub fn diagnose(line: &str) -> Option<(&'static str, ParsingError)> {
    let mut input = Parser::new();
    let mut furthest: Option<(&'static str, ParsingError)> = None;

    for (name, rule) in parser::rules() {
        input.initialize(line);
        input.trim_whitespace();

        let error = match rule(&mut input) {
            Ok(_) => return None,
            Err(error) => error,
        };

        let further = match &furthest {
            Some((_, previous)) => error.offset() > previous.offset(),
            None => true,
        };
        if further {
            furthest = Some((name, error));
        }
    }

    furthest
}
