//! The loop that ties the pieces together: read a line, classify it, raise
//! alerts, and let the bot answer.

use std::io::{self, BufRead};
use tracing::{debug, warn};

use crate::alerting::Alerter;
use crate::bot::{Bot, Comms};
use crate::parsing;
use crate::transcript::Transcript;

/// Tallies from one run over a transcript.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub classified: usize,
    pub unrecognized: usize,
    pub alerts: usize,
}

/// Consume the transcript until it ends. Unrecognized lines and failed
/// alerts are logged and skipped; a read failure ends the run and is
/// returned. Failing to write a reply is logged but does not stop us
/// listening.
pub fn run<R, C>(
    transcript: &mut Transcript<R>,
    alerter: &Alerter,
    bot: &mut Bot<C>,
) -> Result<Summary, io::Error>
where
    R: BufRead,
    C: Comms,
{
    let mut summary = Summary::default();

    while let Some(line) = transcript.read_line()? {
        debug!(line = line.as_str(), "Scanned line");

        if line
            .trim()
            .is_empty()
        {
            continue;
        }
        summary.lines += 1;

        let message = match parsing::classify(&line) {
            Ok(message) => message,
            Err(failure) => {
                warn!("Parsing failed: {}", failure);
                summary.unrecognized += 1;
                continue;
            }
        };
        summary.classified += 1;

        summary.alerts += alerter.dispatch(&message);

        if let Err(error) = bot.handle(&message) {
            warn!("Unable to reply: {}", error);
        }
    }

    Ok(summary)
}
