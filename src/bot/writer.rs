use std::fmt;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{Comms, SendError};

/// ssh-chat rejects messages from clients that talk too fast. Three lines
/// in three seconds keeps us under its limit.
const DEFAULT_LIMIT: usize = 3;
const DEFAULT_PERIOD: Duration = Duration::from_secs(3);
const PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateExceeded;

impl fmt::Display for RateExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rate limit exceeded")
    }
}

/// Counts events in fixed windows of `period`, allowing at most `limit` in
/// each one.
#[derive(Debug)]
pub struct RateLimiter {
    limit: usize,
    period: Duration,
    window: Option<Instant>,
    count: usize,
}

impl RateLimiter {
    pub fn new(limit: usize, period: Duration) -> RateLimiter {
        RateLimiter {
            limit,
            period,
            window: None,
            count: 0,
        }
    }

    /// Record one event at `now`.
    pub fn check(&mut self, now: Instant) -> Result<(), RateExceeded> {
        let expired = match self.window {
            Some(start) => now.saturating_duration_since(start) >= self.period,
            None => true,
        };

        if expired {
            self.window = Some(now);
            self.count = 0;
        }

        self.count += 1;

        if self.count > self.limit {
            Err(RateExceeded)
        } else {
            Ok(())
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        RateLimiter::new(DEFAULT_LIMIT, DEFAULT_PERIOD)
    }
}

/// Sends lines to the chat server through anything writable, normally the
/// stdin of the ssh session.
pub struct ChatWriter<W> {
    writer: W,
    limiter: RateLimiter,
}

impl<W: Write> ChatWriter<W> {
    pub fn new(writer: W) -> ChatWriter<W> {
        ChatWriter::with_limiter(writer, RateLimiter::default())
    }

    pub fn with_limiter(writer: W, limiter: RateLimiter) -> ChatWriter<W> {
        ChatWriter { writer, limiter }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Write one line, terminated the way a terminal would send it. Going
    /// over the rate limit slows us down but doesn't drop the line.
    pub fn write_line(&mut self, line: &str) -> Result<(), SendError> {
        if let Err(exceeded) = self
            .limiter
            .check(Instant::now())
        {
            warn!("{}, pausing", exceeded);
            thread::sleep(PAUSE);
        }

        debug!(?line, "Sending");

        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| {
                self.writer
                    .write_all(b"\r\n")
            })
            .and_then(|_| {
                self.writer
                    .flush()
            })
            .map_err(SendError)
    }
}

impl<W: Write> Comms for ChatWriter<W> {
    fn private_message(&mut self, to: &str, text: &str) -> Result<(), SendError> {
        self.write_line(&format!("/msg {} {}", to, text))
    }

    fn public_message(&mut self, text: &str) -> Result<(), SendError> {
        self.write_line(text)
    }
}
