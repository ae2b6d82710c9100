//! Reading lines from an ssh-chat session transcript

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

mod clean;

pub use clean::clean;

/// Longest record read in one go. A peer that never sends a newline gets
/// its output split into pieces of this size.
pub const MAX_LINE: u64 = 64 * 1024;

/// A source of cleaned lines. Wraps anything that can be read line by line,
/// typically the standard output of an `ssh` session or a saved log of
/// one.
pub struct Transcript<R> {
    reader: R,
    failed: Option<io::ErrorKind>,
    count: usize,
}

impl<R: BufRead> Transcript<R> {
    pub fn new(reader: R) -> Transcript<R> {
        Transcript {
            reader,
            failed: None,
            count: 0,
        }
    }

    /// Read the next record, decode it, and strip the terminal control
    /// sequences out of it. Returns None at end of input. Once reading has
    /// failed, every subsequent call fails the same way.
    pub fn read_line(&mut self) -> Result<Option<String>, io::Error> {
        if let Some(kind) = self.failed {
            return Err(io::Error::from(kind));
        }

        let mut buffer = Vec::new();
        let width = match (&mut self.reader)
            .take(MAX_LINE)
            .read_until(b'\n', &mut buffer)
        {
            Ok(width) => width,
            Err(error) => {
                debug!(?error);
                self.failed = Some(error.kind());
                return Err(error);
            }
        };

        if width == 0 {
            return Ok(None);
        }

        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        } else if width as u64 == MAX_LINE {
            debug!(width, "Overlong record split");
        }

        self.count += 1;

        let raw = String::from_utf8_lossy(&buffer);
        Ok(Some(clean(&raw)))
    }

    /// How many lines have been read so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<R: BufRead> Iterator for Transcript<R> {
    type Item = Result<String, io::Error>;

    /// Yields a read error once, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self
            .failed
            .is_some()
        {
            return None;
        }
        self.read_line()
            .transpose()
    }
}

/// Open a transcript file, or standard input if the filename is "-".
pub fn open(filename: &Path) -> Result<Transcript<Box<dyn BufRead>>, LoadingError<'_>> {
    if filename.to_str() == Some("-") {
        let reader: Box<dyn BufRead> = Box::new(
            io::stdin()
                .lock(),
        );
        return Ok(Transcript::new(reader));
    }

    match File::open(filename) {
        Ok(file) => {
            let reader: Box<dyn BufRead> = Box::new(BufReader::new(file));
            Ok(Transcript::new(reader))
        }
        Err(error) => {
            debug!(?error);
            match error.kind() {
                io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}
