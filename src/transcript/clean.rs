//! Reduce a line of terminal output to the text a terminal would show.
//!
//! ssh-chat draws its screen with escape sequences: colours, cursor
//! movement, erasing the prompt before printing a message over it. The
//! bytes are fed through a `vte` parser and we replay the sequences that
//! affect the visible text of a single line, throwing the rest away.

use vte::{Params, Parser, Perform};

/// Cursor movement never goes further right than this (or the current
/// length of the line, if that is longer already).
pub const MAX_COLUMN: usize = 4096;

const BACKSPACE: u8 = 0x08;
const TAB: u8 = 0x09;
const CARRIAGE_RETURN: u8 = 0x0d;

/// A single line of a virtual terminal.
struct Screen {
    cells: Vec<char>,
    column: usize,
}

impl Screen {
    fn limit(&self) -> usize {
        self.cells
            .len()
            .max(MAX_COLUMN)
    }

    fn put(&mut self, c: char) {
        if self.column
            < self
                .cells
                .len()
        {
            self.cells[self.column] = c;
        } else {
            self.cells
                .resize(self.column, ' ');
            self.cells
                .push(c);
        }
        self.column += 1;
    }

    fn erase(&mut self, mode: usize) {
        match mode {
            0 => self
                .cells
                .truncate(self.column),
            1 => {
                let end = self
                    .column
                    .min(
                        self.cells
                            .len(),
                    );
                for cell in &mut self.cells[..end] {
                    *cell = ' ';
                }
            }
            _ => self
                .cells
                .clear(),
        }
    }
}

impl Perform for Screen {
    fn print(&mut self, c: char) {
        self.put(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            CARRIAGE_RETURN => self.column = 0,
            BACKSPACE => {
                self.column = self
                    .column
                    .saturating_sub(1)
            }
            TAB => self.put('\t'),
            // bell, NUL, and the rest of C0 leave no trace
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore || !intermediates.is_empty() {
            return;
        }

        let n = params
            .iter()
            .next()
            .and_then(|param| param.first())
            .map(|&value| value as usize)
            .unwrap_or(0);

        match action {
            'K' => self.erase(n),
            'C' => {
                self.column = self
                    .column
                    .saturating_add(n.max(1))
                    .min(self.limit())
            }
            'D' => {
                self.column = self
                    .column
                    .saturating_sub(n.max(1))
            }
            'G' => self.column = (n.max(1) - 1).min(self.limit()),
            // colours, scrolling, and anything else don't change the text
            _ => {}
        }
    }
}

pub fn clean(raw: &str) -> String {
    let mut screen = Screen {
        cells: Vec::with_capacity(raw.len()),
        column: 0,
    };

    let mut parser = Parser::new();
    parser.advance(&mut screen, raw.as_bytes());

    screen
        .cells
        .into_iter()
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn plain_text_untouched() {
        assert_eq!(clean("chris: hello there"), "chris: hello there");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn colours_removed() {
        assert_eq!(
            clean("\u{1b}[38;05;88mvoldyman\u{1b}[0m: hi"),
            "voldyman: hi"
        );
        assert_eq!(
            clean(" \u{1b}[90m * gurken joined. (Connected: 12)\u{1b}[0m"),
            "  * gurken joined. (Connected: 12)"
        );
    }

    #[test]
    fn prompt_overwritten() {
        // the server erases our prompt and prints the message in its place
        assert_eq!(
            clean("[notifyi] \r\u{1b}[Kchris: hello"),
            "chris: hello"
        );
        assert_eq!(clean("abcdef\rXY"), "XYcdef");
        assert_eq!(clean("line\r"), "line");
    }

    #[test]
    fn cursor_movement() {
        assert_eq!(clean("abc\u{8}\u{8}X"), "aXc");
        assert_eq!(clean("abcdef\u{1b}[3D\u{1b}[K!"), "abc!");
        assert_eq!(clean("ab\u{1b}[2Cc"), "ab  c");
        assert_eq!(clean("abcdef\u{1b}[1GZ"), "Zbcdef");
        assert_eq!(clean("a\tb"), "a\tb");
    }

    #[test]
    fn other_sequences_dropped() {
        assert_eq!(clean("\u{1b}]0;window title\u{7}bob: hi"), "bob: hi");
        assert_eq!(clean("\u{1b}]0;title\u{1b}\\bob: hi"), "bob: hi");
        assert_eq!(clean("\u{1b}7bob: hi"), "bob: hi");
        assert_eq!(clean("bob\u{0}: hi"), "bob: hi");
        assert_eq!(clean("\u{1b}[?25lbob: hi"), "bob: hi");
    }

    #[test]
    fn huge_cursor_moves_are_bounded() {
        let line = clean("\u{1b}[200000000Cx");
        assert_eq!(
            line.chars()
                .count(),
            MAX_COLUMN + 1
        );
        assert!(line.ends_with('x'));

        let line = clean(&format!("a\u{1b}[{}C\u{1b}[5Cb", usize::MAX));
        assert_eq!(
            line.chars()
                .count(),
            MAX_COLUMN + 1
        );
        assert!(line.starts_with('a'));
        assert!(line.ends_with('b'));

        let line = clean("\u{1b}[99999999Gz");
        assert_eq!(
            line.chars()
                .count(),
            MAX_COLUMN + 1
        );
    }

    #[test]
    fn long_lines_are_kept_whole() {
        let text = "x".repeat(MAX_COLUMN + 100);
        assert_eq!(clean(&format!("{}\u{1b}[5C!", text)), format!("{}!", text));
    }
}
