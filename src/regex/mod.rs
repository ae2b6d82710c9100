//! Lazily compiled regular expressions shared by the grammar and the
//! transcript cleaner.

/// Compile a pattern once and hand back a `&'static Regex` on every later
/// use. Patterns are literals in this crate, so a bad one is a programming
/// error and panics at first use.
macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<::regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}
