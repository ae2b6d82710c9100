use owo_colors::OwoColorize;
use std::path::Path;

use notifyi::language::LoadingError;
use notifyi::parsing::parser::ParsingError;

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// Format a LoadingError including whatever details came with it
pub fn full_loading_error<'i>(error: &LoadingError<'i>) -> String {
    if error
        .details
        .is_empty()
    {
        return concise_loading_error(error);
    }

    format!("{}\n\n{}", concise_loading_error(error), error.details)
}

/// A line that didn't classify, as a one-line warning.
pub fn concise_unrecognized(filename: &Path, number: usize, line: &str) -> String {
    format!(
        "{}: {}:{} {} '{}'",
        "warning".bright_yellow(),
        filename.to_string_lossy(),
        number,
        "unrecognized line".bold(),
        line
    )
}

/// A line that didn't classify, with the line quoted and a marker under the
/// point where the most promising rule gave up.
pub fn full_unrecognized(
    filename: &Path,
    number: usize,
    line: &str,
    rule: &str,
    error: &ParsingError,
) -> String {
    let offset = error
        .offset()
        .min(line.len());
    let column = calculate_column_number(line, offset) + 1;

    let width = 3.max(
        number
            .to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

closest was the {} rule: {}
        "#,
        "warning".bright_yellow(),
        filename.to_string_lossy(),
        number,
        column,
        "unrecognized line".bold(),
        ' ',
        '|'.bright_blue(),
        number.bright_blue(),
        '|'.bright_blue(),
        line,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        rule,
        error.message()
    )
    .trim_ascii()
    .to_string()
}

// Zero-origin column, counted in characters not bytes.
fn calculate_column_number(line: &str, offset: usize) -> usize {
    match line.get(..offset) {
        Some(before) => before
            .chars()
            .count(),
        None => offset,
    }
}
