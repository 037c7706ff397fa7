use owo_colors::OwoColorize;
use std::path::Path;

use super::messages::generate_error_message;
use neoscribe::formatting::Render;
use neoscribe::language::LoadingError;
use neoscribe::parsing::{lines, ParsingError};
use neoscribe::tables::TableError;

/// Format a parsing error with full details including source code context
pub fn full_parsing_error<'i>(
    error: &ParsingError,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, details) = generate_error_message(error, renderer);
    let i = error.line();

    let code = lines(source)
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error(error: &ParsingError, filename: &Path, renderer: &impl Render) -> String {
    let (problem, _) = generate_error_message(error, renderer);

    format!(
        "{}: {}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        error.line() + 1,
        problem.bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError) -> String {
    if error
        .details
        .is_empty()
    {
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
    } else {
        format!(
            "{}: {}: {} ({})",
            "error".bright_red(),
            error
                .filename
                .display(),
            error
                .problem
                .bold(),
            error.details
        )
    }
}

/// Format a problem with the lookup tables, which prevents any conversion
pub fn concise_table_error(error: &TableError) -> String {
    format!(
        "{}: {}",
        "error".bright_red(),
        error
            .to_string()
            .bold()
    )
}

/// Format any other failure converting a file
pub fn concise_conversion_error(error: &dyn std::error::Error, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        error
            .to_string()
            .bold()
    )
}
