//! Country selection: numbered menu with a fixed fallback.

use std::io::{BufRead, Write};
use thiserror::Error;
use trend_core::{DEFAULT_COUNTRY, MENU_COUNTRIES};

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("choice {0} is outside 1..={}", MENU_COUNTRIES.len())]
    OutOfRange(i64),
}

/// Parse a 1-based menu choice.
pub fn parse_choice(input: &str) -> Result<&'static str, SelectionError> {
    let trimmed = input.trim();
    let n: i64 = trimmed
        .parse()
        .map_err(|_| SelectionError::NotANumber(trimmed.to_string()))?;
    if n < 1 || n > MENU_COUNTRIES.len() as i64 {
        return Err(SelectionError::OutOfRange(n));
    }
    Ok(MENU_COUNTRIES[(n - 1) as usize])
}

/// Resolved selection plus the notice to show when the input was rejected.
#[derive(Debug, PartialEq)]
pub struct Selection {
    pub country: &'static str,
    pub notice: Option<String>,
}

/// Parse a choice, substituting the default country on any invalid input.
pub fn select_or_default(input: &str) -> Selection {
    match parse_choice(input) {
        Ok(country) => Selection {
            country,
            notice: None,
        },
        Err(e) => Selection {
            country: DEFAULT_COUNTRY,
            notice: Some(format!("Invalid choice ({e}). Using {DEFAULT_COUNTRY}.")),
        },
    }
}

/// Print the menu, read one line and resolve it. End of input counts as an
/// invalid choice.
pub fn prompt<R: BufRead, W: Write>(mut input: R, mut output: W) -> std::io::Result<Selection> {
    writeln!(output, "Available countries:")?;
    for (i, name) in MENU_COUNTRIES.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, name)?;
    }
    write!(output, "\nPick the number of the country to analyse: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let selection = select_or_default(&line);
    if let Some(notice) = &selection.notice {
        writeln!(output, "{notice}")?;
    }
    Ok(selection)
}
