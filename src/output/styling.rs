use std::fmt::Display;

use console::{style, StyledObject};

// Every helper takes anything printable so counts and paths need no
// `to_string()` at the call site.

/// Phase still running.
pub fn pending(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).yellow().bright()
}

/// Phase finished.
pub fn done(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).green().bright()
}

/// Section headings and their emoji.
pub fn heading(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).bright()
}

/// Left-hand labels and secondary text.
pub fn label(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).dim()
}

/// Dataset sizes.
pub fn count(value: impl Display) -> StyledObject<String> {
    style(value.to_string()).yellow().bright()
}

/// MTTR, MTBF and the report path.
pub fn metric(value: impl Display) -> StyledObject<String> {
    style(value.to_string()).cyan()
}

pub fn banner(text: impl Display) -> StyledObject<String> {
    style(text.to_string()).magenta().bold()
}
