//! Line-oriented circuit descriptions.
//!
//! Each non-blank line declares one node:
//!
//! ```text
//! broadcaster -> a, b, c
//! %a -> b
//! &inv -> a
//! ```
//!
//! `%` marks a Toggle, `&` a Memory, and a bare name a Broadcast.
//! Names that only ever appear to the right of `->` are left undeclared
//! and become sinks when the graph is built.

use std::error::Error;
use std::fmt;

use pulse_core::{Declaration, KindMarker};

/// A malformed line in a circuit description. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no `->` separator.
    MissingArrow {
        /// Offending line.
        line: usize,
    },
    /// Nothing (or only a kind marker) to the left of `->`.
    EmptyName {
        /// Offending line.
        line: usize,
    },
    /// An empty entry in the destination list, e.g. `a -> b,,c`.
    EmptyDestination {
        /// Offending line.
        line: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArrow { line } => write!(f, "line {line}: expected '->'"),
            Self::EmptyName { line } => write!(f, "line {line}: missing node name"),
            Self::EmptyDestination { line } => {
                write!(f, "line {line}: empty destination in list")
            }
        }
    }
}

impl Error for ParseError {}

/// Parse a whole description into declarations, in line order.
pub fn parse_declarations(input: &str) -> Result<Vec<Declaration>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| parse_line(i + 1, text))
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Declaration, ParseError> {
    let (lhs, rhs) = text
        .split_once("->")
        .ok_or(ParseError::MissingArrow { line })?;

    let lhs = lhs.trim();
    let (kind, name) = if let Some(name) = lhs.strip_prefix('%') {
        (KindMarker::Toggle, name)
    } else if let Some(name) = lhs.strip_prefix('&') {
        (KindMarker::Memory, name)
    } else {
        (KindMarker::Broadcast, lhs)
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyName { line });
    }

    let destinations = rhs
        .split(',')
        .map(str::trim)
        .map(|dest| {
            if dest.is_empty() {
                Err(ParseError::EmptyDestination { line })
            } else {
                Ok(dest)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Declaration::new(name, kind, destinations))
}
