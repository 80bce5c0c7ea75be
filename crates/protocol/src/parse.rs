// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Line-oriented parser for the sprite stdout stream (spec.md §4.7). Pure
//! and synchronous: it has no knowledge of where the lines come from.

use crate::envelope::ProtocolEvent;
use crate::error::ProtocolError;

pub const EVENT_PREFIX: &str = "LATTICE_EVENT ";

/// One line of sprite stdout, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// A decoded protocol event.
    Event(ProtocolEvent),
    /// A line without the `LATTICE_EVENT ` prefix, passed through verbatim.
    PlainText(String),
}

/// Parse one stdout line. Lines without the event prefix pass through as
/// plain text; lines with the prefix but malformed JSON are an error rather
/// than silently dropped or passed through, since a sprite bug there should
/// be visible.
pub fn parse_line(line: &str) -> Result<ParsedLine, ProtocolError> {
    match line.strip_prefix(EVENT_PREFIX) {
        Some(json) => Ok(ParsedLine::Event(serde_json::from_str(json)?)),
        None => Ok(ParsedLine::PlainText(line.to_string())),
    }
}

/// Parse a full stdout stream, one event per matching line. Non-matching
/// lines are dropped from the returned event list but are available to a
/// caller that also wants the plain-text passthrough via [`parse_line`].
pub fn parse_stream(stdout: &str) -> Result<Vec<ProtocolEvent>, ProtocolError> {
    let mut events = Vec::new();
    for line in stdout.lines() {
        if let ParsedLine::Event(event) = parse_line(line)? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
