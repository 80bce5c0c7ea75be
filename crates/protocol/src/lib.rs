// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

//! Protocol v1 Engine (spec.md §4.7): the envelope and event-type payloads
//! sprites emit, the `LATTICE_EVENT ` line parser, outbox reconciliation,
//! and the resume-file writer.

mod envelope;
mod error;
mod outbox;
mod parse;
mod resume;

pub use envelope::{
    AdjustmentType, CompletionStatus, EventPayload, ProposalScope, ProtocolEvent, SuggestedAdjustment,
    PROTOCOL_VERSION,
};
pub use error::ProtocolError;
pub use outbox::reconcile;
pub use parse::{parse_line, parse_stream, ParsedLine, EVENT_PREFIX};
pub use resume::{ResumeRequest, RESUME_FILE_PATH};
