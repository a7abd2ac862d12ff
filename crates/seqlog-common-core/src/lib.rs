// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types shared by every Sequence Log component.
//!
//! This crate provides:
//! - [`LogLevel`] - the closed, totally ordered level enumeration used for filtering
//! - [`LogEvent`] - one STEP_IN / STEP_OUT / MESSAGE record of the trace stream
//! - [`EntryLevel`] - severity of a line shown by the console
//! - [`CallTree`] - rebuilds nested calls per thread from a decoded event stream

pub mod error;
pub mod event;
pub mod level;
pub mod tree;

pub use error::CoreError;
pub use event::{EventKind, EventType, LogEvent};
pub use level::{EntryLevel, LogLevel};
pub use tree::{CallFrame, CallMessage, CallTree};
