// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Codec and protocol error types.

use thiserror::Error;

/// Result type alias for frame operations.
pub type Result<T, E = FrameError> = std::result::Result<T, E>;

/// Errors raised while encoding or decoding binary frames.
#[derive(Debug, Error)]
pub enum FrameError {
	/// Structural mismatch: wrong record length, unknown enum byte,
	/// truncated field, invalid UTF-8 or trailing bytes.
	#[error("malformed frame: {0}")]
	MalformedFrame(String),

	/// A text field exceeds the encodable maximum.
	#[error("field {field} too long: {len} bytes (max {max})")]
	FieldTooLong {
		field: &'static str,
		len: usize,
		max: usize,
	},

	/// I/O error surfaced by a framed stream.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl FrameError {
	pub fn malformed(reason: impl Into<String>) -> Self {
		Self::MalformedFrame(reason.into())
	}

	pub fn is_malformed(&self) -> bool {
		matches!(self, FrameError::MalformedFrame(_))
	}

	pub fn is_field_too_long(&self) -> bool {
		matches!(self, FrameError::FieldTooLong { .. })
	}
}

/// Errors raised while parsing service-to-console messages.
#[derive(Debug, Error)]
pub enum ConsoleProtocolError {
	#[error("unknown console command: {0:?}")]
	UnknownCommand(String),

	#[error("invalid level code: {0:?}")]
	InvalidLevel(String),

	#[error("invalid console JSON: {0}")]
	Json(#[from] serde_json::Error),
}
