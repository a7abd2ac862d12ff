// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised while interpreting core values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
	#[error("unknown log level: {0}")]
	UnknownLevel(String),

	#[error("unknown event type: {0}")]
	UnknownEventType(u8),
}
