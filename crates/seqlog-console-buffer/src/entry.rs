// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use seqlog_common_core::EntryLevel;
use serde::{Deserialize, Serialize};

/// One line held by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingEntry {
	pub level: EntryLevel,
	pub message: String,
}

impl RingEntry {
	pub fn new(level: EntryLevel, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
		}
	}

	pub fn system(message: impl Into<String>) -> Self {
		Self::new(EntryLevel::System, message)
	}
}
