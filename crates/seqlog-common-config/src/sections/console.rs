// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Console configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::client::DEFAULT_SERVICE_URL;

pub const DEFAULT_CAPACITY: usize = 10_000;
pub const DEFAULT_TICK_MS: u64 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfigLayer {
	pub service_url: Option<String>,
	pub capacity: Option<usize>,
	pub tick_ms: Option<u64>,
	pub log_file: Option<PathBuf>,
}

impl ConsoleConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.service_url.is_some() {
			self.service_url = other.service_url;
		}
		if other.capacity.is_some() {
			self.capacity = other.capacity;
		}
		if other.tick_ms.is_some() {
			self.tick_ms = other.tick_ms;
		}
		if other.log_file.is_some() {
			self.log_file = other.log_file;
		}
	}

	pub fn finalize(self) -> ConsoleConfig {
		ConsoleConfig {
			service_url: self
				.service_url
				.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
			capacity: self.capacity.unwrap_or(DEFAULT_CAPACITY),
			tick_ms: self.tick_ms.unwrap_or(DEFAULT_TICK_MS),
			log_file: self.log_file,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
	pub service_url: String,
	/// Ring buffer capacity in lines.
	pub capacity: usize,
	/// Redraw interval.
	pub tick_ms: u64,
	/// Where the console writes its own diagnostics; `None` means the
	/// default under the XDG state directory.
	pub log_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
	fn default() -> Self {
		ConsoleConfigLayer::default().finalize()
	}
}
