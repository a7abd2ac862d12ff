// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// Lifecycle of the client's connection.
///
/// `Init -> Connecting -> Open -> Closed`. `Closed` is terminal unless a
/// reconnect strategy schedules a new attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
	#[default]
	Init,
	Connecting,
	Open,
	Closed,
}

impl ConnectionState {
	pub fn as_str(&self) -> &'static str {
		match self {
			ConnectionState::Init => "init",
			ConnectionState::Connecting => "connecting",
			ConnectionState::Open => "open",
			ConnectionState::Closed => "closed",
		}
	}

	/// States in which events are accepted.
	pub fn accepts_events(&self) -> bool {
		matches!(self, ConnectionState::Connecting | ConnectionState::Open)
	}
}

impl fmt::Display for ConnectionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
