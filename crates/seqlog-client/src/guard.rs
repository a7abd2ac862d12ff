// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use seqlog_common_core::{LogEvent, LogLevel};

use crate::client::SequenceLogClient;

/// An open traced call.
///
/// Messages logged through the guard carry its sequence number. STEP_OUT is
/// sent exactly once, by [`step_out`](Self::step_out) or on drop.
#[must_use = "dropping the guard ends the traced call immediately"]
pub struct StepGuard {
	client: Option<SequenceLogClient>,
	seq_no: u32,
	thread_id: u32,
}

impl StepGuard {
	pub(crate) fn active(client: SequenceLogClient, seq_no: u32, thread_id: u32) -> Self {
		Self {
			client: Some(client),
			seq_no,
			thread_id,
		}
	}

	/// A guard that logs nothing.
	pub fn inert() -> Self {
		Self {
			client: None,
			seq_no: 0,
			thread_id: 0,
		}
	}

	pub fn is_active(&self) -> bool {
		self.client.is_some()
	}

	/// Sequence number of the call, `None` for an inert guard.
	pub fn seq_no(&self) -> Option<u32> {
		self.client.as_ref().map(|_| self.seq_no)
	}

	pub fn message(&self, level: LogLevel, message: impl Into<String>) {
		if let Some(client) = &self.client {
			client.message(self.seq_no, self.thread_id, level, message);
		}
	}

	pub fn d(&self, message: impl Into<String>) {
		self.message(LogLevel::Debug, message);
	}

	pub fn i(&self, message: impl Into<String>) {
		self.message(LogLevel::Info, message);
	}

	pub fn w(&self, message: impl Into<String>) {
		self.message(LogLevel::Warn, message);
	}

	pub fn e(&self, message: impl Into<String>) {
		self.message(LogLevel::Error, message);
	}

	/// Ends the call now.
	pub fn step_out(mut self) {
		self.finish();
	}

	fn finish(&mut self) {
		if let Some(client) = self.client.take() {
			client.send_item(LogEvent::step_out(self.seq_no, self.thread_id));
		}
	}
}

impl Drop for StepGuard {
	fn drop(&mut self) {
		self.finish();
	}
}

impl std::fmt::Debug for StepGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StepGuard")
			.field("seq_no", &self.seq_no())
			.field("thread_id", &self.thread_id)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_inert_guard_is_silent() {
		let guard = StepGuard::inert();
		assert!(!guard.is_active());
		assert_eq!(guard.seq_no(), None);
		guard.d("nothing");
		guard.step_out();
	}
}
