// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the client's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientStats {
	/// Event frames handed to an open transport.
	pub sent: u64,
	/// Events queued while not OPEN.
	pub buffered: u64,
	/// Events discarded because the connection was CLOSED.
	pub dropped_closed: u64,
	/// Queued events evicted because the pending queue was full.
	pub dropped_overflow: u64,
	pub transport_errors: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
	sent: AtomicU64,
	buffered: AtomicU64,
	dropped_closed: AtomicU64,
	dropped_overflow: AtomicU64,
	transport_errors: AtomicU64,
}

impl StatsCounters {
	pub(crate) fn record_sent(&self) {
		self.sent.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_buffered(&self) {
		self.buffered.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_dropped_closed(&self, count: u64) {
		self.dropped_closed.fetch_add(count, Ordering::Relaxed);
	}

	pub(crate) fn record_dropped_overflow(&self) {
		self.dropped_overflow.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_transport_error(&self) {
		self.transport_errors.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn snapshot(&self) -> ClientStats {
		ClientStats {
			sent: self.sent.load(Ordering::Relaxed),
			buffered: self.buffered.load(Ordering::Relaxed),
			dropped_closed: self.dropped_closed.load(Ordering::Relaxed),
			dropped_overflow: self.dropped_overflow.load(Ordering::Relaxed),
			transport_errors: self.transport_errors.load(Ordering::Relaxed),
		}
	}
}
