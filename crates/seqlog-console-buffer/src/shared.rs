// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ring buffer shared between the receive task and the renderer.

use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::entry::RingEntry;
use crate::error::Result;
use crate::ring::RingBuffer;

/// Counters read together under one lock, so size and totals never tear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferSnapshot {
	pub size: usize,
	pub total_appended: u64,
	pub total_evicted: u64,
}

impl BufferSnapshot {
	/// Entries evicted since `earlier` was taken.
	pub fn evicted_since(&self, earlier: &BufferSnapshot) -> usize {
		self.total_evicted.saturating_sub(earlier.total_evicted) as usize
	}

	/// Entries appended since `earlier` was taken.
	pub fn appended_since(&self, earlier: &BufferSnapshot) -> usize {
		self.total_appended.saturating_sub(earlier.total_appended) as usize
	}
}

/// One writer appends, any number of readers copy out windows.
#[derive(Clone)]
pub struct SharedRingBuffer {
	inner: Arc<RwLock<RingBuffer<RingEntry>>>,
}

impl SharedRingBuffer {
	pub fn new(capacity: usize) -> Result<Self> {
		Ok(Self {
			inner: Arc::new(RwLock::new(RingBuffer::new(capacity)?)),
		})
	}

	/// Appends `entry`; returns the eviction count (0 or 1).
	pub fn add(&self, entry: RingEntry) -> usize {
		let evicted = self.inner.write().add(entry);
		trace!(evicted, "appended console line");
		evicted
	}

	pub fn capacity(&self) -> usize {
		self.inner.read().capacity()
	}

	pub fn size(&self) -> usize {
		self.inner.read().size()
	}

	pub fn snapshot(&self) -> BufferSnapshot {
		snapshot_of(&self.inner.read())
	}

	pub fn get(&self, index: usize) -> Result<RingEntry> {
		self.inner.read().get(index).cloned()
	}

	/// Takes the counters, lets `select` pick a range from them, and copies
	/// that range, all under one read lock. The returned snapshot describes
	/// exactly the entries returned.
	pub fn read_window<F>(&self, select: F) -> (BufferSnapshot, Range<usize>, Vec<RingEntry>)
	where
		F: FnOnce(&BufferSnapshot) -> Range<usize>,
	{
		let buffer = self.inner.read();
		let snapshot = snapshot_of(&buffer);
		let range = select(&snapshot);
		let lines = buffer.range(range.start, range.len()).cloned().collect();
		(snapshot, range, lines)
	}
}

fn snapshot_of(buffer: &RingBuffer<RingEntry>) -> BufferSnapshot {
	BufferSnapshot {
		size: buffer.size(),
		total_appended: buffer.total_appended(),
		total_evicted: buffer.total_evicted(),
	}
}
