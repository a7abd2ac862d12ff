// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fixed-capacity circular store.
//!
//! Slots are allocated once. Appending past capacity overwrites the oldest
//! slot in place; the logical window only moves its head.

use std::ops::Index;

use crate::error::{BufferError, Result};

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
	slots: Vec<Option<T>>,
	total_appended: u64,
}

impl<T> RingBuffer<T> {
	pub fn new(capacity: usize) -> Result<Self> {
		if capacity == 0 {
			return Err(BufferError::ZeroCapacity);
		}
		let mut slots = Vec::with_capacity(capacity);
		slots.resize_with(capacity, || None);
		Ok(Self {
			slots,
			total_appended: 0,
		})
	}

	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	/// Entries ever appended, evicted ones included.
	pub fn total_appended(&self) -> u64 {
		self.total_appended
	}

	/// Entries ever evicted.
	pub fn total_evicted(&self) -> u64 {
		self.total_appended
			.saturating_sub(self.capacity() as u64)
	}

	/// `min(capacity, total_appended)`.
	pub fn size(&self) -> usize {
		self.total_appended.min(self.capacity() as u64) as usize
	}

	pub fn is_empty(&self) -> bool {
		self.total_appended == 0
	}

	fn head(&self) -> usize {
		if self.total_appended <= self.capacity() as u64 {
			0
		} else {
			(self.total_appended % self.capacity() as u64) as usize
		}
	}

	fn tail_slot(&self) -> usize {
		(self.total_appended % self.capacity() as u64) as usize
	}

	/// Appends at the tail. Returns 1 if the oldest entry was overwritten,
	/// else 0.
	pub fn add(&mut self, entry: T) -> usize {
		let evicted = usize::from(self.total_appended >= self.capacity() as u64);
		let slot = self.tail_slot();
		self.slots[slot] = Some(entry);
		self.total_appended += 1;
		evicted
	}

	/// The `index`-th retained entry, 0 being the oldest.
	pub fn get(&self, index: usize) -> Result<&T> {
		let len = self.size();
		if index >= len {
			return Err(BufferError::IndexOutOfRange { index, len });
		}
		let slot = (self.head() + index) % self.capacity();
		self.slots[slot]
			.as_ref()
			.ok_or(BufferError::IndexOutOfRange { index, len })
	}

	/// Oldest to newest.
	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		(0..self.size()).filter_map(move |i| self.get(i).ok())
	}

	/// Entries `[start, start + count)`, truncated to what is retained.
	pub fn range(&self, start: usize, count: usize) -> impl Iterator<Item = &T> + '_ {
		let end = start.saturating_add(count).min(self.size());
		(start.min(end)..end).filter_map(move |i| self.get(i).ok())
	}
}

impl<T> Index<usize> for RingBuffer<T> {
	type Output = T;

	/// Panics when `index >= size()`; use [`RingBuffer::get`] to handle that.
	fn index(&self, index: usize) -> &T {
		match self.get(index) {
			Ok(entry) => entry,
			Err(e) => panic!("{e}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_zero_capacity_rejected() {
		assert_eq!(
			RingBuffer::<u32>::new(0).unwrap_err(),
			BufferError::ZeroCapacity
		);
	}

	#[test]
	fn test_overwrite_oldest() {
		let mut buffer = RingBuffer::new(3).unwrap();
		assert_eq!(buffer.add("A"), 0);
		assert_eq!(buffer.add("B"), 0);
		assert_eq!(buffer.add("C"), 0);
		assert_eq!(buffer.add("D"), 1);

		assert_eq!(buffer.size(), 3);
		assert_eq!(buffer.total_appended(), 4);
		assert_eq!(buffer.total_evicted(), 1);
		assert_eq!(buffer[0], "B");
		assert_eq!(buffer[1], "C");
		assert_eq!(buffer[2], "D");
		assert_eq!(
			buffer.get(3),
			Err(BufferError::IndexOutOfRange { index: 3, len: 3 })
		);
	}

	#[test]
	fn test_get_before_full() {
		let mut buffer = RingBuffer::new(4).unwrap();
		assert!(buffer.is_empty());
		assert!(buffer.get(0).is_err());
		buffer.add(10);
		buffer.add(11);
		assert_eq!(buffer.get(1), Ok(&11));
		assert!(buffer.get(2).is_err());
	}

	#[test]
	#[should_panic(expected = "index 5 out of range")]
	fn test_index_panics_out_of_range() {
		let mut buffer = RingBuffer::new(2).unwrap();
		buffer.add(1);
		let _value = buffer[5];
	}

	#[test]
	fn test_range_is_clamped() {
		let mut buffer = RingBuffer::new(3).unwrap();
		for n in 0..5 {
			buffer.add(n);
		}
		assert_eq!(buffer.range(1, 10).copied().collect::<Vec<_>>(), vec![3, 4]);
		assert_eq!(buffer.range(7, 2).count(), 0);
		assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
	}

	proptest! {
		#[test]
		fn test_size_and_eviction_count(capacity in 1usize..64, appends in 0usize..256) {
			let mut buffer = RingBuffer::new(capacity).unwrap();
			let mut evicted = 0;
			for n in 0..appends {
				evicted += buffer.add(n);
			}
			prop_assert_eq!(buffer.size(), capacity.min(appends));
			prop_assert_eq!(evicted, appends.saturating_sub(capacity));
			prop_assert_eq!(buffer.total_evicted() as usize, evicted);
		}

		#[test]
		fn test_window_holds_most_recent(capacity in 1usize..32, appends in 1usize..128) {
			let mut buffer = RingBuffer::new(capacity).unwrap();
			for n in 0..appends {
				buffer.add(n);
			}
			let first = appends.saturating_sub(capacity);
			for i in 0..buffer.size() {
				prop_assert_eq!(buffer[i], first + i);
			}
			prop_assert!(buffer.get(buffer.size()).is_err());
		}
	}
}
