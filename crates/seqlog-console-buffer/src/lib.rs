// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded storage for the console's recent log lines.
//!
//! [`RingBuffer`] is the single-threaded store with O(1) append and random
//! access; [`SharedRingBuffer`] wraps it for one writer and many readers.

pub mod entry;
pub mod error;
pub mod ring;
pub mod shared;

pub use entry::RingEntry;
pub use error::{BufferError, Result};
pub use ring::RingBuffer;
pub use shared::{BufferSnapshot, SharedRingBuffer};

/// Default capacity in lines.
pub const DEFAULT_CAPACITY: usize = 10_000;
