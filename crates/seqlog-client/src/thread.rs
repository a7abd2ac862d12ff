// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logical thread ids carried in every frame.

use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_THREAD_ID: AtomicU32 = AtomicU32::new(1);

thread_local! {
	static THREAD_ID: u32 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Stable id of the calling thread, assigned on first use.
pub fn current_thread_id() -> u32 {
	THREAD_ID.with(|id| *id)
}
