// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
	#[error("index {index} out of range for buffer of size {len}")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("ring buffer capacity must be greater than 0")]
	ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, BufferError>;
