// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Sequence Log client.

use seqlog_common_frame::FrameError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
	/// The connection is CLOSED and the event was dropped.
	#[error("transport is closed")]
	TransportClosed,

	/// The event could not be encoded.
	#[error(transparent)]
	Frame(#[from] FrameError),

	/// The transport failed to connect or send.
	#[error("transport error: {0}")]
	Transport(String),

	/// `configure` has not been called yet.
	#[error("client is not configured")]
	NotConfigured,

	/// `configure` may only be called once.
	#[error("client is already configured")]
	AlreadyConfigured,
}

impl ClientError {
	pub fn transport(message: impl Into<String>) -> Self {
		Self::Transport(message.into())
	}
}
