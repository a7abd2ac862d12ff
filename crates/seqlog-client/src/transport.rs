// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The seam between the client and whatever carries its frames.
//!
//! A connector starts a connection and reports its lifecycle through
//! [`TransportEvents`]. Implementations must not invoke a callback from
//! inside [`Transport::send`] or [`Transport::close`]; the client calls
//! both while holding its state lock.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;

/// An open, ordered, binary-safe channel to the collection service.
pub trait Transport: Send + Sync {
	/// Hands `frame` to the transport without blocking.
	fn send(&self, frame: Bytes) -> Result<()>;

	fn close(&self);
}

/// Lifecycle signals raised by a connection.
pub trait TransportEvents: Send + Sync {
	fn on_open(&self, transport: Arc<dyn Transport>);
	fn on_message(&self, data: Bytes);
	fn on_error(&self, error: String);
	fn on_close(&self);
}

/// Starts connections.
pub trait TransportConnector: Send + Sync {
	/// Begins connecting to `url`. Progress is reported through `events`,
	/// possibly before this call returns. An `Err` means the attempt failed
	/// synchronously and no callback will follow.
	fn connect(&self, url: &str, events: Arc<dyn TransportEvents>) -> Result<()>;
}
