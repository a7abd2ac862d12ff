// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sequence Log client.
//!
//! Streams STEP_IN / MESSAGE / STEP_OUT events to a collection service.
//! Events emitted before the connection opens are buffered and flushed, in
//! order, right after the handshake.
//!
//! # Example
//!
//! ```ignore
//! use seqlog_client::{ClientConfig, LogLevel, SequenceLogClient};
//!
//! let client = SequenceLogClient::builder().build();
//! client.configure(ClientConfig::new("ws://127.0.0.1:8080", "app.slog", LogLevel::Warn))?;
//!
//! let call = client.step_in("Parser", "parse");
//! call.d("suppressed, below WARN");
//! call.e("unexpected token");
//! ```

pub mod client;
pub mod error;
pub mod guard;
pub mod reconnect;
pub mod state;
pub mod stats;
pub mod thread;
pub mod transport;
pub mod ws;

pub use client::{output_url, SequenceLogClient, SequenceLogClientBuilder};
pub use error::{ClientError, Result};
pub use guard::StepGuard;
pub use reconnect::{ExponentialBackoff, NeverReconnect, ReconnectStrategy};
pub use state::ConnectionState;
pub use stats::ClientStats;
pub use thread::current_thread_id;
pub use transport::{Transport, TransportConnector, TransportEvents};
pub use ws::WsConnector;

pub use seqlog_common_config::ClientConfig;
pub use seqlog_common_core::{LogEvent, LogLevel};
