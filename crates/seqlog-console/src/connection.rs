// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Receive side: one websocket to the service's log endpoint feeding the
//! ring buffer.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use parking_lot::RwLock;
use seqlog_common_frame::{ConsoleMessage, ConsoleProtocolError, LogFileInfo};
use seqlog_console_buffer::{RingEntry, SharedRingBuffer};
use tokio::sync::watch;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

const LOG_ENDPOINT: &str = "getLog";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
	#[default]
	Connecting,
	Connected,
	Disconnected,
}

impl ConnectionStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			ConnectionStatus::Connecting => "connecting",
			ConnectionStatus::Connected => "connected",
			ConnectionStatus::Disconnected => "disconnected",
		}
	}
}

impl fmt::Display for ConnectionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Latest file listing sent by the service.
#[derive(Debug, Clone, Default)]
pub struct FileListing {
	inner: Arc<RwLock<Vec<LogFileInfo>>>,
}

impl FileListing {
	pub fn replace(&self, files: Vec<LogFileInfo>) {
		*self.inner.write() = files;
	}

	pub fn files(&self) -> Vec<LogFileInfo> {
		self.inner.read().clone()
	}
}

/// `<service>/getLog`, keeping any base path on the service URL.
pub fn log_url(service_url: &str) -> Result<Url, url::ParseError> {
	let mut url = Url::parse(service_url)?;
	let base = url.path().trim_end_matches('/').to_string();
	url.set_path(&format!("{base}/{LOG_ENDPOINT}"));
	Ok(url)
}

/// Applies one text message from the service.
pub fn apply_message(
	text: &str,
	buffer: &SharedRingBuffer,
	files: &FileListing,
) -> Result<(), ConsoleProtocolError> {
	match ConsoleMessage::parse(text)? {
		ConsoleMessage::Log { level, message } => {
			buffer.add(RingEntry::new(level, message));
		}
		ConsoleMessage::FileList { files: listing } => {
			debug!(count = listing.len(), "received file listing");
			files.replace(listing);
		}
	}
	Ok(())
}

/// Runs one connection until the service closes it or it fails. There is
/// no reconnect; the final status is always `Disconnected`.
pub async fn run(
	url: Url,
	buffer: SharedRingBuffer,
	files: FileListing,
	status: watch::Sender<ConnectionStatus>,
) {
	status.send_replace(ConnectionStatus::Connecting);

	let mut ws_stream = match connect_async(url.as_str()).await {
		Ok((stream, _)) => stream,
		Err(e) => {
			warn!(url = %url, error = %e, "failed to connect to service");
			buffer.add(RingEntry::system(format!("failed to connect to {url}: {e}")));
			status.send_replace(ConnectionStatus::Disconnected);
			return;
		}
	};

	info!(url = %url, "connected to service");
	buffer.add(RingEntry::system(format!("connected to {url}")));
	status.send_replace(ConnectionStatus::Connected);

	while let Some(incoming) = ws_stream.next().await {
		let text = match incoming {
			Ok(Message::Text(text)) => text,
			Ok(Message::Binary(data)) => match String::from_utf8(data) {
				Ok(text) => text,
				Err(e) => {
					warn!(error = %e, "dropping non UTF-8 binary message");
					continue;
				}
			},
			Ok(Message::Close(frame)) => {
				debug!(?frame, "service closed the connection");
				break;
			}
			Ok(_) => continue,
			Err(e) => {
				warn!(error = %e, "websocket error");
				buffer.add(RingEntry::system(format!("connection error: {e}")));
				break;
			}
		};

		if let Err(e) = apply_message(&text, &buffer, &files) {
			warn!(error = %e, "ignoring unrecognized service message");
		}
	}

	info!(url = %url, "disconnected from service");
	buffer.add(RingEntry::system(format!("disconnected from {url}")));
	status.send_replace(ConnectionStatus::Disconnected);
}
