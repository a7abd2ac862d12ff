// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! WebSocket transport.
//!
//! Each connection runs on its own tokio task. Frames handed to
//! [`Transport::send`] go through an unbounded channel so the caller never
//! waits on the socket.

use std::sync::Arc;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::transport::{Transport, TransportConnector, TransportEvents};

#[derive(Debug, Default, Clone)]
pub struct WsConnector {
	runtime: Option<Handle>,
}

impl WsConnector {
	/// Uses the runtime current at `connect` time.
	pub fn new() -> Self {
		Self::default()
	}

	/// Spawns connections on `runtime`, for callers outside a runtime.
	pub fn with_runtime(runtime: Handle) -> Self {
		Self {
			runtime: Some(runtime),
		}
	}
}

impl TransportConnector for WsConnector {
	fn connect(&self, url: &str, events: Arc<dyn TransportEvents>) -> Result<()> {
		let runtime = match &self.runtime {
			Some(runtime) => runtime.clone(),
			None => Handle::try_current()
				.map_err(|_| ClientError::transport("websocket transport requires a tokio runtime"))?,
		};

		let url = url.to_string();
		runtime.spawn(run_connection(url, events));
		Ok(())
	}
}

struct WsTransport {
	outgoing: Mutex<Option<mpsc::UnboundedSender<Bytes>>>,
}

impl Transport for WsTransport {
	fn send(&self, frame: Bytes) -> Result<()> {
		let outgoing = self.outgoing.lock();
		let Some(tx) = outgoing.as_ref() else {
			return Err(ClientError::TransportClosed);
		};
		tx.send(frame).map_err(|_| ClientError::TransportClosed)
	}

	fn close(&self) {
		self.outgoing.lock().take();
	}
}

async fn run_connection(url: String, events: Arc<dyn TransportEvents>) {
	let ws_stream = match connect_async(url.as_str()).await {
		Ok((stream, _)) => stream,
		Err(e) => {
			events.on_error(format!("failed to connect to {url}: {e}"));
			return;
		}
	};
	debug!(url = %url, "websocket connected");

	let (mut write, mut read) = ws_stream.split();
	let (tx, mut rx) = mpsc::unbounded_channel::<Bytes>();
	events.on_open(Arc::new(WsTransport {
		outgoing: Mutex::new(Some(tx)),
	}));

	loop {
		tokio::select! {
			outgoing = rx.recv() => {
				match outgoing {
					Some(frame) => {
						trace!(len = frame.len(), "sending frame");
						if let Err(e) = write.send(Message::Binary(frame.to_vec())).await {
							events.on_error(format!("websocket send failed: {e}"));
							return;
						}
					}
					None => {
						debug!("transport closed locally");
						let _ = write.send(Message::Close(None)).await;
						return;
					}
				}
			}
			incoming = read.next() => {
				match incoming {
					Some(Ok(Message::Binary(data))) => events.on_message(Bytes::from(data)),
					Some(Ok(Message::Text(text))) => events.on_message(Bytes::from(text.into_bytes())),
					Some(Ok(Message::Close(_))) | None => {
						events.on_close();
						return;
					}
					Some(Ok(_)) => {}
					Some(Err(e)) => {
						events.on_error(format!("websocket error: {e}"));
						return;
					}
				}
			}
		}
	}
}
