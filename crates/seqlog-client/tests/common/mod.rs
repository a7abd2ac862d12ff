// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory transport that records every frame the client sends.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use seqlog_client::{ClientError, Result, Transport, TransportConnector, TransportEvents};
use seqlog_common_core::LogEvent;
use seqlog_common_frame::{decode, decode_handshake, Handshake};

#[derive(Default)]
pub struct MockTransport {
	pub frames: Mutex<Vec<Bytes>>,
	pub closed: AtomicBool,
	pub fail_sends: AtomicBool,
}

impl MockTransport {
	pub fn frames(&self) -> Vec<Bytes> {
		self.frames.lock().clone()
	}

	pub fn handshake(&self) -> Handshake {
		let frames = self.frames.lock();
		decode_handshake(&frames[0]).unwrap()
	}

	/// Decoded event frames, skipping the handshake.
	pub fn events(&self) -> Vec<LogEvent> {
		self.frames
			.lock()
			.iter()
			.skip(1)
			.map(|frame| decode(frame).unwrap())
			.collect()
	}
}

impl Transport for MockTransport {
	fn send(&self, frame: Bytes) -> Result<()> {
		if self.fail_sends.load(Ordering::SeqCst) {
			return Err(ClientError::transport("mock send failure"));
		}
		self.frames.lock().push(frame);
		Ok(())
	}

	fn close(&self) {
		self.closed.store(true, Ordering::SeqCst);
	}
}

/// Records connection attempts; the test decides when each one opens.
#[derive(Default)]
pub struct MockConnector {
	pub attempts: Mutex<Vec<(String, Arc<dyn TransportEvents>)>>,
	pub connect_count: AtomicUsize,
}

impl MockConnector {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn connect_count(&self) -> usize {
		self.connect_count.load(Ordering::SeqCst)
	}

	fn latest(&self) -> Arc<dyn TransportEvents> {
		let attempts = self.attempts.lock();
		Arc::clone(&attempts.last().unwrap().1)
	}

	pub fn last_url(&self) -> String {
		self.attempts.lock().last().unwrap().0.clone()
	}

	/// Opens the most recent attempt and returns its transport.
	pub fn open(&self) -> Arc<MockTransport> {
		let transport = Arc::new(MockTransport::default());
		self.latest().on_open(transport.clone());
		transport
	}

	pub fn error(&self, message: &str) {
		self.latest().on_error(message.to_string());
	}

	pub fn close(&self) {
		self.latest().on_close();
	}
}

impl TransportConnector for MockConnector {
	fn connect(&self, url: &str, events: Arc<dyn TransportEvents>) -> Result<()> {
		self.connect_count.fetch_add(1, Ordering::SeqCst);
		self.attempts.lock().push((url.to_string(), events));
		Ok(())
	}
}
