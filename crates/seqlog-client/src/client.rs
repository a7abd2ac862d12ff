// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Sequence Log client.
//!
//! Connection state, the pending queue and the current transport live behind
//! one mutex so that the OPEN transition, the handshake and the flush of
//! buffered events happen as one step relative to concurrent senders.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::{Arc, Weak};

use bytes::Bytes;
use parking_lot::Mutex;
use seqlog_common_config::ClientConfig;
use seqlog_common_core::{LogEvent, LogLevel};
use seqlog_common_frame::{encode, Handshake};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{ClientError, Result};
use crate::guard::StepGuard;
use crate::reconnect::{NeverReconnect, ReconnectStrategy};
use crate::state::ConnectionState;
use crate::stats::{ClientStats, StatsCounters};
use crate::thread::current_thread_id;
use crate::transport::{Transport, TransportConnector, TransportEvents};
use crate::ws::WsConnector;

const OUTPUT_ENDPOINT: &str = "outputLog";

/// `<service>/outputLog`, keeping any base path on the service URL.
pub fn output_url(service_url: &str) -> std::result::Result<Url, url::ParseError> {
	let mut url = Url::parse(service_url)?;
	let base = url.path().trim_end_matches('/').to_string();
	url.set_path(&format!("{base}/{OUTPUT_ENDPOINT}"));
	Ok(url)
}

/// Builder for constructing a [`SequenceLogClient`].
pub struct SequenceLogClientBuilder {
	connector: Option<Arc<dyn TransportConnector>>,
	reconnect: Arc<dyn ReconnectStrategy>,
	pid: u32,
}

impl SequenceLogClientBuilder {
	pub fn new() -> Self {
		Self {
			connector: None,
			reconnect: Arc::new(NeverReconnect),
			pid: std::process::id(),
		}
	}

	/// Sets the transport. Defaults to the websocket transport.
	pub fn connector(mut self, connector: Arc<dyn TransportConnector>) -> Self {
		self.connector = Some(connector);
		self
	}

	/// Sets the reconnect policy. Defaults to [`NeverReconnect`].
	pub fn reconnect(mut self, strategy: Arc<dyn ReconnectStrategy>) -> Self {
		self.reconnect = strategy;
		self
	}

	/// Overrides the process id sent in the handshake.
	pub fn pid(mut self, pid: u32) -> Self {
		self.pid = pid;
		self
	}

	pub fn build(self) -> SequenceLogClient {
		let connector = self
			.connector
			.unwrap_or_else(|| Arc::new(WsConnector::new()));
		let (status, _) = watch::channel(ConnectionState::Init);

		SequenceLogClient {
			inner: Arc::new(ClientInner {
				connector,
				reconnect: self.reconnect,
				pid: self.pid,
				enabled_levels: AtomicU8::new(0),
				next_seq_no: AtomicU32::new(1),
				shared: Mutex::new(Shared::default()),
				stats: StatsCounters::default(),
				status,
			}),
		}
	}
}

impl Default for SequenceLogClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Default)]
struct Shared {
	state: ConnectionState,
	config: Option<ClientConfig>,
	transport: Option<Arc<dyn Transport>>,
	pending: VecDeque<Bytes>,
	/// Bumped on every connection attempt; callbacks from older attempts
	/// are ignored.
	generation: u64,
	reconnect_attempt: u32,
	/// Set once the reconnect policy declines another attempt.
	gave_up: bool,
	runtime: Option<Handle>,
	shut_down: bool,
}

impl Shared {
	fn retains_while_closed(&self, strategy: &dyn ReconnectStrategy) -> bool {
		strategy.retain_while_closed() && !self.shut_down && !self.gave_up
	}
}

pub(crate) struct ClientInner {
	connector: Arc<dyn TransportConnector>,
	reconnect: Arc<dyn ReconnectStrategy>,
	pid: u32,
	/// One bit per message level, fixed by `configure`.
	enabled_levels: AtomicU8,
	next_seq_no: AtomicU32,
	shared: Mutex<Shared>,
	stats: StatsCounters,
	status: watch::Sender<ConnectionState>,
}

fn level_mask(gate: LogLevel) -> u8 {
	LogLevel::MESSAGE_LEVELS
		.iter()
		.filter(|level| gate.allows(**level))
		.filter_map(|level| level.to_wire())
		.fold(0, |mask, bit| mask | (1 << bit))
}

impl ClientInner {
	fn set_state(&self, shared: &mut Shared, state: ConnectionState) {
		if shared.state != state {
			debug!(from = %shared.state, to = %state, "connection state changed");
		}
		shared.state = state;
		self.status.send_replace(state);
	}

	fn can_emit(&self) -> bool {
		if self.enabled_levels.load(Ordering::Acquire) == 0 {
			return false;
		}
		let shared = self.shared.lock();
		shared.state.accepts_events()
			|| (shared.state == ConnectionState::Closed
				&& shared.retains_while_closed(self.reconnect.as_ref()))
	}

	fn level_enabled(&self, level: LogLevel) -> bool {
		match level.to_wire() {
			Some(bit) => self.enabled_levels.load(Ordering::Acquire) & (1 << bit) != 0,
			None => false,
		}
	}

	fn start_connect(self: &Arc<Self>) {
		let (url, generation) = {
			let mut shared = self.shared.lock();
			if shared.shut_down {
				return;
			}
			let Some(url) = shared.config.as_ref().map(|c| c.service_url.clone()) else {
				return;
			};
			shared.generation += 1;
			let generation = shared.generation;
			self.set_state(&mut shared, ConnectionState::Connecting);
			(url, generation)
		};

		let url = match output_url(&url) {
			Ok(url) => url,
			Err(e) => {
				self.handle_closed(generation, Some(format!("invalid service URL {url}: {e}")));
				return;
			}
		};
		info!(url = %url, generation, "connecting to sequence log service");
		let events = Arc::new(ConnectionEvents {
			client: Arc::downgrade(self),
			generation,
		});
		if let Err(e) = self.connector.connect(url.as_str(), events) {
			self.handle_closed(generation, Some(e.to_string()));
		}
	}

	fn handle_open(self: &Arc<Self>, generation: u64, transport: Arc<dyn Transport>) {
		let failed = {
			let mut shared = self.shared.lock();
			if shared.generation != generation || shared.state != ConnectionState::Connecting {
				debug!(generation, "ignoring open from stale connection");
				transport.close();
				return;
			}
			let Some(config) = shared.config.as_ref() else {
				transport.close();
				return;
			};
			let handshake = Handshake::new(
				self.pid,
				config.user.clone(),
				config.password.as_str(),
				config.file_name.clone(),
				config.level,
			);

			self.set_state(&mut shared, ConnectionState::Open);
			shared.transport = Some(Arc::clone(&transport));
			shared.reconnect_attempt = 0;
			shared.gave_up = false;

			match self.open_locked(&mut shared, transport.as_ref(), &handshake) {
				Ok(flushed) => {
					info!(generation, flushed, "connection open");
					false
				}
				Err(e) => {
					error!(error = %e, "failed to start session");
					self.stats.record_transport_error();
					self.close_locked(&mut shared)
				}
			}
		};

		if failed {
			self.schedule_reconnect();
		}
	}

	/// Sends the handshake, then every pending frame in FIFO order.
	fn open_locked(
		&self,
		shared: &mut Shared,
		transport: &dyn Transport,
		handshake: &Handshake,
	) -> Result<usize> {
		transport.send(handshake.encode()?)?;

		let mut flushed = 0;
		while let Some(frame) = shared.pending.pop_front() {
			transport.send(frame)?;
			self.stats.record_sent();
			flushed += 1;
		}
		Ok(flushed)
	}

	/// Moves to CLOSED. Returns whether a reconnect should be considered.
	fn close_locked(&self, shared: &mut Shared) -> bool {
		if shared.state == ConnectionState::Closed {
			return false;
		}
		if let Some(transport) = shared.transport.take() {
			transport.close();
		}
		self.set_state(shared, ConnectionState::Closed);

		if !self.reconnect.retain_while_closed() && !shared.pending.is_empty() {
			let dropped = shared.pending.len() as u64;
			shared.pending.clear();
			self.stats.record_dropped_closed(dropped);
			debug!(dropped, "discarded pending events on close");
		}
		!shared.shut_down
	}

	fn handle_closed(self: &Arc<Self>, generation: u64, error: Option<String>) {
		let reconnect = {
			let mut shared = self.shared.lock();
			if shared.generation != generation {
				return;
			}
			match &error {
				Some(e) => {
					self.stats.record_transport_error();
					warn!(error = %e, generation, "sequence log transport error");
				}
				None => info!(generation, "sequence log connection closed"),
			}
			self.close_locked(&mut shared)
		};

		if reconnect {
			self.schedule_reconnect();
		}
	}

	fn schedule_reconnect(self: &Arc<Self>) {
		let (attempt, runtime) = {
			let mut shared = self.shared.lock();
			shared.reconnect_attempt += 1;
			(shared.reconnect_attempt, shared.runtime.clone())
		};

		let Some(delay) = self.reconnect.next_delay(attempt) else {
			debug!(attempt, "not reconnecting");
			self.give_up();
			return;
		};
		let Some(runtime) = runtime.or_else(|| Handle::try_current().ok()) else {
			warn!("reconnect requested but no tokio runtime is available");
			self.give_up();
			return;
		};

		debug!(attempt, delay_ms = delay.as_millis() as u64, "scheduling reconnect");
		let client = Arc::downgrade(self);
		runtime.spawn(async move {
			tokio::time::sleep(delay).await;
			if let Some(inner) = client.upgrade() {
				let still_closed = inner.shared.lock().state == ConnectionState::Closed;
				if still_closed {
					inner.start_connect();
				}
			}
		});
	}

	/// No further attempts will be made, so nothing queued can be delivered.
	fn give_up(&self) {
		let mut shared = self.shared.lock();
		if shared.state != ConnectionState::Closed {
			return;
		}
		shared.gave_up = true;
		if !shared.pending.is_empty() {
			let dropped = shared.pending.len() as u64;
			shared.pending.clear();
			self.stats.record_dropped_closed(dropped);
			info!(dropped, "reconnect attempts exhausted, discarded pending events");
		}
	}

	fn enqueue(&self, shared: &mut Shared, frame: Bytes) {
		let max_pending = shared
			.config
			.as_ref()
			.map(|c| c.max_pending)
			.unwrap_or_default();
		if max_pending == 0 {
			self.stats.record_dropped_overflow();
			return;
		}
		while shared.pending.len() >= max_pending {
			shared.pending.pop_front();
			self.stats.record_dropped_overflow();
		}
		shared.pending.push_back(frame);
		self.stats.record_buffered();
	}

	fn dispatch(self: &Arc<Self>, event: &LogEvent) -> Result<()> {
		let frame = encode(event)?;

		let mut shared = self.shared.lock();
		let state = shared.state;
		match state {
			ConnectionState::Init => Err(ClientError::NotConfigured),
			ConnectionState::Connecting => {
				self.enqueue(&mut shared, frame);
				Ok(())
			}
			ConnectionState::Closed if shared.retains_while_closed(self.reconnect.as_ref()) => {
				self.enqueue(&mut shared, frame);
				Ok(())
			}
			ConnectionState::Closed => {
				self.stats.record_dropped_closed(1);
				Err(ClientError::TransportClosed)
			}
			ConnectionState::Open => {
				let Some(transport) = shared.transport.clone() else {
					self.stats.record_dropped_closed(1);
					return Err(ClientError::TransportClosed);
				};
				match transport.send(frame) {
					Ok(()) => {
						self.stats.record_sent();
						Ok(())
					}
					Err(e) => {
						self.stats.record_transport_error();
						warn!(error = %e, "send failed, closing connection");
						let reconnect = self.close_locked(&mut shared);
						drop(shared);
						if reconnect {
							self.schedule_reconnect();
						}
						Err(e)
					}
				}
			}
		}
	}
}

struct ConnectionEvents {
	client: Weak<ClientInner>,
	generation: u64,
}

impl TransportEvents for ConnectionEvents {
	fn on_open(&self, transport: Arc<dyn Transport>) {
		match self.client.upgrade() {
			Some(inner) => inner.handle_open(self.generation, transport),
			None => transport.close(),
		}
	}

	fn on_message(&self, data: Bytes) {
		debug!(len = data.len(), "ignoring message from service");
	}

	fn on_error(&self, error: String) {
		if let Some(inner) = self.client.upgrade() {
			inner.handle_closed(self.generation, Some(error));
		}
	}

	fn on_close(&self) {
		if let Some(inner) = self.client.upgrade() {
			inner.handle_closed(self.generation, None);
		}
	}
}

/// Streams call-trace events to a collection service.
///
/// Cheap to clone; clones share one connection.
///
/// # Example
///
/// ```ignore
/// use seqlog_client::{ClientConfig, LogLevel, SequenceLogClient};
///
/// let client = SequenceLogClient::builder().build();
/// client.configure(ClientConfig::new("ws://127.0.0.1:8080", "app.slog", LogLevel::Info))?;
///
/// let call = client.step_in("Server", "accept");
/// call.i("accepted connection");
/// // STEP_OUT is sent when `call` is dropped
/// ```
#[derive(Clone)]
pub struct SequenceLogClient {
	inner: Arc<ClientInner>,
}

impl SequenceLogClient {
	pub fn builder() -> SequenceLogClientBuilder {
		SequenceLogClientBuilder::new()
	}

	/// A client using `connector` and the default reconnect policy.
	pub fn new(connector: Arc<dyn TransportConnector>) -> Self {
		Self::builder().connector(connector).build()
	}

	/// Fixes the level gate and, unless the level is `None`, starts
	/// connecting. May be called once.
	pub fn configure(&self, config: ClientConfig) -> Result<()> {
		let level = config.level;
		{
			let mut shared = self.inner.shared.lock();
			if shared.config.is_some() {
				return Err(ClientError::AlreadyConfigured);
			}
			shared.runtime = Handle::try_current().ok();
			shared.config = Some(config);
		}
		self.inner
			.enabled_levels
			.store(level_mask(level), Ordering::Release);

		if level == LogLevel::None {
			info!("sequence log muted, not connecting");
			return Ok(());
		}

		self.inner.start_connect();
		Ok(())
	}

	pub fn state(&self) -> ConnectionState {
		self.inner.shared.lock().state
	}

	/// Watches connection state changes.
	pub fn subscribe_status(&self) -> watch::Receiver<ConnectionState> {
		self.inner.status.subscribe()
	}

	/// Whether building an event is worth it at all.
	///
	/// False when muted or when nothing would be sent or buffered.
	pub fn can_emit(&self) -> bool {
		self.inner.can_emit()
	}

	/// Whether a message at `level` would be sent.
	pub fn is_enabled(&self, level: LogLevel) -> bool {
		self.inner.level_enabled(level) && self.inner.can_emit()
	}

	/// Next sequence number; distinct across concurrent callers, never 0.
	pub fn allocate_seq_no(&self) -> u32 {
		loop {
			let seq_no = self.inner.next_seq_no.fetch_add(1, Ordering::Relaxed);
			if seq_no != 0 {
				return seq_no;
			}
		}
	}

	/// Sends, buffers or drops `event` depending on the connection state.
	/// Failures are counted and logged, never returned.
	pub fn send_item(&self, event: LogEvent) {
		if let Err(e) = self.inner.dispatch(&event) {
			match e {
				ClientError::TransportClosed | ClientError::NotConfigured => {
					debug!(seq_no = event.seq_no, error = %e, "event dropped");
				}
				_ => warn!(seq_no = event.seq_no, error = %e, "event dropped"),
			}
		}
	}

	/// Like [`send_item`](Self::send_item) but reports why an event was
	/// not delivered or buffered.
	pub fn try_send_item(&self, event: LogEvent) -> Result<()> {
		self.inner.dispatch(&event)
	}

	/// Opens a traced call on the current thread.
	///
	/// The returned guard sends STEP_OUT when dropped. A muted client hands
	/// out an inert guard without allocating a sequence number.
	pub fn step_in(&self, class_name: &str, func_name: &str) -> StepGuard {
		if !self.can_emit() {
			return StepGuard::inert();
		}
		let seq_no = self.allocate_seq_no();
		let thread_id = current_thread_id();
		self.send_item(LogEvent::step_in(seq_no, thread_id, class_name, func_name));
		StepGuard::active(self.clone(), seq_no, thread_id)
	}

	/// Sends a MESSAGE for `seq_no` if `level` passes the gate.
	pub fn message(&self, seq_no: u32, thread_id: u32, level: LogLevel, message: impl Into<String>) {
		if self.is_enabled(level) {
			self.send_item(LogEvent::message(seq_no, thread_id, level, message));
		}
	}

	pub fn stats(&self) -> ClientStats {
		self.inner.stats.snapshot()
	}

	/// Events waiting for the connection to open.
	pub fn pending_len(&self) -> usize {
		self.inner.shared.lock().pending.len()
	}

	/// Closes the connection for good; no reconnect follows.
	pub fn close(&self) {
		let mut shared = self.inner.shared.lock();
		shared.shut_down = true;
		shared.generation += 1;
		self.inner.close_locked(&mut shared);
		if !shared.pending.is_empty() {
			let dropped = shared.pending.len() as u64;
			shared.pending.clear();
			self.inner.stats.record_dropped_closed(dropped);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::HashSet;

	struct NoopConnector;

	impl TransportConnector for NoopConnector {
		fn connect(&self, _url: &str, _events: Arc<dyn TransportEvents>) -> Result<()> {
			Ok(())
		}
	}

	struct FailingConnector;

	impl TransportConnector for FailingConnector {
		fn connect(&self, _url: &str, _events: Arc<dyn TransportEvents>) -> Result<()> {
			Err(ClientError::transport("refused"))
		}
	}

	fn config(level: LogLevel) -> ClientConfig {
		ClientConfig::new("ws://127.0.0.1:1", "test.slog", level)
	}

	#[test]
	fn test_level_mask() {
		assert_eq!(level_mask(LogLevel::All), 0b1111);
		assert_eq!(level_mask(LogLevel::Debug), 0b1111);
		assert_eq!(level_mask(LogLevel::Warn), 0b1100);
		assert_eq!(level_mask(LogLevel::Error), 0b1000);
		assert_eq!(level_mask(LogLevel::None), 0);
	}

	fn any_level() -> impl Strategy<Value = LogLevel> {
		prop_oneof![
			Just(LogLevel::All),
			Just(LogLevel::Debug),
			Just(LogLevel::Info),
			Just(LogLevel::Warn),
			Just(LogLevel::Error),
			Just(LogLevel::None),
		]
	}

	proptest! {
		#[test]
		fn test_gate_matches_level_order(gate in any_level(), level in any_level()) {
			let client = SequenceLogClient::new(Arc::new(NoopConnector));
			client.configure(config(gate)).unwrap();
			let expected = level.to_wire().is_some() && gate.allows(level);
			prop_assert_eq!(client.is_enabled(level), expected);
		}
	}

	#[test]
	fn test_unconfigured_client_drops() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		assert_eq!(client.state(), ConnectionState::Init);
		assert!(!client.can_emit());
		assert!(matches!(
			client.try_send_item(LogEvent::step_out(1, 1)),
			Err(ClientError::NotConfigured)
		));
	}

	#[test]
	fn test_configure_twice_rejected() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		client.configure(config(LogLevel::All)).unwrap();
		assert!(matches!(
			client.configure(config(LogLevel::All)),
			Err(ClientError::AlreadyConfigured)
		));
	}

	#[test]
	fn test_connecting_buffers() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		client.configure(config(LogLevel::All)).unwrap();
		assert_eq!(client.state(), ConnectionState::Connecting);
		assert!(client.can_emit());

		client.send_item(LogEvent::step_in(1, 1, "A", "f"));
		client.send_item(LogEvent::step_out(1, 1));
		assert_eq!(client.pending_len(), 2);
		assert_eq!(client.stats().buffered, 2);
	}

	#[test]
	fn test_synchronous_connect_failure_closes() {
		let client = SequenceLogClient::new(Arc::new(FailingConnector));
		client.configure(config(LogLevel::All)).unwrap();
		assert_eq!(client.state(), ConnectionState::Closed);
		assert!(!client.can_emit());
		assert_eq!(client.stats().transport_errors, 1);
		assert!(matches!(
			client.try_send_item(LogEvent::step_out(1, 1)),
			Err(ClientError::TransportClosed)
		));
	}

	#[test]
	fn test_pending_queue_is_bounded() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		client
			.configure(config(LogLevel::All).with_max_pending(2))
			.unwrap();
		for seq in 1..=3 {
			client.send_item(LogEvent::step_out(seq, 1));
		}
		assert_eq!(client.pending_len(), 2);
		assert_eq!(client.stats().dropped_overflow, 1);
	}

	#[test]
	fn test_close_discards_pending() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		client.configure(config(LogLevel::All)).unwrap();
		client.send_item(LogEvent::step_out(1, 1));
		client.close();
		assert_eq!(client.state(), ConnectionState::Closed);
		assert_eq!(client.pending_len(), 0);
		assert_eq!(client.stats().dropped_closed, 1);
	}

	#[test]
	fn test_oversized_event_is_rejected_not_buffered() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		client.configure(config(LogLevel::All)).unwrap();
		let long = "x".repeat(seqlog_common_frame::MAX_FIELD_BYTES + 1);
		let err = client
			.try_send_item(LogEvent::message(1, 1, LogLevel::Info, long))
			.unwrap_err();
		assert!(matches!(err, ClientError::Frame(_)));
		assert_eq!(client.pending_len(), 0);
	}

	#[test]
	fn test_seq_numbers_start_at_one_and_skip_zero() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		assert_eq!(client.allocate_seq_no(), 1);
		assert_eq!(client.allocate_seq_no(), 2);

		client
			.inner
			.next_seq_no
			.store(u32::MAX, Ordering::Relaxed);
		assert_eq!(client.allocate_seq_no(), u32::MAX);
		assert_eq!(client.allocate_seq_no(), 1);
	}

	#[test]
	fn test_concurrent_seq_numbers_are_distinct() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let client = client.clone();
				std::thread::spawn(move || (0..1000).map(|_| client.allocate_seq_no()).collect::<Vec<_>>())
			})
			.collect();

		let mut seen = HashSet::new();
		for handle in handles {
			for seq_no in handle.join().unwrap() {
				assert!(seen.insert(seq_no), "duplicate seq_no {seq_no}");
			}
		}
		assert_eq!(seen.len(), 8000);
	}

	#[test]
	fn test_status_channel_tracks_state() {
		let client = SequenceLogClient::new(Arc::new(NoopConnector));
		let status = client.subscribe_status();
		assert_eq!(*status.borrow(), ConnectionState::Init);
		client.configure(config(LogLevel::Info)).unwrap();
		assert_eq!(*status.borrow(), ConnectionState::Connecting);
	}

	#[test]
	fn test_output_url() {
		assert_eq!(
			output_url("ws://127.0.0.1:8080").unwrap().as_str(),
			"ws://127.0.0.1:8080/outputLog"
		);
		assert_eq!(
			output_url("wss://logs.example.com/seqlog/").unwrap().as_str(),
			"wss://logs.example.com/seqlog/outputLog"
		);
		assert!(output_url("not a url").is_err());
	}

	#[test]
	fn test_exhausted_backoff_stops_retaining() {
		let client = SequenceLogClient::builder()
			.connector(Arc::new(FailingConnector))
			.reconnect(Arc::new(crate::reconnect::ExponentialBackoff {
				max_attempts: Some(0),
				retain_while_closed: true,
				..Default::default()
			}))
			.build();
		client.configure(config(LogLevel::All)).unwrap();

		assert_eq!(client.state(), ConnectionState::Closed);
		assert!(!client.can_emit());
		assert!(!client.is_enabled(LogLevel::Error));
		assert!(matches!(
			client.try_send_item(LogEvent::step_out(1, 1)),
			Err(ClientError::TransportClosed)
		));
		assert_eq!(client.pending_len(), 0);
		assert_eq!(client.stats().dropped_closed, 1);
	}
}
