// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Framing of a byte stream into [`LogEvent`]s.
//!
//! WebSocket transports deliver one frame per message and call
//! [`decode`](crate::decode) directly. Byte-stream transports (files,
//! sockets) use [`LogEventCodec`] with `tokio_util::codec::Framed`.

use bytes::{Buf, BytesMut};
use seqlog_common_core::LogEvent;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::codec::{self, HEADER_LEN};
use crate::error::{FrameError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventCodec;

impl LogEventCodec {
	pub fn new() -> Self {
		Self
	}
}

impl Decoder for LogEventCodec {
	type Item = LogEvent;
	type Error = FrameError;

	fn decode(&mut self, src: &mut BytesMut) -> Result<Option<LogEvent>> {
		if src.len() < 2 {
			return Ok(None);
		}

		let record_len = u16::from_be_bytes([src[0], src[1]]) as usize;
		if record_len < HEADER_LEN {
			return Err(FrameError::malformed(format!(
				"record length {record_len} shorter than header"
			)));
		}

		if src.len() < record_len {
			src.reserve(record_len - src.len());
			return Ok(None);
		}

		let frame = src.split_to(record_len);
		trace!(record_len, buffered = src.remaining(), "decoding frame");
		codec::decode(&frame).map(Some)
	}
}

impl Encoder<LogEvent> for LogEventCodec {
	type Error = FrameError;

	fn encode(&mut self, item: LogEvent, dst: &mut BytesMut) -> Result<()> {
		codec::encode_into(&item, dst)
	}
}
