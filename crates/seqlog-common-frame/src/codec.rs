// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event frame layout.
//!
//! ```text
//! u16 recordLength         total bytes including this field
//! u32 seqNo
//! u8  type                 0=STEP_IN, 1=STEP_OUT, 2=MESSAGE
//! u32 threadId
//! -- STEP_IN --
//! u32 reserved(0) ; u16 classNameLen ; classNameLen bytes
//! u32 reserved(0) ; u16 funcNameLen  ; funcNameLen bytes
//! -- STEP_OUT --
//! (no payload)
//! -- MESSAGE --
//! u8 level ; u32 reserved(0) ; u16 messageLen ; messageLen bytes
//! ```
//!
//! All integers are big-endian; text is UTF-8 with an explicit length.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use seqlog_common_core::{EventKind, EventType, LogEvent, LogLevel};

use crate::error::{FrameError, Result};
use crate::utf8::utf8_len;

/// Largest encodable text field, in bytes.
///
/// Chosen so that a STEP_IN carrying two maximal names still fits the
/// 16-bit record length.
pub const MAX_FIELD_BYTES: usize = 16 * 1024;

/// Bytes before the type-specific payload.
pub const HEADER_LEN: usize = 2 + 4 + 1 + 4;

const RESERVED_ID: u32 = 0;

/// Encoded size of `event` without building it.
pub fn encoded_len(event: &LogEvent) -> usize {
	HEADER_LEN
		+ match &event.kind {
			EventKind::StepIn {
				class_name,
				func_name,
			} => 2 * (4 + 2) + utf8_len(class_name) + utf8_len(func_name),
			EventKind::StepOut => 0,
			EventKind::Message { message, .. } => 1 + 4 + 2 + utf8_len(message),
		}
}

/// Serializes `event` into one length-prefixed frame.
pub fn encode(event: &LogEvent) -> Result<Bytes> {
	let mut buf = BytesMut::with_capacity(encoded_len(event));
	encode_into(event, &mut buf)?;
	Ok(buf.freeze())
}

/// Appends the frame for `event` to `dst`.
///
/// Nothing is written when validation fails.
pub fn encode_into(event: &LogEvent, dst: &mut BytesMut) -> Result<()> {
	validate(event)?;

	let len = encoded_len(event);
	dst.reserve(len);
	dst.put_u16(len as u16);
	dst.put_u32(event.seq_no);
	dst.put_u8(event.event_type().to_wire());
	dst.put_u32(event.thread_id);

	match &event.kind {
		EventKind::StepIn {
			class_name,
			func_name,
		} => {
			put_text(dst, class_name);
			put_text(dst, func_name);
		}
		EventKind::StepOut => {}
		EventKind::Message { level, message } => {
			// validate() guarantees a concrete level
			dst.put_u8(level.to_wire().unwrap_or_default());
			put_text(dst, message);
		}
	}

	Ok(())
}

fn validate(event: &LogEvent) -> Result<()> {
	match &event.kind {
		EventKind::StepIn {
			class_name,
			func_name,
		} => {
			check_field("className", class_name)?;
			check_field("funcName", func_name)
		}
		EventKind::StepOut => Ok(()),
		EventKind::Message { level, message } => {
			if level.to_wire().is_none() {
				return Err(FrameError::malformed(format!(
					"message level {level} is not a message level"
				)));
			}
			check_field("message", message)
		}
	}
}

fn check_field(field: &'static str, text: &str) -> Result<()> {
	let len = utf8_len(text);
	if len > MAX_FIELD_BYTES {
		return Err(FrameError::FieldTooLong {
			field,
			len,
			max: MAX_FIELD_BYTES,
		});
	}
	Ok(())
}

fn put_text(dst: &mut BytesMut, text: &str) {
	dst.put_u32(RESERVED_ID);
	dst.put_u16(utf8_len(text) as u16);
	dst.put_slice(text.as_bytes());
}

/// Parses exactly one frame.
///
/// `bytes` must hold the whole record and nothing else.
pub fn decode(bytes: &[u8]) -> Result<LogEvent> {
	let mut buf = bytes;

	if buf.remaining() < 2 {
		return Err(FrameError::malformed("missing record length"));
	}
	let record_len = buf.get_u16() as usize;
	if record_len != bytes.len() {
		return Err(FrameError::malformed(format!(
			"record length {record_len} does not match {} available bytes",
			bytes.len()
		)));
	}

	need(&buf, HEADER_LEN - 2, "header")?;
	let seq_no = buf.get_u32();
	let type_byte = buf.get_u8();
	let thread_id = buf.get_u32();

	let event_type = EventType::try_from(type_byte)
		.map_err(|_| FrameError::malformed(format!("unknown event type {type_byte}")))?;

	let kind = match event_type {
		EventType::StepIn => {
			let class_name = get_text(&mut buf, "className")?;
			let func_name = get_text(&mut buf, "funcName")?;
			EventKind::StepIn {
				class_name,
				func_name,
			}
		}
		EventType::StepOut => EventKind::StepOut,
		EventType::Message => {
			need(&buf, 1, "level")?;
			let level_byte = buf.get_u8();
			let level = LogLevel::from_wire(level_byte)
				.ok_or_else(|| FrameError::malformed(format!("unknown level {level_byte}")))?;
			let message = get_text(&mut buf, "message")?;
			EventKind::Message { level, message }
		}
	};

	if buf.has_remaining() {
		return Err(FrameError::malformed(format!(
			"{} trailing bytes after payload",
			buf.remaining()
		)));
	}

	Ok(LogEvent {
		seq_no,
		thread_id,
		kind,
	})
}

fn need(buf: &&[u8], n: usize, what: &str) -> Result<()> {
	if buf.remaining() < n {
		return Err(FrameError::malformed(format!(
			"truncated {what}: need {n} bytes, have {}",
			buf.remaining()
		)));
	}
	Ok(())
}

fn get_text(buf: &mut &[u8], field: &'static str) -> Result<String> {
	need(buf, 4 + 2, field)?;
	let _reserved = buf.get_u32();
	let len = buf.get_u16() as usize;
	if len > MAX_FIELD_BYTES {
		return Err(FrameError::FieldTooLong {
			field,
			len,
			max: MAX_FIELD_BYTES,
		});
	}
	need(buf, len, field)?;
	let text = std::str::from_utf8(&buf[..len])
		.map_err(|e| FrameError::malformed(format!("{field} is not valid UTF-8: {e}")))?
		.to_owned();
	buf.advance(len);
	Ok(text)
}
