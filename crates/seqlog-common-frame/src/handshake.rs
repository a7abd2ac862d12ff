// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection handshake, sent once as the first binary frame.
//!
//! ```text
//! u32 processId
//! u32 userLen ; userLen bytes
//! u32 passwordLen ; passwordLen bytes
//! u32 fileNameLen ; fileNameLen bytes
//! u32 level                 ALL is 0xFFFFFFFF
//! ```
//!
//! Each string ends in a NUL byte, and its length counts that byte. The
//! service rejects names that are not NUL-terminated.

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use seqlog_common_core::LogLevel;
use zeroize::Zeroizing;

use crate::codec::MAX_FIELD_BYTES;
use crate::error::{FrameError, Result};
use crate::utf8::utf8_len;

/// Identification the client presents to the service.
#[derive(Clone, PartialEq, Eq)]
pub struct Handshake {
	pub pid: u32,
	pub user: String,
	pub password: Zeroizing<String>,
	pub file_name: String,
	pub level: LogLevel,
}

impl Handshake {
	pub fn new(
		pid: u32,
		user: impl Into<String>,
		password: impl Into<String>,
		file_name: impl Into<String>,
		level: LogLevel,
	) -> Self {
		Self {
			pid,
			user: user.into(),
			password: Zeroizing::new(password.into()),
			file_name: file_name.into(),
			level,
		}
	}

	pub fn encoded_len(&self) -> usize {
		4 + text_len(&self.user) + text_len(&self.password) + text_len(&self.file_name) + 4
	}

	pub fn encode(&self) -> Result<Bytes> {
		for (field, text) in [
			("user", self.user.as_str()),
			("password", self.password.as_str()),
			("fileName", self.file_name.as_str()),
		] {
			let len = utf8_len(text);
			if len > MAX_FIELD_BYTES {
				return Err(FrameError::FieldTooLong {
					field,
					len,
					max: MAX_FIELD_BYTES,
				});
			}
			if text.contains('\0') {
				return Err(FrameError::malformed(format!("{field} contains a NUL byte")));
			}
		}

		let mut buf = BytesMut::with_capacity(self.encoded_len());
		buf.put_u32(self.pid);
		put_text(&mut buf, &self.user);
		put_text(&mut buf, &self.password);
		put_text(&mut buf, &self.file_name);
		buf.put_u32(self.level.to_handshake());
		Ok(buf.freeze())
	}

	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let mut buf = bytes;
		need(&buf, 4, "processId")?;
		let pid = buf.get_u32();
		let user = get_text(&mut buf, "user")?;
		let password = Zeroizing::new(get_text(&mut buf, "password")?);
		let file_name = get_text(&mut buf, "fileName")?;
		need(&buf, 4, "level")?;
		let raw = buf.get_u32();
		let level = LogLevel::from_handshake(raw)
			.ok_or_else(|| FrameError::malformed(format!("unknown handshake level {raw}")))?;

		if buf.has_remaining() {
			return Err(FrameError::malformed(format!(
				"{} trailing bytes after handshake",
				buf.remaining()
			)));
		}

		Ok(Self {
			pid,
			user,
			password,
			file_name,
			level,
		})
	}
}

impl fmt::Debug for Handshake {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Handshake")
			.field("pid", &self.pid)
			.field("user", &self.user)
			.field("password", &"[REDACTED]")
			.field("file_name", &self.file_name)
			.field("level", &self.level)
			.finish()
	}
}

/// Length prefix plus bytes plus terminator.
fn text_len(text: &str) -> usize {
	4 + utf8_len(text) + 1
}

fn put_text(dst: &mut BytesMut, text: &str) {
	dst.put_u32((utf8_len(text) + 1) as u32);
	dst.put_slice(text.as_bytes());
	dst.put_u8(0);
}

fn need(buf: &&[u8], n: usize, what: &str) -> Result<()> {
	if buf.remaining() < n {
		return Err(FrameError::malformed(format!(
			"truncated handshake {what}: need {n} bytes, have {}",
			buf.remaining()
		)));
	}
	Ok(())
}

fn get_text(buf: &mut &[u8], field: &'static str) -> Result<String> {
	need(buf, 4, field)?;
	let len = buf.get_u32() as usize;
	if len > MAX_FIELD_BYTES + 1 {
		return Err(FrameError::FieldTooLong {
			field,
			len: len.saturating_sub(1),
			max: MAX_FIELD_BYTES,
		});
	}
	need(buf, len, field)?;
	let Some((&0, body)) = buf[..len].split_last() else {
		return Err(FrameError::malformed(format!("{field} is not NUL-terminated")));
	};
	if body.contains(&0) {
		return Err(FrameError::malformed(format!("{field} contains a NUL byte")));
	}
	let text = std::str::from_utf8(body)
		.map_err(|e| FrameError::malformed(format!("{field} is not valid UTF-8: {e}")))?
		.to_owned();
	buf.advance(len);
	Ok(text)
}
