// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire formats for Sequence Log.
//!
//! - [`encode`] / [`decode`] - the length-prefixed event frame
//! - [`Handshake`] - the first frame a client sends on every connection
//! - [`LogEventCodec`] - splits a byte stream into frames
//! - [`ConsoleMessage`] - what the service pushes to a console

pub mod codec;
pub mod console;
pub mod error;
pub mod handshake;
pub mod stream;
pub mod utf8;

pub use codec::{decode, encode, encode_into, encoded_len, HEADER_LEN, MAX_FIELD_BYTES};
pub use console::{ConsoleMessage, LogFileInfo};
pub use error::{ConsoleProtocolError, FrameError, Result};
pub use handshake::Handshake;
pub use stream::LogEventCodec;
pub use utf8::utf8_len;

/// Decodes a handshake frame; used by collectors and tests.
pub fn decode_handshake(bytes: &[u8]) -> Result<Handshake> {
	Handshake::decode(bytes)
}
