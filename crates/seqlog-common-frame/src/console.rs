// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service to console messages.
//!
//! The canonical encoding is a JSON object tagged by `kind`:
//!
//! ```json
//! {"kind":"file_list","files":[{"creationTime":"...","lastWriteTime":"...","canonicalPath":"...","size":"..."}]}
//! {"kind":"log","level":"info","message":"..."}
//! ```
//!
//! Older services send a four-character command prefix instead
//! (`0001` + JSON array, `0002` + level character + text). [`ConsoleMessage::parse`]
//! accepts both.

use seqlog_common_core::EntryLevel;
use serde::{Deserialize, Serialize};

use crate::error::ConsoleProtocolError;

const LEGACY_FILE_LIST: &str = "0001";
const LEGACY_LOG: &str = "0002";

/// One log file known to the service. Values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFileInfo {
	pub creation_time: String,
	pub last_write_time: String,
	pub canonical_path: String,
	pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsoleMessage {
	FileList { files: Vec<LogFileInfo> },
	Log { level: EntryLevel, message: String },
}

impl ConsoleMessage {
	pub fn log(level: EntryLevel, message: impl Into<String>) -> Self {
		Self::Log {
			level,
			message: message.into(),
		}
	}

	pub fn to_json(&self) -> Result<String, ConsoleProtocolError> {
		Ok(serde_json::to_string(self)?)
	}

	/// Parses either the tagged JSON form or the legacy prefix envelope.
	pub fn parse(text: &str) -> Result<Self, ConsoleProtocolError> {
		if text.trim_start().starts_with('{') {
			return Ok(serde_json::from_str(text)?);
		}
		Self::parse_legacy(text)
	}

	pub fn parse_legacy(text: &str) -> Result<Self, ConsoleProtocolError> {
		let (command, body) = match (text.get(..4), text.get(4..)) {
			(Some(command), Some(body)) => (command, body),
			_ => return Err(ConsoleProtocolError::UnknownCommand(text.to_string())),
		};

		match command {
			LEGACY_FILE_LIST => {
				let files: Vec<LogFileInfo> = serde_json::from_str(body)?;
				Ok(Self::FileList { files })
			}
			LEGACY_LOG => {
				let mut chars = body.chars();
				let code = chars
					.next()
					.ok_or_else(|| ConsoleProtocolError::InvalidLevel(String::new()))?;
				let level = EntryLevel::from_code(code)
					.ok_or_else(|| ConsoleProtocolError::InvalidLevel(code.to_string()))?;
				Ok(Self::log(level, chars.as_str()))
			}
			other => Err(ConsoleProtocolError::UnknownCommand(other.to_string())),
		}
	}
}
