// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Log levels used for filtering and on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum-level gate and message severity.
///
/// The ordering is total: `All < Debug < Info < Warn < Error < None`.
/// `All` and `None` are configuration-only values; a message always carries
/// one of the four concrete levels.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
	#[default]
	All,
	Debug,
	Info,
	Warn,
	Error,
	None,
}

impl LogLevel {
	/// Levels a message may be emitted at.
	pub const MESSAGE_LEVELS: [LogLevel; 4] = [
		LogLevel::Debug,
		LogLevel::Info,
		LogLevel::Warn,
		LogLevel::Error,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::All => "ALL",
			LogLevel::Debug => "DEBUG",
			LogLevel::Info => "INFO",
			LogLevel::Warn => "WARN",
			LogLevel::Error => "ERROR",
			LogLevel::None => "NONE",
		}
	}

	/// Whether a message at `level` passes this gate.
	pub fn allows(&self, level: LogLevel) -> bool {
		*self != LogLevel::None && level >= *self
	}

	/// Single-byte encoding used in MESSAGE frames.
	///
	/// Returns `None` for the configuration-only levels.
	pub fn to_wire(&self) -> Option<u8> {
		match self {
			LogLevel::Debug => Some(0),
			LogLevel::Info => Some(1),
			LogLevel::Warn => Some(2),
			LogLevel::Error => Some(3),
			LogLevel::All | LogLevel::None => None,
		}
	}

	pub fn from_wire(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(LogLevel::Debug),
			1 => Some(LogLevel::Info),
			2 => Some(LogLevel::Warn),
			3 => Some(LogLevel::Error),
			_ => None,
		}
	}

	/// 32-bit encoding used in the handshake, where `All` is `-1`.
	pub fn to_handshake(&self) -> u32 {
		let value: i32 = match self {
			LogLevel::All => -1,
			LogLevel::Debug => 0,
			LogLevel::Info => 1,
			LogLevel::Warn => 2,
			LogLevel::Error => 3,
			LogLevel::None => 4,
		};
		value as u32
	}

	pub fn from_handshake(value: u32) -> Option<Self> {
		match value as i32 {
			-1 => Some(LogLevel::All),
			0 => Some(LogLevel::Debug),
			1 => Some(LogLevel::Info),
			2 => Some(LogLevel::Warn),
			3 => Some(LogLevel::Error),
			4 => Some(LogLevel::None),
			_ => None,
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"ALL" => Ok(LogLevel::All),
			"DEBUG" => Ok(LogLevel::Debug),
			"INFO" => Ok(LogLevel::Info),
			"WARN" => Ok(LogLevel::Warn),
			"ERROR" => Ok(LogLevel::Error),
			"NONE" => Ok(LogLevel::None),
			_ => Err(CoreError::UnknownLevel(s.to_string())),
		}
	}
}

/// Severity of a line held by the console.
///
/// `System` marks lines produced by the console itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryLevel {
	System,
	Debug,
	Info,
	Warn,
	Error,
}

impl EntryLevel {
	/// Single-character code of the legacy console envelope.
	pub fn code(&self) -> char {
		match self {
			EntryLevel::System => 's',
			EntryLevel::Debug => 'd',
			EntryLevel::Info => 'i',
			EntryLevel::Warn => 'w',
			EntryLevel::Error => 'e',
		}
	}

	pub fn from_code(code: char) -> Option<Self> {
		match code {
			's' => Some(EntryLevel::System),
			'd' => Some(EntryLevel::Debug),
			'i' => Some(EntryLevel::Info),
			'w' => Some(EntryLevel::Warn),
			'e' => Some(EntryLevel::Error),
			_ => None,
		}
	}
}

impl From<LogLevel> for EntryLevel {
	fn from(level: LogLevel) -> Self {
		match level {
			LogLevel::All | LogLevel::Debug => EntryLevel::Debug,
			LogLevel::Info => EntryLevel::Info,
			LogLevel::Warn => EntryLevel::Warn,
			LogLevel::Error | LogLevel::None => EntryLevel::Error,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_total_order() {
		assert!(LogLevel::All < LogLevel::Debug);
		assert!(LogLevel::Debug < LogLevel::Info);
		assert!(LogLevel::Info < LogLevel::Warn);
		assert!(LogLevel::Warn < LogLevel::Error);
		assert!(LogLevel::Error < LogLevel::None);
	}

	#[test]
	fn test_gate_allows() {
		assert!(!LogLevel::Warn.allows(LogLevel::Debug));
		assert!(!LogLevel::Warn.allows(LogLevel::Info));
		assert!(LogLevel::Warn.allows(LogLevel::Warn));
		assert!(LogLevel::Warn.allows(LogLevel::Error));
		assert!(LogLevel::All.allows(LogLevel::Debug));
		assert!(!LogLevel::None.allows(LogLevel::Error));
	}

	#[test]
	fn test_parse_case_insensitive() {
		assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
		assert_eq!(" None ".parse::<LogLevel>().unwrap(), LogLevel::None);
		assert!("verbose".parse::<LogLevel>().is_err());
	}

	#[test]
	fn test_handshake_all_is_minus_one() {
		assert_eq!(LogLevel::All.to_handshake(), 0xFFFF_FFFF);
		assert_eq!(LogLevel::from_handshake(0xFFFF_FFFF), Some(LogLevel::All));
		assert_eq!(LogLevel::from_handshake(9), None);
	}

	#[test]
	fn test_config_levels_have_no_wire_byte() {
		assert_eq!(LogLevel::All.to_wire(), None);
		assert_eq!(LogLevel::None.to_wire(), None);
		assert_eq!(LogLevel::from_wire(4), None);
	}

	#[test]
	fn test_entry_level_codes() {
		for level in [
			EntryLevel::System,
			EntryLevel::Debug,
			EntryLevel::Info,
			EntryLevel::Warn,
			EntryLevel::Error,
		] {
			assert_eq!(EntryLevel::from_code(level.code()), Some(level));
		}
		assert_eq!(EntryLevel::from_code('x'), None);
	}

	#[test]
	fn test_serde_names() {
		let json = serde_json::to_string(&LogLevel::Warn).unwrap();
		assert_eq!(json, "\"WARN\"");
		let json = serde_json::to_string(&EntryLevel::System).unwrap();
		assert_eq!(json, "\"system\"");
	}

	proptest! {
		#[test]
		fn test_wire_roundtrip_for_message_levels(index in 0usize..4) {
			let level = LogLevel::MESSAGE_LEVELS[index];
			let byte = level.to_wire().unwrap();
			prop_assert_eq!(LogLevel::from_wire(byte), Some(level));
		}
	}
}
