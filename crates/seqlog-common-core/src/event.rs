// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Trace stream records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::level::LogLevel;

/// Discriminant of a [`LogEvent`] as carried in the frame's type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
	StepIn,
	StepOut,
	Message,
}

impl EventType {
	pub fn to_wire(&self) -> u8 {
		match self {
			EventType::StepIn => 0,
			EventType::StepOut => 1,
			EventType::Message => 2,
		}
	}
}

impl TryFrom<u8> for EventType {
	type Error = CoreError;

	fn try_from(byte: u8) -> Result<Self, Self::Error> {
		match byte {
			0 => Ok(EventType::StepIn),
			1 => Ok(EventType::StepOut),
			2 => Ok(EventType::Message),
			other => Err(CoreError::UnknownEventType(other)),
		}
	}
}

/// Type-specific payload of a [`LogEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
	StepIn {
		class_name: String,
		func_name: String,
	},
	StepOut,
	Message {
		level: LogLevel,
		message: String,
	},
}

/// One record of the trace stream.
///
/// `seq_no` correlates a STEP_IN with the MESSAGEs and the single STEP_OUT
/// that follow it on the same thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
	pub seq_no: u32,
	pub thread_id: u32,
	#[serde(flatten)]
	pub kind: EventKind,
}

impl LogEvent {
	pub fn step_in(
		seq_no: u32,
		thread_id: u32,
		class_name: impl Into<String>,
		func_name: impl Into<String>,
	) -> Self {
		Self {
			seq_no,
			thread_id,
			kind: EventKind::StepIn {
				class_name: class_name.into(),
				func_name: func_name.into(),
			},
		}
	}

	pub fn step_out(seq_no: u32, thread_id: u32) -> Self {
		Self {
			seq_no,
			thread_id,
			kind: EventKind::StepOut,
		}
	}

	pub fn message(seq_no: u32, thread_id: u32, level: LogLevel, message: impl Into<String>) -> Self {
		Self {
			seq_no,
			thread_id,
			kind: EventKind::Message {
				level,
				message: message.into(),
			},
		}
	}

	pub fn event_type(&self) -> EventType {
		match self.kind {
			EventKind::StepIn { .. } => EventType::StepIn,
			EventKind::StepOut => EventType::StepOut,
			EventKind::Message { .. } => EventType::Message,
		}
	}

	/// Level of a MESSAGE event, `None` for step events.
	pub fn level(&self) -> Option<LogLevel> {
		match &self.kind {
			EventKind::Message { level, .. } => Some(*level),
			_ => None,
		}
	}
}

impl fmt::Display for LogEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.kind {
			EventKind::StepIn {
				class_name,
				func_name,
			} => write!(
				f,
				"[{}:{}] > {}::{}",
				self.thread_id, self.seq_no, class_name, func_name
			),
			EventKind::StepOut => write!(f, "[{}:{}] <", self.thread_id, self.seq_no),
			EventKind::Message { level, message } => {
				write!(f, "[{}:{}] {} {}", self.thread_id, self.seq_no, level, message)
			}
		}
	}
}
