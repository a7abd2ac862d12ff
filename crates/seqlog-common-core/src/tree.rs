// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rebuilds nested call frames from a flat event stream.
//!
//! Within one thread, a STEP_OUT closes the most recently opened frame with
//! the same `seq_no` (LIFO pairing). Frames left open above it lost their
//! STEP_OUT somewhere upstream; they are closed implicitly and flagged.

use std::collections::BTreeMap;

use tracing::debug;

use crate::event::{EventKind, LogEvent};
use crate::level::LogLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMessage {
	pub level: LogLevel,
	pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
	pub seq_no: u32,
	pub thread_id: u32,
	pub class_name: String,
	pub func_name: String,
	pub messages: Vec<CallMessage>,
	pub children: Vec<CallFrame>,
	/// False when the frame never saw its own STEP_OUT.
	pub closed: bool,
}

impl CallFrame {
	fn open(seq_no: u32, thread_id: u32, class_name: String, func_name: String) -> Self {
		Self {
			seq_no,
			thread_id,
			class_name,
			func_name,
			messages: Vec::new(),
			children: Vec::new(),
			closed: false,
		}
	}

	/// Number of frames in this subtree, itself included.
	pub fn frame_count(&self) -> usize {
		1 + self.children.iter().map(CallFrame::frame_count).sum::<usize>()
	}
}

#[derive(Debug, Default)]
struct ThreadTrace {
	roots: Vec<CallFrame>,
	stack: Vec<CallFrame>,
}

impl ThreadTrace {
	fn attach(&mut self, frame: CallFrame) {
		match self.stack.last_mut() {
			Some(parent) => parent.children.push(frame),
			None => self.roots.push(frame),
		}
	}
}

/// Per-thread call forest built from decoded events.
#[derive(Debug, Default)]
pub struct CallTree {
	threads: BTreeMap<u32, ThreadTrace>,
	orphans: Vec<LogEvent>,
}

impl CallTree {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_events<I>(events: I) -> Self
	where
		I: IntoIterator<Item = LogEvent>,
	{
		let mut tree = Self::new();
		for event in events {
			tree.push(event);
		}
		tree
	}

	pub fn push(&mut self, event: LogEvent) {
		let trace = self.threads.entry(event.thread_id).or_default();

		match event.kind {
			EventKind::StepIn {
				class_name,
				func_name,
			} => {
				trace.stack.push(CallFrame::open(
					event.seq_no,
					event.thread_id,
					class_name,
					func_name,
				));
			}
			EventKind::Message { level, message } => {
				match trace
					.stack
					.iter_mut()
					.rev()
					.find(|f| f.seq_no == event.seq_no)
				{
					Some(frame) => frame.messages.push(CallMessage { level, message }),
					None => {
						debug!(seq_no = event.seq_no, thread_id = event.thread_id, "message without open call");
						self.orphans.push(LogEvent {
							seq_no: event.seq_no,
							thread_id: event.thread_id,
							kind: EventKind::Message { level, message },
						});
					}
				}
			}
			EventKind::StepOut => {
				let Some(depth) = trace.stack.iter().rposition(|f| f.seq_no == event.seq_no) else {
					debug!(seq_no = event.seq_no, thread_id = event.thread_id, "step out without open call");
					self.orphans.push(event);
					return;
				};

				while trace.stack.len() > depth + 1 {
					if let Some(unclosed) = trace.stack.pop() {
						trace.attach(unclosed);
					}
				}
				if let Some(mut frame) = trace.stack.pop() {
					frame.closed = true;
					trace.attach(frame);
				}
			}
		}
	}

	/// Completed top-level calls of a thread, in completion order.
	pub fn roots(&self, thread_id: u32) -> &[CallFrame] {
		self
			.threads
			.get(&thread_id)
			.map(|t| t.roots.as_slice())
			.unwrap_or(&[])
	}

	/// Calls of a thread that are still open, outermost first.
	pub fn open_frames(&self, thread_id: u32) -> &[CallFrame] {
		self
			.threads
			.get(&thread_id)
			.map(|t| t.stack.as_slice())
			.unwrap_or(&[])
	}

	pub fn thread_ids(&self) -> impl Iterator<Item = u32> + '_ {
		self.threads.keys().copied()
	}

	/// Events that could not be paired with an open call.
	pub fn orphans(&self) -> &[LogEvent] {
		&self.orphans
	}

	/// Closes every still-open frame and returns the forest per thread.
	pub fn finish(mut self) -> BTreeMap<u32, Vec<CallFrame>> {
		let mut out = BTreeMap::new();
		for (thread_id, mut trace) in std::mem::take(&mut self.threads) {
			while let Some(frame) = trace.stack.pop() {
				trace.attach(frame);
			}
			out.insert(thread_id, trace.roots);
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_messages_attach_to_their_call() {
		let tree = CallTree::from_events([
			LogEvent::step_in(7, 1, "Main", "run"),
			LogEvent::message(7, 1, LogLevel::Info, "first"),
			LogEvent::message(7, 1, LogLevel::Warn, "second"),
			LogEvent::step_out(7, 1),
		]);

		let roots = tree.roots(1);
		assert_eq!(roots.len(), 1);
		let frame = &roots[0];
		assert_eq!(frame.seq_no, 7);
		assert!(frame.closed);
		assert_eq!(frame.messages.len(), 2);
		assert_eq!(frame.messages[0].message, "first");
		assert_eq!(frame.messages[1].level, LogLevel::Warn);
		assert!(tree.orphans().is_empty());
	}

	#[test]
	fn test_nested_calls() {
		let tree = CallTree::from_events([
			LogEvent::step_in(1, 1, "A", "outer"),
			LogEvent::step_in(2, 1, "B", "inner"),
			LogEvent::message(2, 1, LogLevel::Debug, "in inner"),
			LogEvent::step_out(2, 1),
			LogEvent::message(1, 1, LogLevel::Debug, "back in outer"),
			LogEvent::step_out(1, 1),
		]);

		let roots = tree.roots(1);
		assert_eq!(roots.len(), 1);
		assert_eq!(roots[0].frame_count(), 2);
		assert_eq!(roots[0].children[0].func_name, "inner");
		assert_eq!(roots[0].messages[0].message, "back in outer");
	}

	#[test]
	fn test_threads_are_independent() {
		let tree = CallTree::from_events([
			LogEvent::step_in(1, 1, "A", "a"),
			LogEvent::step_in(2, 2, "B", "b"),
			LogEvent::step_out(1, 1),
			LogEvent::message(2, 2, LogLevel::Info, "still open"),
		]);

		assert_eq!(tree.roots(1).len(), 1);
		assert!(tree.roots(2).is_empty());
		assert_eq!(tree.open_frames(2).len(), 1);
		assert_eq!(tree.open_frames(2)[0].messages.len(), 1);
		assert_eq!(tree.thread_ids().collect::<Vec<_>>(), vec![1, 2]);
	}

	#[test]
	fn test_missing_step_out_is_closed_implicitly() {
		let tree = CallTree::from_events([
			LogEvent::step_in(1, 1, "A", "outer"),
			LogEvent::step_in(2, 1, "B", "lost"),
			LogEvent::step_out(1, 1),
		]);

		let roots = tree.roots(1);
		assert_eq!(roots.len(), 1);
		assert!(roots[0].closed);
		assert_eq!(roots[0].children.len(), 1);
		assert!(!roots[0].children[0].closed);
	}

	#[test]
	fn test_orphans_are_reported() {
		let tree = CallTree::from_events([
			LogEvent::step_out(5, 1),
			LogEvent::message(6, 1, LogLevel::Error, "nobody home"),
		]);

		assert_eq!(tree.orphans().len(), 2);
		assert!(tree.roots(1).is_empty());
	}

	#[test]
	fn test_finish_flushes_open_frames() {
		let tree = CallTree::from_events([
			LogEvent::step_in(1, 3, "A", "outer"),
			LogEvent::step_in(2, 3, "B", "inner"),
		]);

		let forest = tree.finish();
		let roots = &forest[&3];
		assert_eq!(roots.len(), 1);
		assert_eq!(roots[0].frame_count(), 2);
		assert!(!roots[0].closed);
	}
}
