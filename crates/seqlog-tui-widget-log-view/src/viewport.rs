// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Visible window over a growing, evicting buffer.
//!
//! Always `0 <= visible_top <= max(0, size - visible_line_count)`.

use std::ops::Range;

use crate::scrollbar::ScrollbarGeometry;

/// Lines moved per mouse wheel notch.
pub const WHEEL_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
	LineUp,
	LineDown,
	PageUp,
	PageDown,
	Home,
	End,
	WheelUp,
	WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
	origin_y: usize,
	origin_top: usize,
	track: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
	visible_top: usize,
	visible_line_count: usize,
	size: usize,
	drag: Option<Drag>,
}

impl Viewport {
	pub fn new(visible_line_count: usize) -> Self {
		Self {
			visible_line_count,
			..Self::default()
		}
	}

	pub fn visible_top(&self) -> usize {
		self.visible_top
	}

	pub fn visible_line_count(&self) -> usize {
		self.visible_line_count
	}

	/// Buffer size the viewport was last told about.
	pub fn size(&self) -> usize {
		self.size
	}

	pub fn max_top(&self) -> usize {
		max_top(self.size, self.visible_line_count)
	}

	/// Whether the newest entry is in view.
	pub fn is_following_tail(&self) -> bool {
		self.visible_top >= self.max_top()
	}

	/// Buffer indices currently in view.
	pub fn visible_range(&self) -> Range<usize> {
		let end = (self.visible_top + self.visible_line_count).min(self.size);
		self.visible_top.min(end)..end
	}

	/// Resizes the window. A viewport on the tail stays on the tail.
	pub fn set_visible_line_count(&mut self, count: usize) {
		let following = self.is_following_tail();
		self.visible_line_count = count;
		if following {
			self.visible_top = self.max_top();
		} else {
			self.clamp();
		}
	}

	pub fn scroll_by(&mut self, lines: isize) {
		let top = if lines < 0 {
			self.visible_top.saturating_sub(lines.unsigned_abs())
		} else {
			self.visible_top.saturating_add(lines as usize)
		};
		self.visible_top = top.min(self.max_top());
	}

	pub fn scroll_to_top(&mut self) {
		self.visible_top = 0;
	}

	pub fn scroll_to_bottom(&mut self) {
		self.visible_top = self.max_top();
	}

	pub fn apply(&mut self, action: ScrollAction) {
		let page = self.visible_line_count.max(1) as isize;
		match action {
			ScrollAction::LineUp => self.scroll_by(-1),
			ScrollAction::LineDown => self.scroll_by(1),
			ScrollAction::PageUp => self.scroll_by(-page),
			ScrollAction::PageDown => self.scroll_by(page),
			ScrollAction::Home => self.scroll_to_top(),
			ScrollAction::End => self.scroll_to_bottom(),
			ScrollAction::WheelUp => self.scroll_by(-(WHEEL_LINES as isize)),
			ScrollAction::WheelDown => self.scroll_by(WHEEL_LINES as isize),
		}
	}

	/// Reacts to appends that brought the buffer to `new_size` and evicted
	/// `evicted` of its oldest entries.
	///
	/// On the tail, the view keeps following it. Otherwise the same logical
	/// entries stay in view, so `visible_top` moves back by `evicted`.
	pub fn on_append(&mut self, evicted: usize, new_size: usize) {
		let following = self.is_following_tail();
		self.size = new_size;
		if following {
			self.visible_top = self.max_top();
		} else {
			self.visible_top = self.visible_top.saturating_sub(evicted);
			self.clamp();
		}
		if let Some(drag) = self.drag.as_mut() {
			drag.origin_top = drag.origin_top.saturating_sub(evicted);
		}
	}

	pub fn scrollbar(&self, track: usize, min_thumb: usize) -> ScrollbarGeometry {
		ScrollbarGeometry::compute(
			self.visible_top,
			self.visible_line_count,
			self.size,
			track,
			min_thumb,
		)
	}

	/// Starts a scrollbar drag at track offset `y`.
	pub fn begin_drag(&mut self, y: usize, track: usize) {
		self.drag = Some(Drag {
			origin_y: y,
			origin_top: self.visible_top,
			track,
		});
	}

	/// Moves the view by the line distance that the pixel distance from the
	/// drag origin represents, `linePixelSize = track / (size - visible)`.
	pub fn drag_to(&mut self, y: usize) {
		let Some(drag) = self.drag else {
			return;
		};
		let scrollable = self.max_top();
		if scrollable == 0 || drag.track == 0 {
			return;
		}

		let pixels = y as f64 - drag.origin_y as f64;
		let line_pixel_size = drag.track as f64 / scrollable as f64;
		let lines = (pixels / line_pixel_size).round() as isize;

		self.visible_top = drag.origin_top;
		self.scroll_by(lines);
	}

	pub fn end_drag(&mut self) {
		self.drag = None;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	fn clamp(&mut self) {
		self.visible_top = self.visible_top.min(self.max_top());
	}
}

fn max_top(size: usize, visible: usize) -> usize {
	size.saturating_sub(visible)
}
