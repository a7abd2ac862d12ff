// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use ratatui::{
	buffer::Buffer,
	layout::Rect,
	style::{Color, Style},
	widgets::StatefulWidget,
};
use seqlog_common_core::EntryLevel;
use seqlog_console_buffer::RingEntry;

use crate::scrollbar::MIN_THUMB_ROWS;
use crate::viewport::Viewport;

const LINE_NUMBER_WIDTH: u16 = 7;

pub fn level_style(level: EntryLevel) -> Style {
	match level {
		EntryLevel::System => Style::default().fg(Color::Cyan),
		EntryLevel::Debug => Style::default().fg(Color::DarkGray),
		EntryLevel::Info => Style::default(),
		EntryLevel::Warn => Style::default().fg(Color::Yellow),
		EntryLevel::Error => Style::default().fg(Color::Red),
	}
}

/// Renders the window of entries selected by a [`Viewport`].
///
/// `lines` is the window already copied out of the buffer, starting at
/// `visible_top`. The viewport's line count is set to the area height.
#[derive(Debug, Clone, Default)]
pub struct LogView<'a> {
	lines: &'a [RingEntry],
	first_line_number: u64,
	show_line_numbers: bool,
	show_scrollbar: bool,
	track_style: Style,
	thumb_style: Style,
}

impl<'a> LogView<'a> {
	pub fn new(lines: &'a [RingEntry]) -> Self {
		Self {
			lines,
			first_line_number: 1,
			show_line_numbers: false,
			show_scrollbar: true,
			track_style: Style::default().fg(Color::DarkGray),
			thumb_style: Style::default(),
		}
	}

	/// Number shown next to the first line, counted over everything ever
	/// appended.
	pub fn first_line_number(mut self, number: u64) -> Self {
		self.first_line_number = number;
		self
	}

	pub fn show_line_numbers(mut self, show: bool) -> Self {
		self.show_line_numbers = show;
		self
	}

	pub fn show_scrollbar(mut self, show: bool) -> Self {
		self.show_scrollbar = show;
		self
	}

	pub fn track_style(mut self, style: Style) -> Self {
		self.track_style = style;
		self
	}

	pub fn thumb_style(mut self, style: Style) -> Self {
		self.thumb_style = style;
		self
	}
}

impl StatefulWidget for LogView<'_> {
	type State = Viewport;

	fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
		state.set_visible_line_count(area.height as usize);

		if area.width == 0 || area.height == 0 {
			return;
		}

		let scrollbar = self.show_scrollbar && state.size() > state.visible_line_count();
		let text_width = if scrollbar {
			area.width - 1
		} else {
			area.width
		};

		for (row, entry) in self.lines.iter().take(area.height as usize).enumerate() {
			let y = area.y + row as u16;
			let mut x = area.x;
			let mut remaining = text_width;

			if self.show_line_numbers && remaining > LINE_NUMBER_WIDTH {
				let number = format!("{:>6} ", self.first_line_number + row as u64);
				buf.set_stringn(
					x,
					y,
					number,
					LINE_NUMBER_WIDTH as usize,
					Style::default().fg(Color::DarkGray),
				);
				x += LINE_NUMBER_WIDTH;
				remaining -= LINE_NUMBER_WIDTH;
			}

			buf.set_stringn(
				x,
				y,
				&entry.message,
				remaining as usize,
				level_style(entry.level),
			);
		}

		if !scrollbar {
			return;
		}

		let scrollbar_x = area.x + area.width - 1;
		let geometry = state.scrollbar(area.height as usize, MIN_THUMB_ROWS);
		for y in 0..geometry.track {
			let cell_y = area.y + y as u16;
			let (symbol, style) = if geometry.contains(y) {
				("█", self.thumb_style)
			} else {
				("░", self.track_style)
			};
			buf[(scrollbar_x, cell_y)].set_symbol(symbol).set_style(style);
		}
	}
}
