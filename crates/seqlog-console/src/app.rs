// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crossterm::event::{
	Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
	layout::{Constraint, Direction, Layout, Rect},
	style::{Color, Modifier, Style},
	text::{Line, Span},
	widgets::Paragraph,
	Frame,
};
use seqlog_console_buffer::{BufferSnapshot, SharedRingBuffer};
use seqlog_tui_widget_log_view::{LogView, ScrollAction, Viewport, MIN_THUMB_ROWS};
use tokio::sync::watch;

use crate::connection::{ConnectionStatus, FileListing};

pub fn scroll_action_for_key(key: &KeyEvent) -> Option<ScrollAction> {
	match key.code {
		KeyCode::Up => Some(ScrollAction::LineUp),
		KeyCode::Down => Some(ScrollAction::LineDown),
		KeyCode::PageUp => Some(ScrollAction::PageUp),
		KeyCode::PageDown => Some(ScrollAction::PageDown),
		KeyCode::Home => Some(ScrollAction::Home),
		KeyCode::End => Some(ScrollAction::End),
		_ => None,
	}
}

pub struct App {
	buffer: SharedRingBuffer,
	files: FileListing,
	status: watch::Receiver<ConnectionStatus>,
	viewport: Viewport,
	last_snapshot: BufferSnapshot,
	/// Where the log view was last drawn; mouse hit-testing uses it.
	log_area: Rect,
	should_quit: bool,
}

impl App {
	pub fn new(
		buffer: SharedRingBuffer,
		files: FileListing,
		status: watch::Receiver<ConnectionStatus>,
	) -> Self {
		Self {
			buffer,
			files,
			status,
			viewport: Viewport::default(),
			last_snapshot: BufferSnapshot::default(),
			log_area: Rect::default(),
			should_quit: false,
		}
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn status(&self) -> ConnectionStatus {
		*self.status.borrow()
	}

	pub fn should_quit(&self) -> bool {
		self.should_quit
	}

	pub fn handle_event(&mut self, event: Event) {
		match event {
			Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
			Event::Mouse(mouse) => self.handle_mouse(mouse),
			_ => {}
		}
	}

	pub fn handle_key(&mut self, key: KeyEvent) {
		if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
			self.should_quit = true;
			return;
		}

		match key.code {
			KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
			_ => {
				if let Some(action) = scroll_action_for_key(&key) {
					self.viewport.apply(action);
				}
			}
		}
	}

	pub fn handle_mouse(&mut self, mouse: MouseEvent) {
		match mouse.kind {
			MouseEventKind::ScrollUp => self.viewport.apply(ScrollAction::WheelUp),
			MouseEventKind::ScrollDown => self.viewport.apply(ScrollAction::WheelDown),
			MouseEventKind::Down(MouseButton::Left) => {
				let Some(y) = self.scrollbar_row(mouse.column, mouse.row) else {
					return;
				};
				let track = self.log_area.height as usize;
				let geometry = self.viewport.scrollbar(track, MIN_THUMB_ROWS);
				if geometry.contains(y) {
					self.viewport.begin_drag(y, track);
				} else if y < geometry.thumb_top {
					self.viewport.apply(ScrollAction::PageUp);
				} else {
					self.viewport.apply(ScrollAction::PageDown);
				}
			}
			MouseEventKind::Drag(MouseButton::Left) if self.viewport.is_dragging() => {
				let y = mouse.row.saturating_sub(self.log_area.y) as usize;
				self.viewport.drag_to(y);
			}
			MouseEventKind::Up(MouseButton::Left) => self.viewport.end_drag(),
			_ => {}
		}
	}

	fn scrollbar_row(&self, column: u16, row: u16) -> Option<usize> {
		let area = self.log_area;
		if area.width == 0 || area.height == 0 {
			return None;
		}
		let on_column = column == area.x + area.width - 1;
		let on_rows = row >= area.y && row < area.y + area.height;
		(on_column && on_rows).then(|| (row - area.y) as usize)
	}

	pub fn render(&mut self, frame: &mut Frame) {
		let chunks = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Min(1),
				Constraint::Length(1),
			])
			.split(frame.area());

		self.log_area = chunks[1];
		let rows = self.log_area.height as usize;
		let previous = self.last_snapshot;
		let viewport = &mut self.viewport;
		// Viewport update and copy see the same buffer state.
		let (snapshot, range, lines) = self.buffer.read_window(|now| {
			viewport.on_append(now.evicted_since(&previous), now.size);
			viewport.set_visible_line_count(rows);
			viewport.visible_range()
		});
		self.last_snapshot = snapshot;
		let first_line_number = snapshot.total_evicted + range.start as u64 + 1;

		frame.render_widget(Paragraph::new(self.header_line(&snapshot)), chunks[0]);
		frame.render_stateful_widget(
			LogView::new(&lines)
				.first_line_number(first_line_number)
				.show_line_numbers(true),
			self.log_area,
			&mut self.viewport,
		);
		frame.render_widget(Paragraph::new(footer_line(&self.viewport)), chunks[2]);
	}

	fn header_line(&self, snapshot: &BufferSnapshot) -> Line<'static> {
		let status = self.status();
		let status_span = match status {
			ConnectionStatus::Connected => {
				Span::styled(format!(" {status} "), Style::default().fg(Color::Green))
			}
			ConnectionStatus::Connecting => {
				Span::styled(format!(" {status} "), Style::default().fg(Color::Yellow))
			}
			ConnectionStatus::Disconnected => Span::styled(
				" DISCONNECTED ",
				Style::default()
					.fg(Color::White)
					.bg(Color::Red)
					.add_modifier(Modifier::BOLD),
			),
		};

		let mut spans = vec![
			Span::styled("Sequence Log", Style::default().add_modifier(Modifier::BOLD)),
			Span::raw(" "),
			status_span,
			Span::raw(format!(
				" {} lines, {} evicted",
				snapshot.size, snapshot.total_evicted
			)),
		];
		let files = self.files.files();
		if let Some(latest) = files.last() {
			spans.push(Span::raw(format!(
				" | {} files, latest {}",
				files.len(),
				latest.canonical_path
			)));
		}
		Line::from(spans)
	}
}

fn footer_line(viewport: &Viewport) -> Line<'static> {
	let mode = if viewport.is_following_tail() {
		"following"
	} else {
		"history"
	};
	Line::from(vec![
		Span::styled(format!("[{mode}] "), Style::default().fg(Color::Cyan)),
		Span::styled(
			"↑/↓ line  PgUp/PgDn page  Home/End  wheel  drag scrollbar  q quit",
			Style::default().fg(Color::DarkGray),
		),
	])
}

#[cfg(test)]
mod tests {
	use super::*;
	use ratatui::{backend::TestBackend, Terminal};
	use seqlog_common_core::EntryLevel;
	use seqlog_console_buffer::RingEntry;

	fn app_with(
		capacity: usize,
		lines: usize,
	) -> (App, SharedRingBuffer, watch::Sender<ConnectionStatus>) {
		let buffer = SharedRingBuffer::new(capacity).unwrap();
		for n in 0..lines {
			buffer.add(RingEntry::new(EntryLevel::Info, format!("entry {n}")));
		}
		let (tx, rx) = watch::channel(ConnectionStatus::Connected);
		let app = App::new(buffer.clone(), FileListing::default(), rx);
		(app, buffer, tx)
	}

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
		MouseEvent {
			kind,
			column,
			row,
			modifiers: KeyModifiers::NONE,
		}
	}

	fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
		let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
		terminal.draw(|frame| app.render(frame)).unwrap();
		let buffer = terminal.backend().buffer();
		let area = buffer.area;
		(area.y..area.y + area.height)
			.map(|y| {
				(area.x..area.x + area.width)
					.map(|x| buffer[(x, y)].symbol().to_string())
					.collect()
			})
			.collect()
	}

	#[test]
	fn test_key_mapping() {
		assert_eq!(scroll_action_for_key(&key(KeyCode::Up)), Some(ScrollAction::LineUp));
		assert_eq!(scroll_action_for_key(&key(KeyCode::PageDown)), Some(ScrollAction::PageDown));
		assert_eq!(scroll_action_for_key(&key(KeyCode::End)), Some(ScrollAction::End));
		assert_eq!(scroll_action_for_key(&key(KeyCode::Char('x'))), None);
	}

	#[test]
	fn test_quit_keys() {
		let (mut app, _, _) = app_with(10, 0);
		app.handle_key(key(KeyCode::Esc));
		assert!(app.should_quit());

		let (mut app, _, _) = app_with(10, 0);
		app.handle_key(key(KeyCode::Char('q')));
		assert!(app.should_quit());
	}

	#[test]
	fn test_renders_tail_with_line_numbers() {
		let (mut app, _, _) = app_with(100, 30);
		let lines = draw(&mut app, 40, 12);

		// 10 log rows between header and footer.
		assert_eq!(app.viewport().visible_line_count(), 10);
		assert_eq!(app.viewport().visible_top(), 20);
		assert!(lines[1].starts_with("    21 entry 20"));
		assert!(lines[10].starts_with("    30 entry 29"));
		assert!(lines[0].contains("connected"));
		assert!(lines[11].contains("[following]"));
	}

	#[test]
	fn test_history_view_survives_eviction() {
		let (mut app, buffer, _) = app_with(50, 50);
		draw(&mut app, 40, 12);
		app.handle_key(key(KeyCode::Home));
		app.handle_key(key(KeyCode::PageDown));
		assert_eq!(app.viewport().visible_top(), 10);

		for n in 50..53 {
			buffer.add(RingEntry::new(EntryLevel::Info, format!("entry {n}")));
		}
		let lines = draw(&mut app, 40, 12);

		assert_eq!(app.viewport().visible_top(), 7);
		assert!(lines[1].starts_with("    11 entry 10"));
		assert!(lines[11].contains("[history]"));
	}

	#[test]
	fn test_header_and_line_numbers_agree_after_eviction() {
		let (mut app, buffer, _) = app_with(20, 20);
		draw(&mut app, 60, 12);
		for n in 20..35 {
			buffer.add(RingEntry::new(EntryLevel::Info, format!("entry {n}")));
		}
		let lines = draw(&mut app, 60, 12);

		assert!(lines[0].contains("20 lines, 15 evicted"));
		assert!(lines[1].starts_with("    26 entry 25"));
		assert!(lines[10].starts_with("    35 entry 34"));
		assert_eq!(app.viewport().visible_top(), 10);
	}

	#[test]
	fn test_disconnected_banner() {
		let (mut app, _, status) = app_with(10, 1);
		status.send_replace(ConnectionStatus::Disconnected);
		let lines = draw(&mut app, 60, 5);
		assert!(lines[0].contains("DISCONNECTED"));
	}

	#[test]
	fn test_mouse_wheel_and_drag() {
		// 110 lines over a 10-row view: 100 scrollable lines on a 10-row
		// track, so one row of drag moves ten lines.
		let (mut app, _, _) = app_with(200, 110);
		draw(&mut app, 40, 12);
		assert_eq!(app.viewport().visible_top(), 100);

		app.handle_event(Event::Mouse(mouse(MouseEventKind::ScrollUp, 5, 5)));
		assert_eq!(app.viewport().visible_top(), 97);

		app.handle_key(key(KeyCode::Home));
		// Thumb sits on the first track row, screen row 1, column 39.
		app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 39, 1));
		assert!(app.viewport().is_dragging());
		app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 39, 4));
		assert_eq!(app.viewport().visible_top(), 30);
		app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 39, 4));
		assert!(!app.viewport().is_dragging());
	}

	#[test]
	fn test_click_on_track_pages() {
		let (mut app, _, _) = app_with(200, 110);
		draw(&mut app, 40, 12);
		app.handle_key(key(KeyCode::Home));
		app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 39, 8));
		assert_eq!(app.viewport().visible_top(), 10);
		assert!(!app.viewport().is_dragging());
	}
}
