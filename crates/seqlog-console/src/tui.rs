// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
	disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

/// Restores the terminal on drop, including on error paths.
struct TerminalGuard;

impl TerminalGuard {
	fn enter() -> Result<Self> {
		enable_raw_mode().context("enable raw mode")?;
		let mut stdout = io::stdout();
		execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
			.context("enter alternate screen")?;
		Ok(Self)
	}
}

impl Drop for TerminalGuard {
	fn drop(&mut self) {
		let _ = disable_raw_mode();
		let mut stdout = io::stdout();
		let _ = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
	}
}

/// Redraws every `tick`, handling input in between, until the app quits.
pub fn run(app: &mut App, tick: Duration) -> Result<()> {
	let _guard = TerminalGuard::enter()?;
	let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

	loop {
		terminal.draw(|frame| app.render(frame))?;

		if event::poll(tick)? {
			app.handle_event(event::read()?);
			while event::poll(Duration::ZERO)? {
				app.handle_event(event::read()?);
			}
		}

		if app.should_quit() {
			return Ok(());
		}
	}
}
