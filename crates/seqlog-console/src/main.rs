// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod app;
mod connection;
mod tui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use seqlog_common_config::{
	load_from_sources, resolve_paths, ConsoleConfigLayer, DefaultsSource, EnvSource,
	OverrideSource, SeqLogConfigLayer, TomlSource,
};
use seqlog_console_buffer::{RingEntry, SharedRingBuffer};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use connection::{log_url, ConnectionStatus, FileListing};

#[derive(Parser, Debug)]
#[command(
	name = "seqlog-console",
	about = "Tail Sequence Log service output in the terminal",
	version
)]
struct Cli {
	/// Service base URL; the console connects to `<url>/getLog`.
	#[arg(long)]
	service_url: Option<String>,

	/// Lines kept in memory.
	#[arg(long)]
	capacity: Option<usize>,

	/// Redraw interval in milliseconds.
	#[arg(long)]
	tick_ms: Option<u64>,

	/// Config file to read instead of the XDG default.
	#[arg(long, env = "SEQLOG_CONFIG")]
	config: Option<PathBuf>,

	/// File the console writes its own logs to.
	#[arg(long)]
	log_file: Option<PathBuf>,
}

impl Cli {
	fn override_layer(&self) -> SeqLogConfigLayer {
		SeqLogConfigLayer {
			client: None,
			console: Some(ConsoleConfigLayer {
				service_url: self.service_url.clone(),
				capacity: self.capacity,
				tick_ms: self.tick_ms,
				log_file: self.log_file.clone(),
			}),
		}
	}
}

/// The terminal belongs to the UI, so diagnostics go to a file.
fn init_tracing(log_file: &Path) -> Result<()> {
	if let Some(dir) = log_file.parent() {
		std::fs::create_dir_all(dir)
			.with_context(|| format!("failed to create {}", dir.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(log_file)
		.with_context(|| format!("failed to open {}", log_file.display()))?;

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
		.init();
	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let paths = resolve_paths().context("failed to resolve seqlog directories")?;
	let config_file = cli
		.config
		.clone()
		.unwrap_or_else(|| paths.config_file.clone());
	let config = load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_file)),
		Box::new(EnvSource),
		Box::new(OverrideSource::new(cli.override_layer())),
	])
	.context("failed to load configuration")?;
	let console = config.console;

	let log_file = console
		.log_file
		.clone()
		.unwrap_or_else(|| paths.console_log_file());
	init_tracing(&log_file)?;

	let url = log_url(&console.service_url)
		.with_context(|| format!("invalid service URL {}", console.service_url))?;
	info!(
		url = %url,
		capacity = console.capacity,
		tick_ms = console.tick_ms,
		log_file = %log_file.display(),
		"starting console"
	);

	let buffer = SharedRingBuffer::new(console.capacity).context("failed to allocate log buffer")?;
	buffer.add(RingEntry::system(format!(
		"seqlog-console {} connecting to {url}",
		env!("CARGO_PKG_VERSION")
	)));
	let files = FileListing::default();
	let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connecting);

	let connection = tokio::spawn(connection::run(
		url,
		buffer.clone(),
		files.clone(),
		status_tx,
	));

	let mut app = App::new(buffer, files, status_rx);
	let tick = Duration::from_millis(console.tick_ms);
	let result = tokio::task::block_in_place(|| tui::run(&mut app, tick));

	connection.abort();
	info!("console exiting");
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_cli_definition() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_flags_become_override_layer() {
		let cli = Cli::try_parse_from([
			"seqlog-console",
			"--service-url",
			"ws://logs:9000",
			"--capacity",
			"500",
			"--tick-ms",
			"20",
		])
		.unwrap();

		let layer = cli.override_layer().console.unwrap();
		assert_eq!(layer.service_url.as_deref(), Some("ws://logs:9000"));
		assert_eq!(layer.capacity, Some(500));
		assert_eq!(layer.tick_ms, Some(20));
		assert_eq!(layer.log_file, None);
	}

	#[test]
	fn test_cli_layer_wins_over_defaults() {
		let cli = Cli::try_parse_from(["seqlog-console", "--capacity", "42"]).unwrap();
		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(OverrideSource::new(cli.override_layer())),
		])
		.unwrap();
		assert_eq!(config.console.capacity, 42);
		assert_eq!(config.console.tick_ms, 50);
	}
}
