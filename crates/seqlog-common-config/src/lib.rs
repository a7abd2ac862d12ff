// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for Sequence Log.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment, CLI)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`SEQLOG_*`)
//!
//! # Usage
//!
//! ```ignore
//! use seqlog_common_config::load_config;
//!
//! let config = load_config()?;
//! println!("console connects to {}", config.console.service_url);
//! ```

pub mod error;
pub mod layer;
pub mod paths;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::SeqLogConfigLayer;
pub use paths::{resolve_paths, SeqLogPaths};
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, OverrideSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeqLogConfig {
	pub client: ClientConfig,
	pub console: ConsoleConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`SEQLOG_*`)
/// 2. Config file (`$XDG_CONFIG_HOME/seqlog/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<SeqLogConfig, ConfigError> {
	let paths = resolve_paths()?;
	load_config_with_file(paths.config_file)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<SeqLogConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order, then finalize and validate.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<SeqLogConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = SeqLogConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: SeqLogConfigLayer) -> Result<SeqLogConfig, ConfigError> {
	let client = layer.client.unwrap_or_default().finalize();
	let console = layer.console.unwrap_or_default().finalize();

	validate_client(&client)?;
	validate_console(&console)?;

	info!(
		client_url = %client.service_url,
		client_level = %client.level,
		console_url = %console.service_url,
		capacity = console.capacity,
		tick_ms = console.tick_ms,
		"configuration loaded"
	);

	Ok(SeqLogConfig { client, console })
}

pub fn validate_client(config: &ClientConfig) -> Result<(), ConfigError> {
	validate_service_url("client.service_url", &config.service_url)
}

pub fn validate_console(config: &ConsoleConfig) -> Result<(), ConfigError> {
	if config.capacity == 0 {
		return Err(ConfigError::validation("console.capacity must be greater than 0"));
	}
	if config.tick_ms == 0 {
		return Err(ConfigError::validation("console.tick_ms must be greater than 0"));
	}
	validate_service_url("console.service_url", &config.service_url)
}

fn validate_service_url(key: &str, value: &str) -> Result<(), ConfigError> {
	let url = url::Url::parse(value)
		.map_err(|e| ConfigError::invalid_value(key, format!("'{value}' is not a URL: {e}")))?;
	match url.scheme() {
		"ws" | "wss" => Ok(()),
		other => Err(ConfigError::invalid_value(
			key,
			format!("scheme '{other}' is not ws or wss"),
		)),
	}
}
