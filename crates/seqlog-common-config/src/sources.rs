// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment and CLI overrides.

use std::path::PathBuf;

use seqlog_common_core::LogLevel;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::SeqLogConfigLayer;
use crate::sections::{ClientConfigLayer, ConsoleConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<SeqLogConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<SeqLogConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(SeqLogConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<SeqLogConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(SeqLogConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: SeqLogConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: SEQLOG_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<SeqLogConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(SeqLogConfigLayer {
			client: Some(load_client_from_env()?),
			console: Some(load_console_from_env()?),
		})
	}
}

/// A layer assembled by the caller, typically from parsed CLI flags.
pub struct OverrideSource {
	layer: SeqLogConfigLayer,
}

impl OverrideSource {
	pub fn new(layer: SeqLogConfigLayer) -> Self {
		Self { layer }
	}
}

impl ConfigSource for OverrideSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<SeqLogConfigLayer, ConfigError> {
		Ok(self.layer.clone())
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, kind: &str) -> Result<Option<T>, ConfigError> {
	match env_var(name) {
		Some(v) => v
			.trim()
			.parse()
			.map(Some)
			.map_err(|_| ConfigError::invalid_value(name, format!("invalid {kind} value '{v}'"))),
		None => Ok(None),
	}
}

fn load_client_from_env() -> Result<ClientConfigLayer, ConfigError> {
	Ok(ClientConfigLayer {
		service_url: env_var("SEQLOG_CLIENT_SERVICE_URL"),
		file_name: env_var("SEQLOG_CLIENT_FILE_NAME"),
		level: env_parse::<LogLevel>("SEQLOG_CLIENT_LEVEL", "level")?,
		user: env_var("SEQLOG_CLIENT_USER"),
		password: env_var("SEQLOG_CLIENT_PASSWORD"),
		max_pending: env_parse("SEQLOG_CLIENT_MAX_PENDING", "usize")?,
	})
}

fn load_console_from_env() -> Result<ConsoleConfigLayer, ConfigError> {
	Ok(ConsoleConfigLayer {
		service_url: env_var("SEQLOG_CONSOLE_SERVICE_URL"),
		capacity: env_parse("SEQLOG_CONSOLE_CAPACITY", "usize")?,
		tick_ms: env_parse("SEQLOG_CONSOLE_TICK_MS", "u64")?,
		log_file: env_var("SEQLOG_CONSOLE_LOG_FILE").map(PathBuf::from),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.client.is_none());
		assert!(layer.console.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/seqlog.toml").load().unwrap();
		assert!(layer.console.is_none());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[console]\ncapacity = 64\ntick_ms = 10").unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		let console = layer.console.unwrap();
		assert_eq!(console.capacity, Some(64));
		assert_eq!(console.tick_ms, Some(10));
	}

	#[test]
	fn test_toml_source_reports_parse_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[console]\ncapacity = \"many\"").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_override_source_returns_layer() {
		let layer = SeqLogConfigLayer {
			console: Some(ConsoleConfigLayer {
				tick_ms: Some(7),
				..Default::default()
			}),
			..Default::default()
		};
		let source = OverrideSource::new(layer.clone());
		assert_eq!(source.precedence(), Precedence::Cli);
		assert_eq!(source.load().unwrap(), layer);
	}
}
