// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

/// Resolved XDG paths for Sequence Log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqLogPaths {
	/// User config file: ~/.config/seqlog/config.toml
	pub config_file: PathBuf,
	/// State directory: ~/.local/state/seqlog/
	pub state_dir: PathBuf,
}

impl SeqLogPaths {
	/// Default console diagnostics file.
	pub fn console_log_file(&self) -> PathBuf {
		self.state_dir.join("console.log")
	}
}

/// Resolve paths from `XDG_CONFIG_HOME` / `XDG_STATE_HOME`, falling back to
/// `~/.config` and `~/.local/state`.
pub fn resolve_paths() -> Result<SeqLogPaths, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let state_home = std::env::var_os("XDG_STATE_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/state"));

	tracing::debug!(
		config_home = %config_home.display(),
		state_home = %state_home.display(),
		"resolved XDG paths"
	);

	Ok(SeqLogPaths {
		config_file: config_home.join("seqlog/config.toml"),
		state_dir: state_home.join("seqlog"),
	})
}
