// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration section.

use std::fmt;

use seqlog_common_core::LogLevel;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const DEFAULT_SERVICE_URL: &str = "ws://127.0.0.1:8080";
pub const DEFAULT_FILE_NAME: &str = "default.slog";
pub const DEFAULT_MAX_PENDING: usize = 10_000;

#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfigLayer {
	pub service_url: Option<String>,
	pub file_name: Option<String>,
	pub level: Option<LogLevel>,
	pub user: Option<String>,
	pub password: Option<String>,
	pub max_pending: Option<usize>,
}

impl ClientConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.service_url.is_some() {
			self.service_url = other.service_url;
		}
		if other.file_name.is_some() {
			self.file_name = other.file_name;
		}
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.user.is_some() {
			self.user = other.user;
		}
		if other.password.is_some() {
			self.password = other.password;
		}
		if other.max_pending.is_some() {
			self.max_pending = other.max_pending;
		}
	}

	pub fn finalize(self) -> ClientConfig {
		ClientConfig {
			service_url: self
				.service_url
				.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
			file_name: self
				.file_name
				.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
			level: self.level.unwrap_or_default(),
			user: self.user.unwrap_or_default(),
			password: Zeroizing::new(self.password.unwrap_or_default()),
			max_pending: self.max_pending.unwrap_or(DEFAULT_MAX_PENDING),
		}
	}
}

impl fmt::Debug for ClientConfigLayer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfigLayer")
			.field("service_url", &self.service_url)
			.field("file_name", &self.file_name)
			.field("level", &self.level)
			.field("user", &self.user)
			.field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
			.field("max_pending", &self.max_pending)
			.finish()
	}
}

/// Resolved settings handed to `SequenceLogClient::configure`.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
	pub service_url: String,
	pub file_name: String,
	pub level: LogLevel,
	pub user: String,
	pub password: Zeroizing<String>,
	/// Upper bound on events held while not OPEN.
	pub max_pending: usize,
}

impl ClientConfig {
	pub fn new(service_url: impl Into<String>, file_name: impl Into<String>, level: LogLevel) -> Self {
		Self {
			service_url: service_url.into(),
			file_name: file_name.into(),
			level,
			..Self::default()
		}
	}

	pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
		self.user = user.into();
		self.password = Zeroizing::new(password.into());
		self
	}

	pub fn with_max_pending(mut self, max_pending: usize) -> Self {
		self.max_pending = max_pending;
		self
	}
}

impl Default for ClientConfig {
	fn default() -> Self {
		ClientConfigLayer::default().finalize()
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("service_url", &self.service_url)
			.field("file_name", &self.file_name)
			.field("level", &self.level)
			.field("user", &self.user)
			.field("password", &"[REDACTED]")
			.field("max_pending", &self.max_pending)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layer_finalize_defaults() {
		let config = ClientConfigLayer::default().finalize();
		assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
		assert_eq!(config.file_name, DEFAULT_FILE_NAME);
		assert_eq!(config.level, LogLevel::All);
		assert!(config.user.is_empty());
		assert_eq!(config.max_pending, DEFAULT_MAX_PENDING);
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = ClientConfigLayer {
			service_url: Some("ws://a:1".into()),
			level: Some(LogLevel::Debug),
			..Default::default()
		};
		base.merge(ClientConfigLayer {
			level: Some(LogLevel::Warn),
			..Default::default()
		});
		assert_eq!(base.service_url.as_deref(), Some("ws://a:1"));
		assert_eq!(base.level, Some(LogLevel::Warn));
	}

	#[test]
	fn test_debug_redacts_password() {
		let config = ClientConfig::default().with_credentials("alice", "hunter2");
		assert!(!format!("{config:?}").contains("hunter2"));

		let layer = ClientConfigLayer {
			password: Some("hunter2".into()),
			..Default::default()
		};
		assert!(!format!("{layer:?}").contains("hunter2"));
	}

	#[test]
	fn test_deserialize_layer_partial() {
		let layer: ClientConfigLayer = toml::from_str(
			r#"
level = "WARN"
file_name = "app.slog"
"#,
		)
		.unwrap();
		assert_eq!(layer.level, Some(LogLevel::Warn));
		assert_eq!(layer.file_name.as_deref(), Some("app.slog"));
		assert!(layer.service_url.is_none());
	}
}
