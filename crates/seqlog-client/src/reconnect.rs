// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! What happens after the connection closes.

use std::time::Duration;

/// Decides whether and when a CLOSED client reconnects.
pub trait ReconnectStrategy: Send + Sync {
	/// Keep accepting events while CLOSED, so they are flushed on the next
	/// successful open.
	fn retain_while_closed(&self) -> bool {
		false
	}

	/// Delay before reconnect attempt `attempt` (starting at 1), or `None`
	/// to stay CLOSED.
	fn next_delay(&self, attempt: u32) -> Option<Duration>;
}

/// CLOSED is terminal and events sent afterwards are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverReconnect;

impl ReconnectStrategy for NeverReconnect {
	fn next_delay(&self, _attempt: u32) -> Option<Duration> {
		None
	}
}

/// Exponential backoff with an attempt cap.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	/// `None` retries forever.
	pub max_attempts: Option<u32>,
	pub retain_while_closed: bool,
}

impl Default for ExponentialBackoff {
	fn default() -> Self {
		Self {
			base_delay: Duration::from_millis(500),
			max_delay: Duration::from_secs(30),
			backoff_factor: 2.0,
			max_attempts: None,
			retain_while_closed: true,
		}
	}
}

impl ReconnectStrategy for ExponentialBackoff {
	fn retain_while_closed(&self) -> bool {
		self.retain_while_closed
	}

	fn next_delay(&self, attempt: u32) -> Option<Duration> {
		if attempt == 0 || self.max_attempts.is_some_and(|max| attempt > max) {
			return None;
		}
		let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
		let secs = self.base_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
		if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
			return Some(self.max_delay);
		}
		Some(Duration::from_secs_f64(secs.max(0.0)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_never_reconnect() {
		assert!(!NeverReconnect.retain_while_closed());
		assert_eq!(NeverReconnect.next_delay(1), None);
	}

	#[test]
	fn test_backoff_grows_and_caps() {
		let strategy = ExponentialBackoff {
			base_delay: Duration::from_millis(100),
			max_delay: Duration::from_millis(350),
			backoff_factor: 2.0,
			max_attempts: Some(4),
			retain_while_closed: false,
		};
		assert_eq!(strategy.next_delay(1), Some(Duration::from_millis(100)));
		assert_eq!(strategy.next_delay(2), Some(Duration::from_millis(200)));
		assert_eq!(strategy.next_delay(3), Some(Duration::from_millis(350)));
		assert_eq!(strategy.next_delay(4), Some(Duration::from_millis(350)));
		assert_eq!(strategy.next_delay(5), None);
	}
}
