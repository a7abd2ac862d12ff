// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Top-level partial configuration, as read from one source.

use serde::{Deserialize, Serialize};

use crate::sections::{ClientConfigLayer, ConsoleConfigLayer};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeqLogConfigLayer {
	pub client: Option<ClientConfigLayer>,
	pub console: Option<ConsoleConfigLayer>,
}

impl SeqLogConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.client, other.client, ClientConfigLayer::merge);
		merge_section(&mut self.console, other.console, ConsoleConfigLayer::merge);
	}
}

fn merge_section<T>(slot: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (slot.as_mut(), other) {
		(Some(current), Some(other)) => merge(current, other),
		(None, Some(other)) => *slot = Some(other),
		(_, None) => {}
	}
}
