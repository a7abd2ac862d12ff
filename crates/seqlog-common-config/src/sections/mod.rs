// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

pub mod client;
pub mod console;

pub use client::{ClientConfig, ClientConfigLayer};
pub use console::{ConsoleConfig, ConsoleConfigLayer};
