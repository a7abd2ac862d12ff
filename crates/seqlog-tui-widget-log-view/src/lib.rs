// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Log view for the console: a [`Viewport`] that follows the tail of a ring
//! buffer or holds its place in history, and a [`LogView`] widget that draws
//! it.

pub mod scrollbar;
pub mod viewport;
pub mod widget;

pub use scrollbar::{ScrollbarGeometry, MIN_THUMB_ROWS};
pub use viewport::{ScrollAction, Viewport, WHEEL_LINES};
pub use widget::{level_style, LogView};
