// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! UTF-8 sizing of text fields.

/// Number of bytes a code point occupies in UTF-8.
pub fn code_point_len(c: char) -> usize {
	match c as u32 {
		0..=0x7F => 1,
		0x80..=0x7FF => 2,
		0x800..=0xFFFF => 3,
		_ => 4,
	}
}

/// UTF-8 byte count of `text`, computed per code point.
///
/// Length prefixes on the wire carry this value, never a character count.
pub fn utf8_len(text: &str) -> usize {
	text.chars().map(code_point_len).sum()
}
