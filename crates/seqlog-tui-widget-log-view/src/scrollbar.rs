// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Smallest thumb, in rows.
pub const MIN_THUMB_ROWS: usize = 1;

/// Thumb placement on a vertical track, in track rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarGeometry {
	pub thumb_top: usize,
	pub thumb_height: usize,
	pub track: usize,
}

impl ScrollbarGeometry {
	/// When everything fits, the thumb fills the track.
	pub fn compute(
		visible_top: usize,
		visible_line_count: usize,
		size: usize,
		track: usize,
		min_thumb: usize,
	) -> Self {
		if size <= visible_line_count || track == 0 {
			return Self {
				thumb_top: 0,
				thumb_height: track,
				track,
			};
		}

		let proportional = visible_line_count.saturating_mul(track) / size;
		let thumb_height = proportional.max(min_thumb).min(track);
		let scrollable = size - visible_line_count;
		let free = track - thumb_height;
		let thumb_top = (free * visible_top.min(scrollable)) / scrollable;

		Self {
			thumb_top,
			thumb_height,
			track,
		}
	}

	pub fn contains(&self, y: usize) -> bool {
		y >= self.thumb_top && y < self.thumb_top + self.thumb_height
	}

	/// Whether all content fits and there is nothing to scroll.
	pub fn is_full(&self) -> bool {
		self.thumb_top == 0 && self.thumb_height == self.track
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_content_fits() {
		let geometry = ScrollbarGeometry::compute(0, 10, 4, 10, MIN_THUMB_ROWS);
		assert!(geometry.is_full());
		assert!(geometry.contains(9));
	}

	#[test]
	fn test_thumb_tracks_position() {
		let top = ScrollbarGeometry::compute(0, 10, 100, 10, MIN_THUMB_ROWS);
		assert_eq!(top.thumb_height, 1);
		assert_eq!(top.thumb_top, 0);

		let bottom = ScrollbarGeometry::compute(90, 10, 100, 10, MIN_THUMB_ROWS);
		assert_eq!(bottom.thumb_top, 9);

		let middle = ScrollbarGeometry::compute(45, 10, 100, 10, MIN_THUMB_ROWS);
		assert_eq!(middle.thumb_top, 4);
	}

	#[test]
	fn test_min_thumb_applies() {
		let geometry = ScrollbarGeometry::compute(0, 10, 10_000, 20, 3);
		assert_eq!(geometry.thumb_height, 3);
	}

	proptest! {
		#[test]
		fn test_thumb_within_track(
			size in 0usize..5000,
			visible in 0usize..200,
			track in 0usize..200,
			top in 0usize..5000,
		) {
			let geometry = ScrollbarGeometry::compute(top, visible, size, track, MIN_THUMB_ROWS);
			prop_assert!(geometry.thumb_top + geometry.thumb_height <= track);
		}
	}
}
