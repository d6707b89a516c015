// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-shift heuristic.

use atlas_viewport::Viewport;

/// Whether moving from `previous` to `current` scrolled away enough of the
/// previously visible area that dependent data should be reloaded.
///
/// The change counts as a shift when the overlap is strictly smaller than the
/// current area and the overlap ratio is at most `threshold`. An unset
/// (zero-area) `previous` or `current` never counts.
///
/// ```
/// use atlas_map_view::is_viewport_shift;
/// use atlas_viewport::Viewport;
/// use kurbo::Rect;
///
/// let a = Viewport::new(Rect::new(0.0, 0.0, 10.0, 10.0));
/// let b = Viewport::new(Rect::new(8.0, 0.0, 18.0, 10.0));
/// assert!(is_viewport_shift(&a, &b, 0.75));
/// assert!(!is_viewport_shift(&a, &a, 0.75));
/// ```
pub fn is_viewport_shift(previous: &Viewport, current: &Viewport, threshold: f64) -> bool {
    if previous.is_unset() || current.is_unset() {
        return false;
    }
    let area = current.area();
    let overlap = current.intersection_area(previous);
    overlap < area && overlap / area <= threshold
}
