// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic viewport box.

use kurbo::{Point, Rect, Size, Vec2};

/// The geographic region shown by a map view.
///
/// Stored as a normalized [`Rect`] where `x` is longitude and `y` is latitude
/// (`y0` is the southern edge). Widths and heights are never negative. A box
/// with zero area (a single point or a line) is valid and is treated as
/// "unset" by consumers comparing viewports.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    rect: Rect,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::UNSET
    }
}

impl Viewport {
    /// The empty viewport at the origin.
    pub const UNSET: Self = Self { rect: Rect::ZERO };

    /// Create a viewport from a geographic rectangle, normalizing its corners.
    pub fn new(rect: Rect) -> Self {
        Self { rect: rect.abs() }
    }

    /// Create the viewport spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            rect: Rect::from_points(a, b),
        }
    }

    /// A zero-area viewport located at `center`.
    pub fn at(center: Point) -> Self {
        Self::from_corners(center, center)
    }

    /// The underlying geographic rectangle.
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Longitude extent.
    pub fn lon_span(&self) -> f64 {
        self.rect.width()
    }

    /// Latitude extent.
    pub fn lat_span(&self) -> f64 {
        self.rect.height()
    }

    /// Geographic area of the box (square degrees).
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    /// Whether this viewport has no area.
    ///
    /// Non-finite extents are treated as unset as well.
    pub fn is_unset(&self) -> bool {
        !is_positive(self.area())
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// The overlapping region of two viewports.
    ///
    /// Disjoint viewports produce a zero-area rectangle.
    pub fn intersection(&self, other: &Self) -> Rect {
        self.rect.intersect(other.rect)
    }

    /// Area of the overlap between two viewports; `0.0` when they are disjoint.
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let overlap = self.intersection(other);
        if overlap.width() <= 0.0 || overlap.height() <= 0.0 {
            0.0
        } else {
            overlap.area()
        }
    }

    /// Move the box by a geographic offset.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            rect: self.rect + delta,
        }
    }

    /// Same size, new center.
    pub fn centered_on(&self, center: Point) -> Self {
        Self {
            rect: Rect::from_center_size(center, self.rect.size()),
        }
    }

    /// Zoom about `anchor`.
    ///
    /// A `factor` above `1.0` zooms in (the box shrinks), below `1.0` zooms out.
    /// The anchor keeps its relative position inside the box. Non-positive or
    /// non-finite factors leave the viewport untouched.
    pub fn scaled_about(&self, anchor: Point, factor: f64) -> Self {
        if !is_positive(factor) {
            return *self;
        }
        let r = self.rect;
        Self::new(Rect::new(
            anchor.x + (r.x0 - anchor.x) / factor,
            anchor.y + (r.y0 - anchor.y) / factor,
            anchor.x + (r.x1 - anchor.x) / factor,
            anchor.y + (r.y1 - anchor.y) / factor,
        ))
    }

    /// Grow the short side so the box has the aspect ratio of `screen`.
    ///
    /// The box is never shrunk, so everything that was requested stays visible.
    /// Unset viewports and empty screens are returned unchanged.
    pub fn fit_to_aspect(&self, screen: Size) -> Self {
        if self.is_unset() || !is_positive(screen.width) || !is_positive(screen.height) {
            return *self;
        }
        let target = screen.width / screen.height;
        let (lon, lat) = (self.lon_span(), self.lat_span());
        let size = if lon / lat < target {
            Size::new(lat * target, lat)
        } else {
            Size::new(lon, lon / target)
        };
        Self {
            rect: Rect::from_center_size(self.center(), size),
        }
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl From<Rect> for Viewport {
    fn from(rect: Rect) -> Self {
        Self::new(rect)
    }
}
