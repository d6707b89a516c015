// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen <-> geographic conversion for a viewport shown on a surface.

use kurbo::{Point, Rect, Size, Vec2};

use crate::Viewport;

/// A [`Viewport`] paired with the logical pixel size of the surface it is shown on.
///
/// The mapping is linear on both axes: the top-left pixel is the north-west
/// corner of the viewport and the bottom-right pixel is the south-east corner.
/// When the surface has no area every screen point maps to the viewport center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    viewport: Viewport,
    screen: Size,
}

impl ViewTransform {
    /// Create a transform for `viewport` displayed on a surface of `screen` size.
    pub const fn new(viewport: Viewport, screen: Size) -> Self {
        Self { viewport, screen }
    }

    /// The geographic region shown.
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The surface size in logical pixels.
    pub const fn screen(&self) -> Size {
        self.screen
    }

    /// The surface as a rectangle anchored at the origin.
    pub fn screen_rect(&self) -> Rect {
        self.screen.to_rect()
    }

    /// Replace the geographic region shown.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the surface size.
    pub fn set_screen(&mut self, screen: Size) {
        self.screen = screen;
    }

    fn has_area(&self) -> bool {
        self.screen.width > 0.0 && self.screen.height > 0.0
    }

    /// Convert a screen position to (longitude, latitude).
    pub fn to_geo(&self, screen: Point) -> Point {
        if !self.has_area() {
            return self.viewport.center();
        }
        let r = self.viewport.rect();
        Point::new(
            r.x0 + screen.x / self.screen.width * r.width(),
            r.y1 - screen.y / self.screen.height * r.height(),
        )
    }

    /// Convert (longitude, latitude) to a screen position.
    ///
    /// An unset viewport has no scale; every point maps to the screen center.
    pub fn to_screen(&self, geo: Point) -> Point {
        let r = self.viewport.rect();
        if self.viewport.is_unset() {
            return self.screen_rect().center();
        }
        Point::new(
            (geo.x - r.x0) / r.width() * self.screen.width,
            (r.y1 - geo.y) / r.height() * self.screen.height,
        )
    }

    /// Convert a screen-space displacement to a geographic one.
    ///
    /// Moving down on screen moves south, so the y component flips sign.
    pub fn delta_to_geo(&self, delta: Vec2) -> Vec2 {
        if !self.has_area() {
            return Vec2::ZERO;
        }
        Vec2::new(
            delta.x / self.screen.width * self.viewport.lon_span(),
            -delta.y / self.screen.height * self.viewport.lat_span(),
        )
    }

    /// The geographic box spanned by two screen points.
    pub fn screen_box_to_geo(&self, a: Point, b: Point) -> Viewport {
        Viewport::from_corners(self.to_geo(a), self.to_geo(b))
    }
}
