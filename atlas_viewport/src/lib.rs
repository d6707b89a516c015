// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas Viewport: the geographic box a map view shows, and how it maps to the screen.
//!
//! ## Overview
//!
//! - [`Viewport`]: an axis-aligned box in (longitude, latitude) space with the
//!   area and intersection helpers needed to compare two views of the map.
//!   A zero-area box is valid and means "unset".
//! - [`ViewTransform`]: pairs a [`Viewport`] with the logical pixel size of the
//!   surface showing it, and converts points and deltas between screen and
//!   geographic space.
//! - [`parse_coordinate`] / [`format_coordinate`]: the `lon , lat` text form
//!   used by coordinate entry fields.
//!
//! Geometry comes from [`kurbo`]. Screen space has y pointing down, geographic
//! space has latitude pointing up; the transform is a plain linear mapping
//! between the two (no map projection is applied here).
//!
//! ## Example
//!
//! ```rust
//! use atlas_viewport::{Viewport, ViewTransform};
//! use kurbo::{Point, Rect, Size};
//!
//! let previous = Viewport::new(Rect::new(0.0, 0.0, 10.0, 10.0));
//! let current = Viewport::new(Rect::new(8.0, 0.0, 18.0, 10.0));
//! assert_eq!(current.intersection_area(&previous), 20.0);
//!
//! let view = ViewTransform::new(current, Size::new(100.0, 100.0));
//! // Top-left pixel is the north-west corner.
//! assert_eq!(view.to_geo(Point::ZERO), Point::new(8.0, 10.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coord;
mod transform;
mod viewport;

pub use coord::{CoordinateError, format_coordinate, parse_coordinate};
pub use transform::ViewTransform;
pub use viewport::Viewport;
