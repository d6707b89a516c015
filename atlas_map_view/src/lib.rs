// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas Map View: the controller between a map surface and its window shell.
//!
//! ## Overview
//!
//! [`MapView`] owns exactly one active interaction (see
//! [`atlas_interaction`]), forwards input to it, and applies the requests it
//! queues: panning, zooming, showing a selected region, going back to the
//! default interaction. It also:
//!
//! - polls the active interaction's idle countdown from [`MapView::tick`] and
//!   runs the viewport-shift heuristic ([`is_viewport_shift`]) on idle,
//! - counts background tile requests and arrivals ([`TileProgress`]),
//!   clamping late or duplicate reports,
//! - keeps the corner widget anchored on resize,
//! - paints through a [`RenderSurface`]: base content first, then the
//!   interaction overlay.
//!
//! Nothing is called back. Every observable change is queued as a
//! [`Notification`] that the shell drains after calling into the view.
//!
//! ## Driving a view
//!
//! The host loop feeds input events, sleeps until [`MapView::next_deadline`],
//! and calls [`MapView::tick`] with the current time. Tile sources running on
//! other threads send [`TileEvent`]s back to the loop, which applies them with
//! [`MapView::on_tile_event`].
//!
//! ```rust
//! use atlas_interaction::{NoFeatures, PointerEvent};
//! use atlas_map_view::{MapView, MapViewConfig, Notification};
//! use atlas_viewport::Viewport;
//! use kurbo::{Point, Rect, Size};
//!
//! let mut view = MapView::<u32>::new(
//!     MapViewConfig::default(),
//!     Viewport::new(Rect::new(0.0, 0.0, 10.0, 10.0)),
//!     Size::new(100.0, 100.0),
//! );
//!
//! view.on_pointer_move(&NoFeatures, &PointerEvent::new(Point::new(50.0, 50.0), 0));
//! let deadline = view.next_deadline().unwrap();
//! view.tick(deadline);
//!
//! assert!(view.drain_notifications().any(|n| n == Notification::Idle));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

// Property tests expand to `std` paths and macros.
#[cfg(test)]
#[macro_use]
extern crate std;

mod config;
mod notify;
mod shift;
mod tiles;
mod view;

pub use config::MapViewConfig;
pub use notify::Notification;
pub use shift::is_viewport_shift;
pub use tiles::{TileEvent, TileProgress};
pub use view::{MapView, RenderSurface};
