// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas Interaction: turns raw map input into higher-level requests.
//!
//! ## Overview
//!
//! An interaction is a small state machine that consumes pointer, wheel and
//! key events over a map surface. It never mutates the view directly. Instead
//! each handler receives an [`InteractionCx`] that exposes the current
//! [`ViewTransform`](atlas_viewport::ViewTransform), a [`FeatureLookup`] for
//! hit testing, and a buffer of [`Request`]s the owner applies afterwards.
//!
//! - [`BaseInteraction`]: default browsing. Hover snapping, panning, wheel
//!   and keyboard zoom, idle detection.
//! - [`DragSelectInteraction`]: one-shot rubber-band zoom. Snapping is off;
//!   a non-empty selection requests the new viewport and a return to the
//!   default interaction.
//! - [`AnyInteraction`]: the closed set of interactions a map view can run,
//!   dispatching through the [`Interaction`] trait.
//!
//! ## Idle detection
//!
//! Every interaction owns one [`IdleTimer`], a plain deadline fed with the
//! timestamps carried by events. The owner polls it with
//! [`Interaction::poll_idle`] when the deadline passes. A dropped interaction
//! takes its deadline with it, so a replaced interaction can never report idle.
//!
//! ## Example
//!
//! ```rust
//! use atlas_interaction::{
//!     DragSelectInteraction, Interaction, InteractionConfig, InteractionCx, NoFeatures,
//!     PointerEvent, Request, Requests,
//! };
//! use atlas_viewport::{ViewTransform, Viewport};
//! use kurbo::{Point, Rect, Size};
//!
//! let view = ViewTransform::new(
//!     Viewport::new(Rect::new(0.0, 0.0, 10.0, 10.0)),
//!     Size::new(100.0, 100.0),
//! );
//! let mut select = DragSelectInteraction::<u32>::new(InteractionConfig::default());
//! let mut requests = Requests::new();
//! let mut cx = InteractionCx::new(&view, &NoFeatures, &mut requests);
//!
//! select.on_pointer_down(&mut cx, &PointerEvent::new(Point::new(10.0, 10.0), 0));
//! select.on_pointer_move(&mut cx, &PointerEvent::new(Point::new(50.0, 40.0), 16));
//! select.on_pointer_up(&mut cx, &PointerEvent::new(Point::new(50.0, 40.0), 32));
//!
//! assert_eq!(requests.last(), Some(&Request::LaunchDefault));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

// Property tests expand to `std` paths and macros.
#[cfg(test)]
#[macro_use]
extern crate std;

mod base;
mod context;
mod drag_select;
mod event;
mod idle;
mod interaction;

pub use base::{BaseInteraction, InteractionConfig};
pub use context::{
    FeatureLookup, InteractionCx, NoFeatures, OverlayPainter, Request, Requests, StrokeStyle,
};
pub use drag_select::{DragSelectInteraction, DragState};
pub use event::{Key, KeyEvent, Modifiers, PointerButtons, PointerEvent, WheelEvent};
pub use idle::IdleTimer;
pub use interaction::{AnyInteraction, Cursor, Interaction, InteractionKind};
