// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events queued for the window shell.

use alloc::string::String;

use atlas_interaction::{Cursor, InteractionKind};
use atlas_viewport::Viewport;
use kurbo::Point;

/// Something the window shell may want to react to.
///
/// A [`MapView`](crate::MapView) queues these in the order they happen; the
/// shell drains them after each call into the view.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification<K> {
    /// No qualifying input for the idle threshold.
    Idle,
    /// Enough of the previously visible area scrolled away that dependent
    /// data should be reloaded.
    ViewportShift,
    /// The hovered feature changed. `None` clears the info display.
    FeatureSnap {
        /// Hovered feature key.
        feature: Option<K>,
        /// Tooltip text for the feature, if the document can describe it.
        description: Option<String>,
    },
    /// The pointer moved to this (longitude, latitude).
    PointerMoved {
        /// Geographic pointer position.
        geo: Point,
    },
    /// The visible region changed.
    ViewportChanged(Viewport),
    /// A tile was requested; `total` tiles requested in this batch.
    ImageRequested {
        /// Tiles requested so far in this batch.
        total: u32,
    },
    /// A tile arrived.
    ImageReceived {
        /// Tiles received so far, never above `total`.
        received: u32,
        /// Tiles requested in this batch.
        total: u32,
    },
    /// The tile batch is complete.
    ImageFinished,
    /// A frame was painted.
    Painted {
        /// Time spent painting, in milliseconds.
        duration_ms: u64,
    },
    /// The view needs repainting; `full` includes base content.
    RedrawRequested {
        /// Whether base content must be repainted too.
        full: bool,
    },
    /// The pointer affordance changed.
    CursorChanged(Cursor),
    /// A new interaction became active.
    InteractionChanged(InteractionKind),
    /// Corner chrome moved after a resize.
    LayoutChanged {
        /// Top-left of the corner widget, in screen coordinates.
        corner_origin: Point,
    },
}
