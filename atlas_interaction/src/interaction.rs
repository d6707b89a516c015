// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction interface and the closed set of interactions a map view can run.

use atlas_viewport::ViewTransform;

use crate::{
    BaseInteraction, DragSelectInteraction, IdleTimer, InteractionCx, KeyEvent, OverlayPainter,
    PointerEvent, WheelEvent,
};

/// Pointer affordance an interaction wants shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Open hand: the map can be dragged.
    Grab,
    /// Closed hand: the map is being dragged.
    Grabbing,
    /// Arrow over a hovered feature.
    Hover,
    /// Crosshair with a magnifier: drag out a region to zoom into.
    ZoomRegion,
}

/// Which interaction variant is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Default browsing: pan, zoom, hover features.
    Browse,
    /// One-shot rubber-band selection that zooms into the selected region.
    DragSelect,
}

/// Behavior shared by every interaction.
///
/// Handlers receive an [`InteractionCx`] through which they read the view,
/// hit-test features, and queue [`Request`](crate::Request)s for the owner.
/// Every event carries its own timestamp; idle detection is polled
/// separately through [`Interaction::poll_idle`].
pub trait Interaction<K> {
    /// Which variant this is.
    fn kind(&self) -> InteractionKind;

    /// A pointer button was pressed.
    fn on_pointer_down(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent);

    /// A pointer button was released.
    fn on_pointer_up(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent);

    /// The pointer moved.
    fn on_pointer_move(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent);

    /// The wheel turned.
    fn on_wheel(&mut self, cx: &mut InteractionCx<'_, K>, event: &WheelEvent);

    /// A double click was recognized.
    fn on_double_click(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent);

    /// A key was pressed.
    fn on_key(&mut self, cx: &mut InteractionCx<'_, K>, event: &KeyEvent);

    /// Draw overlays on top of the painted map.
    fn paint_overlay(&self, painter: &mut dyn OverlayPainter<K>, view: &ViewTransform);

    /// Whether pointer moves look up features under the pointer.
    fn is_snap_enabled(&self) -> bool;

    /// Turn feature lookup on or off.
    fn set_snap_enabled(&mut self, enabled: bool);

    /// The currently hovered feature key.
    fn snapped(&self) -> Option<&K>;

    /// The cursor this interaction wants shown.
    fn cursor(&self) -> Cursor;

    /// The idle countdown owned by this interaction.
    fn idle_timer(&self) -> &IdleTimer;

    /// Fire the idle countdown if due. Returns `true` once per countdown.
    fn poll_idle(&mut self, now: u64) -> bool;

    /// Stop the idle countdown and abandon any gesture in progress.
    ///
    /// Called before the interaction is replaced.
    fn deactivate(&mut self);

    /// Forget transient state (hover, gestures) while staying active.
    fn reinitialize(&mut self);
}

/// One of the interactions a map view can run.
#[derive(Clone, Debug)]
pub enum AnyInteraction<K> {
    /// See [`BaseInteraction`].
    Browse(BaseInteraction<K>),
    /// See [`DragSelectInteraction`].
    DragSelect(DragSelectInteraction<K>),
}

impl<K> From<BaseInteraction<K>> for AnyInteraction<K> {
    fn from(interaction: BaseInteraction<K>) -> Self {
        Self::Browse(interaction)
    }
}

impl<K> From<DragSelectInteraction<K>> for AnyInteraction<K> {
    fn from(interaction: DragSelectInteraction<K>) -> Self {
        Self::DragSelect(interaction)
    }
}

impl<K: Clone + PartialEq> AnyInteraction<K> {
    fn inner(&self) -> &dyn Interaction<K> {
        match self {
            Self::Browse(i) => i,
            Self::DragSelect(i) => i,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Interaction<K> {
        match self {
            Self::Browse(i) => i,
            Self::DragSelect(i) => i,
        }
    }
}

impl<K: Clone + PartialEq> Interaction<K> for AnyInteraction<K> {
    fn kind(&self) -> InteractionKind {
        self.inner().kind()
    }

    fn on_pointer_down(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.inner_mut().on_pointer_down(cx, event);
    }

    fn on_pointer_up(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.inner_mut().on_pointer_up(cx, event);
    }

    fn on_pointer_move(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.inner_mut().on_pointer_move(cx, event);
    }

    fn on_wheel(&mut self, cx: &mut InteractionCx<'_, K>, event: &WheelEvent) {
        self.inner_mut().on_wheel(cx, event);
    }

    fn on_double_click(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.inner_mut().on_double_click(cx, event);
    }

    fn on_key(&mut self, cx: &mut InteractionCx<'_, K>, event: &KeyEvent) {
        self.inner_mut().on_key(cx, event);
    }

    fn paint_overlay(&self, painter: &mut dyn OverlayPainter<K>, view: &ViewTransform) {
        self.inner().paint_overlay(painter, view);
    }

    fn is_snap_enabled(&self) -> bool {
        self.inner().is_snap_enabled()
    }

    fn set_snap_enabled(&mut self, enabled: bool) {
        self.inner_mut().set_snap_enabled(enabled);
    }

    fn snapped(&self) -> Option<&K> {
        self.inner().snapped()
    }

    fn cursor(&self) -> Cursor {
        self.inner().cursor()
    }

    fn idle_timer(&self) -> &IdleTimer {
        self.inner().idle_timer()
    }

    fn poll_idle(&mut self, now: u64) -> bool {
        self.inner_mut().poll_idle(now)
    }

    fn deactivate(&mut self) {
        self.inner_mut().deactivate();
    }

    fn reinitialize(&mut self) {
        self.inner_mut().reinitialize();
    }
}
