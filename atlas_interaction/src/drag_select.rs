// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot rubber-band zoom.
//!
//! States: `Idle -> Dragging -> Idle`.
//!
//! - Press records both corners at the press position.
//! - Move (while dragging) updates the current corner and asks for an overlay redraw.
//! - Release computes the geographic box spanned by the corners. An empty box
//!   ends the gesture with no side effect. Otherwise the owner is asked to show
//!   the box, repaint fully, and relaunch the default interaction.
//!
//! Snapping is off for the whole lifetime of the interaction.

use atlas_viewport::ViewTransform;
use kurbo::{Point, Rect};

use crate::{
    BaseInteraction, Cursor, IdleTimer, Interaction, InteractionConfig, InteractionCx,
    InteractionKind, Key, KeyEvent, OverlayPainter, PointerEvent, Request, StrokeStyle,
    WheelEvent,
};

/// Progress of the rubber-band gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No button held.
    #[default]
    Idle,
    /// Button held since `start`; the pointer is at `current`.
    Dragging {
        /// Press position, in screen coordinates.
        start: Point,
        /// Latest pointer position, in screen coordinates.
        current: Point,
    },
}

impl DragState {
    /// The screen rectangle being selected, if a drag is in progress.
    pub fn selection(&self) -> Option<Rect> {
        match *self {
            Self::Idle => None,
            Self::Dragging { start, current } => Some(Rect::from_points(start, current)),
        }
    }
}

/// Interaction that zooms into a dragged-out region, then hands control back.
///
/// Wheel, double-click and key input behave as in [`BaseInteraction`].
#[derive(Clone, Debug)]
pub struct DragSelectInteraction<K> {
    base: BaseInteraction<K>,
    state: DragState,
}

impl<K: Clone + PartialEq> DragSelectInteraction<K> {
    /// Create a drag-select interaction waiting for a press.
    pub fn new(config: InteractionConfig) -> Self {
        let mut base = BaseInteraction::new(config);
        base.set_snap_enabled(false);
        Self {
            base,
            state: DragState::Idle,
        }
    }

    /// Current gesture state.
    pub const fn state(&self) -> DragState {
        self.state
    }

    fn cancel(&mut self) {
        if self.state != DragState::Idle {
            tracing::debug!("selection discarded");
        }
        self.state = DragState::Idle;
    }
}

impl<K: Clone + PartialEq> Interaction<K> for DragSelectInteraction<K> {
    fn kind(&self) -> InteractionKind {
        InteractionKind::DragSelect
    }

    fn on_pointer_down(&mut self, _cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        // A press during a drag restarts the selection from scratch.
        self.state = DragState::Dragging {
            start: event.position,
            current: event.position,
        };
    }

    fn on_pointer_up(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        let DragState::Dragging { start, .. } = self.state else {
            return;
        };
        self.state = DragState::Idle;
        let selected = cx.view().screen_box_to_geo(start, event.position);
        if selected.is_unset() {
            return;
        }
        tracing::debug!(region = ?selected.rect(), "zoom to selection");
        cx.request(Request::SetViewport(selected));
        cx.request(Request::Redraw { full: true });
        cx.request(Request::LaunchDefault);
    }

    fn on_pointer_move(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        if let DragState::Dragging { current, .. } = &mut self.state {
            *current = event.position;
            cx.request(Request::Redraw { full: false });
        }
    }

    fn on_wheel(&mut self, cx: &mut InteractionCx<'_, K>, event: &WheelEvent) {
        self.base.on_wheel(cx, event);
    }

    fn on_double_click(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.base.on_double_click(cx, event);
    }

    fn on_key(&mut self, cx: &mut InteractionCx<'_, K>, event: &KeyEvent) {
        if event.key == Key::Escape && self.state != DragState::Idle {
            self.cancel();
            cx.request(Request::Redraw { full: false });
        }
        self.base.on_key(cx, event);
    }

    fn paint_overlay(&self, painter: &mut dyn OverlayPainter<K>, _view: &ViewTransform) {
        if let Some(rect) = self.state.selection() {
            painter.stroke_rect(rect, StrokeStyle::DashDot);
        }
    }

    fn is_snap_enabled(&self) -> bool {
        false
    }

    fn set_snap_enabled(&mut self, enabled: bool) {
        if enabled {
            tracing::trace!("snapping stays off while selecting");
        }
    }

    fn snapped(&self) -> Option<&K> {
        None
    }

    fn cursor(&self) -> Cursor {
        Cursor::ZoomRegion
    }

    fn idle_timer(&self) -> &IdleTimer {
        self.base.idle_timer()
    }

    fn poll_idle(&mut self, now: u64) -> bool {
        self.base.poll_idle(now)
    }

    fn deactivate(&mut self) {
        self.cancel();
        self.base.deactivate();
    }

    fn reinitialize(&mut self) {
        self.cancel();
        self.base.reinitialize();
    }
}
