// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default browsing interaction: pan, zoom, hover, idle detection.
//!
//! ## Idle rules
//!
//! The interaction owns one [`IdleTimer`]. Qualifying input restarts it:
//!
//! - press (unless it starts a pan, which stops the timer instead),
//! - move while not panning,
//! - release (only if no countdown is already pending),
//! - wheel, double click, key, unless a pan is in progress.
//!
//! No countdown is ever pending while a pan is in progress.
//!
//! Once the countdown elapses, [`Interaction::poll_idle`] returns `true` once
//! and the timer stays stopped until the next qualifying input.
//!
//! ## Snapping
//!
//! While snap is enabled and no pan is in progress, every move hit-tests the
//! document. A change of hovered feature is reported with
//! [`Request::FeatureSnap`]. Moves over a hovered feature are not forwarded
//! to panning.

use atlas_viewport::ViewTransform;
use kurbo::{Point, Vec2};

use crate::{
    Cursor, IdleTimer, Interaction, InteractionCx, InteractionKind, Key, KeyEvent,
    OverlayPainter, PointerButtons, PointerEvent, Request, WheelEvent,
};

/// Wheel steps applied from a single event; larger rotations are clamped.
const MAX_WHEEL_STEPS: i32 = 16;

/// Tunables shared by all interactions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Inactivity threshold before an idle notification, in milliseconds.
    pub idle_timeout: u64,
    /// Scale applied per wheel step forward, per double click, and per `+`.
    pub zoom_in_factor: f64,
    /// Scale applied per wheel step backward and per `-`.
    pub zoom_out_factor: f64,
    /// Fraction of the visible span moved per arrow key.
    pub key_pan_fraction: f64,
    /// Buttons that start a pan when pressed away from any feature.
    pub pan_buttons: PointerButtons,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: IdleTimer::DEFAULT_TIMEOUT,
            zoom_in_factor: 2.0,
            zoom_out_factor: 0.5,
            key_pan_fraction: 0.25,
            pan_buttons: PointerButtons::PRIMARY | PointerButtons::MIDDLE,
        }
    }
}

/// The interaction every map view falls back to.
#[derive(Clone, Debug)]
pub struct BaseInteraction<K> {
    config: InteractionConfig,
    snap_enabled: bool,
    snapped: Option<K>,
    /// Last pointer position of the pan in progress.
    pan_from: Option<Point>,
    idle: IdleTimer,
}

impl<K: Clone + PartialEq> BaseInteraction<K> {
    /// Create a browsing interaction with snapping enabled and no pending countdown.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            snap_enabled: true,
            snapped: None,
            pan_from: None,
            idle: IdleTimer::new(config.idle_timeout),
        }
    }

    /// The configuration this interaction was built with.
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Whether a pan gesture is in progress.
    pub const fn is_panning(&self) -> bool {
        self.pan_from.is_some()
    }

    /// Restart the idle countdown at `now`.
    pub fn reset_idle_timer(&mut self, now: u64) {
        self.idle.start(now);
    }

    /// Hit-test under `position` and report a change of hovered feature.
    ///
    /// With snapping disabled the hovered feature is cleared.
    pub fn update_snap(&mut self, cx: &mut InteractionCx<'_, K>, position: Point) {
        let hit = if self.snap_enabled {
            cx.hit_test(position)
        } else {
            None
        };
        if hit != self.snapped {
            self.snapped.clone_from(&hit);
            cx.request(Request::FeatureSnap(hit));
        }
    }

    /// Zoom about a screen position by `factor`.
    pub fn zoom_at(&self, cx: &mut InteractionCx<'_, K>, position: Point, factor: f64) {
        let anchor = cx.view().to_geo(position);
        cx.request(Request::ZoomAbout { anchor, factor });
    }

    /// Restart the countdown unless a pan holds it off.
    fn touch_idle(&mut self, now: u64) {
        if !self.is_panning() {
            self.idle.start(now);
        }
    }

    fn wheel_factor(&self, steps: i32) -> f64 {
        let steps = steps.clamp(-MAX_WHEEL_STEPS, MAX_WHEEL_STEPS);
        let base = if steps > 0 {
            self.config.zoom_in_factor
        } else {
            self.config.zoom_out_factor
        };
        (0..steps.unsigned_abs()).fold(1.0, |acc, _| acc * base)
    }

    fn pan_move(&mut self, cx: &mut InteractionCx<'_, K>, position: Point) {
        let Some(from) = self.pan_from else {
            return;
        };
        let delta = position - from;
        if delta != Vec2::ZERO {
            // Content follows the pointer, so the viewport moves the other way.
            let geo = cx.view().delta_to_geo(delta);
            cx.request(Request::PanBy(-geo));
        }
        self.pan_from = Some(position);
    }
}

impl<K: Clone + PartialEq> Interaction<K> for BaseInteraction<K> {
    fn kind(&self) -> InteractionKind {
        InteractionKind::Browse
    }

    fn on_pointer_down(&mut self, _cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        // A new press always ends whatever gesture was left over.
        self.pan_from = None;
        if self.snapped.is_none() && event.buttons.intersects(self.config.pan_buttons) {
            self.pan_from = Some(event.position);
        }
        if self.is_panning() {
            self.idle.stop();
        } else {
            self.idle.start(event.time);
        }
    }

    fn on_pointer_up(&mut self, _cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.pan_from = None;
        if !self.idle.is_pending() {
            self.idle.start(event.time);
        }
    }

    fn on_pointer_move(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        if !self.is_panning() {
            self.update_snap(cx, event.position);
        }
        if self.snapped.is_none() {
            self.pan_move(cx, event.position);
        }
        self.touch_idle(event.time);
    }

    fn on_wheel(&mut self, cx: &mut InteractionCx<'_, K>, event: &WheelEvent) {
        if event.steps != 0 {
            self.zoom_at(cx, event.position, self.wheel_factor(event.steps));
        }
        self.touch_idle(event.time);
    }

    fn on_double_click(&mut self, cx: &mut InteractionCx<'_, K>, event: &PointerEvent) {
        self.zoom_at(cx, event.position, self.config.zoom_in_factor);
        self.touch_idle(event.time);
    }

    fn on_key(&mut self, cx: &mut InteractionCx<'_, K>, event: &KeyEvent) {
        let viewport = cx.view().viewport();
        let dx = viewport.lon_span() * self.config.key_pan_fraction;
        let dy = viewport.lat_span() * self.config.key_pan_fraction;
        match event.key {
            Key::ArrowLeft => cx.request(Request::PanBy(Vec2::new(-dx, 0.0))),
            Key::ArrowRight => cx.request(Request::PanBy(Vec2::new(dx, 0.0))),
            Key::ArrowUp => cx.request(Request::PanBy(Vec2::new(0.0, dy))),
            Key::ArrowDown => cx.request(Request::PanBy(Vec2::new(0.0, -dy))),
            Key::Plus => cx.request(Request::ZoomAbout {
                anchor: viewport.center(),
                factor: self.config.zoom_in_factor,
            }),
            Key::Minus => cx.request(Request::ZoomAbout {
                anchor: viewport.center(),
                factor: self.config.zoom_out_factor,
            }),
            Key::Escape => self.pan_from = None,
            Key::Other => {}
        }
        self.touch_idle(event.time);
    }

    fn paint_overlay(&self, painter: &mut dyn OverlayPainter<K>, view: &ViewTransform) {
        if let Some(feature) = &self.snapped {
            painter.draw_hover(feature, view);
        }
    }

    fn is_snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
        if !enabled {
            self.snapped = None;
        }
    }

    fn snapped(&self) -> Option<&K> {
        self.snapped.as_ref()
    }

    fn cursor(&self) -> Cursor {
        if self.is_panning() {
            Cursor::Grabbing
        } else if self.snapped.is_some() {
            Cursor::Hover
        } else {
            Cursor::Grab
        }
    }

    fn idle_timer(&self) -> &IdleTimer {
        &self.idle
    }

    fn poll_idle(&mut self, now: u64) -> bool {
        let fired = self.idle.poll(now);
        if fired {
            tracing::debug!(now, "user idle");
        }
        fired
    }

    fn deactivate(&mut self) {
        if self.idle.stop() {
            tracing::debug!("pending idle countdown canceled");
        }
        self.pan_from = None;
        self.snapped = None;
    }

    fn reinitialize(&mut self) {
        self.pan_from = None;
        self.snapped = None;
    }
}
