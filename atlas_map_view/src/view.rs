// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map view controller.

use alloc::collections::VecDeque;
use alloc::collections::vec_deque::Drain;
use alloc::string::String;
use core::mem;

use atlas_interaction::{
    AnyInteraction, BaseInteraction, Cursor, DragSelectInteraction, FeatureLookup, Interaction,
    InteractionCx, InteractionKind, KeyEvent, OverlayPainter, PointerEvent, Request, Requests,
    WheelEvent,
};
use atlas_viewport::{CoordinateError, ViewTransform, Viewport, parse_coordinate};
use kurbo::{Point, Size};

use crate::{MapViewConfig, Notification, TileEvent, TileProgress, is_viewport_shift};

/// The surface a map view paints into.
///
/// Base content comes first, then the active interaction draws its overlay
/// through the [`OverlayPainter`] half of the same surface.
pub trait RenderSurface<K>: OverlayPainter<K> {
    /// Paint map content for `view`. `full` also repaints background layers.
    fn paint_base(&mut self, view: &ViewTransform, full: bool);
}

/// Owns the active interaction and turns its requests into view changes.
///
/// There is always exactly one active interaction. Replacing it stops the
/// old interaction's idle countdown and drops it before the new one sees any
/// input. Everything the window shell may care about is queued as a
/// [`Notification`] and handed out by [`MapView::drain_notifications`].
#[derive(Clone, Debug)]
pub struct MapView<K> {
    config: MapViewConfig,
    transform: ViewTransform,
    active: AnyInteraction<K>,
    /// Viewport recorded at the last idle notification. Unset before the first one.
    previous: Viewport,
    tiles: TileProgress,
    cursor: Cursor,
    /// Pending repaint, `Some(true)` when base content is stale.
    redraw: Option<bool>,
    corner_origin: Point,
    notifications: VecDeque<Notification<K>>,
}

impl<K: Clone + PartialEq> MapView<K> {
    /// Create a view showing `viewport` on a surface of `screen` size, running
    /// the default interaction.
    pub fn new(config: MapViewConfig, viewport: Viewport, screen: Size) -> Self {
        let active: AnyInteraction<K> = BaseInteraction::new(config.interaction).into();
        let kind = active.kind();
        let mut view = Self {
            config,
            transform: ViewTransform::new(viewport, screen),
            cursor: active.cursor(),
            active,
            previous: Viewport::UNSET,
            tiles: TileProgress::default(),
            // Nothing painted yet.
            redraw: Some(true),
            corner_origin: corner_origin(screen, config.corner_widget),
            notifications: VecDeque::new(),
        };
        view.emit(Notification::InteractionChanged(kind));
        view
    }

    /// The configuration this view was built with.
    pub const fn config(&self) -> &MapViewConfig {
        &self.config
    }

    /// Current screen/geo mapping.
    pub const fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// The geographic region shown.
    pub const fn viewport(&self) -> Viewport {
        self.transform.viewport()
    }

    /// The viewport recorded at the last idle notification, if any.
    pub fn previous_viewport(&self) -> Option<Viewport> {
        (!self.previous.is_unset()).then_some(self.previous)
    }

    /// The running interaction.
    pub const fn interaction(&self) -> &AnyInteraction<K> {
        &self.active
    }

    /// Which interaction is running.
    pub fn interaction_kind(&self) -> InteractionKind {
        self.active.kind()
    }

    /// Pointer affordance currently shown.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Progress of the current tile batch.
    pub const fn tile_progress(&self) -> TileProgress {
        self.tiles
    }

    /// Pending repaint: `None` if up to date, `Some(full)` otherwise.
    pub const fn pending_redraw(&self) -> Option<bool> {
        self.redraw
    }

    /// Top-left of the corner widget in screen coordinates.
    pub const fn corner_origin(&self) -> Point {
        self.corner_origin
    }

    /// When [`MapView::tick`] next has work to do, if ever.
    pub fn next_deadline(&self) -> Option<u64> {
        self.active.idle_timer().deadline()
    }

    /// Take every notification queued so far, oldest first.
    ///
    /// The queue is unbounded (every pointer move adds an entry), so the
    /// shell should drain it after each call into the view.
    pub fn drain_notifications(&mut self) -> Drain<'_, Notification<K>> {
        self.notifications.drain(..)
    }

    /// Make `interaction` the active one.
    ///
    /// The previous interaction is deactivated (idle countdown stopped,
    /// gestures discarded) and dropped first.
    pub fn launch(&mut self, interaction: impl Into<AnyInteraction<K>>) {
        let had_snap = self.active.snapped().is_some();
        self.active.deactivate();
        let retired = mem::replace(&mut self.active, interaction.into());
        let kind = self.active.kind();
        tracing::debug!(from = ?retired.kind(), to = ?kind, "interaction launched");

        if had_snap {
            self.announce_snap(None, None);
        }
        self.emit(Notification::InteractionChanged(kind));
        self.request_redraw(false);
        self.sync_cursor();
    }

    /// Go back to default browsing.
    pub fn launch_default(&mut self) {
        self.launch(BaseInteraction::new(self.config.interaction));
    }

    /// Start a one-shot drag-to-zoom selection.
    pub fn launch_drag_select(&mut self) {
        self.launch(DragSelectInteraction::new(self.config.interaction));
    }

    /// Show `viewport`, widened or heightened to the screen's aspect ratio.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let fitted = viewport.fit_to_aspect(self.transform.screen());
        self.show(fitted);
        self.request_redraw(true);
    }

    /// Recenter on a (longitude, latitude) without changing the scale.
    pub fn center_on(&mut self, geo: Point) {
        let centered = self.viewport().centered_on(geo);
        self.show(centered);
        self.request_redraw(true);
    }

    /// Recenter on a coordinate typed as `"lon , lat"`.
    ///
    /// The view is left untouched when the text does not parse.
    pub fn center_on_text(&mut self, text: &str) -> Result<Point, CoordinateError> {
        let geo = parse_coordinate(text)?;
        self.center_on(geo);
        Ok(geo)
    }

    /// Whether the active interaction looks up features under the pointer.
    pub fn is_snap_enabled(&self) -> bool {
        self.active.is_snap_enabled()
    }

    /// Turn feature lookup on or off for the active interaction.
    pub fn set_snap_enabled(&mut self, enabled: bool) {
        let had_snap = self.active.snapped().is_some();
        self.active.set_snap_enabled(enabled);
        self.after_reset(had_snap);
    }

    /// Forget hover and gesture state without replacing the interaction.
    pub fn reinitialize(&mut self) {
        let had_snap = self.active.snapped().is_some();
        self.active.reinitialize();
        self.after_reset(had_snap);
    }

    fn after_reset(&mut self, had_snap: bool) {
        if had_snap && self.active.snapped().is_none() {
            self.announce_snap(None, None);
            self.request_redraw(false);
        }
        self.sync_cursor();
    }

    /// A pointer button was pressed.
    pub fn on_pointer_down(&mut self, features: &dyn FeatureLookup<K>, event: &PointerEvent) {
        tracing::trace!(position = ?event.position, time = event.time, "pointer down");
        self.dispatch(features, |i, cx| i.on_pointer_down(cx, event));
    }

    /// A pointer button was released.
    pub fn on_pointer_up(&mut self, features: &dyn FeatureLookup<K>, event: &PointerEvent) {
        tracing::trace!(position = ?event.position, time = event.time, "pointer up");
        self.dispatch(features, |i, cx| i.on_pointer_up(cx, event));
    }

    /// The pointer moved.
    pub fn on_pointer_move(&mut self, features: &dyn FeatureLookup<K>, event: &PointerEvent) {
        tracing::trace!(position = ?event.position, time = event.time, "pointer move");
        let geo = self.transform.to_geo(event.position);
        self.emit(Notification::PointerMoved { geo });
        self.dispatch(features, |i, cx| i.on_pointer_move(cx, event));
    }

    /// The wheel turned.
    pub fn on_wheel(&mut self, features: &dyn FeatureLookup<K>, event: &WheelEvent) {
        tracing::trace!(steps = event.steps, time = event.time, "wheel");
        self.dispatch(features, |i, cx| i.on_wheel(cx, event));
    }

    /// A double click was recognized.
    pub fn on_double_click(&mut self, features: &dyn FeatureLookup<K>, event: &PointerEvent) {
        tracing::trace!(position = ?event.position, time = event.time, "double click");
        self.dispatch(features, |i, cx| i.on_double_click(cx, event));
    }

    /// A key was pressed.
    pub fn on_key(&mut self, features: &dyn FeatureLookup<K>, event: &KeyEvent) {
        tracing::trace!(key = ?event.key, time = event.time, "key");
        self.dispatch(features, |i, cx| i.on_key(cx, event));
    }

    /// Advance time. Fires the idle notification if its deadline has passed.
    pub fn tick(&mut self, now: u64) {
        tracing::trace!(now, "tick");
        if self.active.poll_idle(now) {
            self.on_idle();
        }
    }

    /// The user went idle: report it and check for a viewport shift.
    ///
    /// The current viewport is recorded for the next comparison either way.
    pub fn on_idle(&mut self) {
        self.emit(Notification::Idle);
        let current = self.viewport();
        if is_viewport_shift(&self.previous, &current, self.config.shift_threshold) {
            tracing::debug!(
                previous = ?self.previous.rect(),
                current = ?current.rect(),
                "viewport shift"
            );
            self.emit(Notification::ViewportShift);
        }
        self.previous = current;
    }

    /// A tile was requested.
    pub fn on_tile_requested(&mut self) {
        let total = self.tiles.request();
        self.emit(Notification::ImageRequested { total });
    }

    /// A tile arrived.
    ///
    /// Arrivals with nothing outstanding (for example after the batch
    /// finished) are reported with unchanged counts.
    pub fn on_tile_received(&mut self) {
        if self.tiles.receive() {
            self.request_redraw(true);
        } else {
            tracing::debug!(
                requested = self.tiles.requested(),
                "tile arrived with nothing outstanding"
            );
        }
        self.emit(Notification::ImageReceived {
            received: self.tiles.received(),
            total: self.tiles.requested(),
        });
    }

    /// The tile source has nothing left in flight.
    pub fn on_tile_finished(&mut self) {
        self.emit(Notification::ImageFinished);
        self.tiles.finish();
    }

    /// Apply a tile source report.
    pub fn on_tile_event(&mut self, event: TileEvent) {
        match event {
            TileEvent::Requested => self.on_tile_requested(),
            TileEvent::Received => self.on_tile_received(),
            TileEvent::Finished => self.on_tile_finished(),
        }
    }

    /// The surface was resized.
    pub fn on_resize(&mut self, screen: Size) {
        self.transform.set_screen(screen);
        self.corner_origin = corner_origin(screen, self.config.corner_widget);
        self.emit(Notification::LayoutChanged {
            corner_origin: self.corner_origin,
        });
        self.request_redraw(true);
    }

    /// Ask for a repaint. Pending requests are merged; `full` wins.
    pub fn request_redraw(&mut self, full: bool) {
        let merged = self.redraw.map_or(full, |pending| pending || full);
        if self.redraw != Some(merged) {
            self.redraw = Some(merged);
            self.emit(Notification::RedrawRequested { full: merged });
        }
    }

    /// Paint base content, then the interaction overlay.
    ///
    /// `clock` returns milliseconds and is read before and after painting.
    pub fn paint<S: RenderSurface<K>>(&mut self, surface: &mut S, mut clock: impl FnMut() -> u64) {
        let start = clock();
        let full = self.redraw.take().unwrap_or(false);
        surface.paint_base(&self.transform, full);
        self.active.paint_overlay(surface, &self.transform);
        let duration_ms = clock().saturating_sub(start);
        self.emit(Notification::Painted { duration_ms });
        self.sync_cursor();
    }

    fn dispatch(
        &mut self,
        features: &dyn FeatureLookup<K>,
        handle: impl FnOnce(&mut AnyInteraction<K>, &mut InteractionCx<'_, K>),
    ) {
        let mut requests = Requests::new();
        let mut cx = InteractionCx::new(&self.transform, features, &mut requests);
        handle(&mut self.active, &mut cx);
        for request in requests {
            self.apply(request, features);
        }
        self.sync_cursor();
    }

    fn apply(&mut self, request: Request<K>, features: &dyn FeatureLookup<K>) {
        match request {
            Request::FeatureSnap(feature) => self.on_feature_snapped(feature, features),
            Request::PanBy(delta) => {
                let moved = self.viewport().translated(delta);
                self.show(moved);
                self.request_redraw(true);
            }
            Request::ZoomAbout { anchor, factor } => {
                let zoomed = self.viewport().scaled_about(anchor, factor);
                self.show(zoomed);
                self.request_redraw(true);
            }
            Request::SetViewport(viewport) => self.set_viewport(viewport),
            Request::Redraw { full } => self.request_redraw(full),
            Request::LaunchDefault => self.launch_default(),
        }
    }

    fn on_feature_snapped(&mut self, feature: Option<K>, features: &dyn FeatureLookup<K>) {
        let description = feature.as_ref().and_then(|f| features.describe(f));
        self.announce_snap(feature, description);
        self.request_redraw(false);
    }

    fn announce_snap(&mut self, feature: Option<K>, description: Option<String>) {
        self.emit(Notification::FeatureSnap {
            feature,
            description,
        });
    }

    fn show(&mut self, viewport: Viewport) {
        if viewport == self.transform.viewport() {
            return;
        }
        tracing::debug!(rect = ?viewport.rect(), "viewport changed");
        self.transform.set_viewport(viewport);
        self.emit(Notification::ViewportChanged(viewport));
    }

    fn sync_cursor(&mut self) {
        let cursor = self.active.cursor();
        if cursor != self.cursor {
            self.cursor = cursor;
            self.emit(Notification::CursorChanged(cursor));
        }
    }

    fn emit(&mut self, notification: Notification<K>) {
        self.notifications.push_back(notification);
    }
}

fn corner_origin(screen: Size, corner: Size) -> Point {
    Point::new(screen.width - corner.width, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use atlas_interaction::{DragState, Key, NoFeatures, PointerButtons, StrokeStyle};
    use kurbo::Rect;

    /// One feature in the top-left corner of the screen.
    struct Pin;

    impl FeatureLookup<u32> for Pin {
        fn hit_test(&self, screen: Point, _view: &ViewTransform) -> Option<u32> {
            (screen.x < 20.0 && screen.y < 20.0).then_some(7)
        }

        fn describe(&self, feature: &u32) -> Option<String> {
            (*feature == 7).then(|| String::from("pin"))
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Base { full: bool },
        Hover(u32),
        Rect(Rect, StrokeStyle),
    }

    #[derive(Default)]
    struct Surface {
        ops: Vec<Op>,
    }

    impl OverlayPainter<u32> for Surface {
        fn draw_hover(&mut self, feature: &u32, _view: &ViewTransform) {
            self.ops.push(Op::Hover(*feature));
        }

        fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
            self.ops.push(Op::Rect(rect, style));
        }
    }

    impl RenderSurface<u32> for Surface {
        fn paint_base(&mut self, _view: &ViewTransform, full: bool) {
            self.ops.push(Op::Base { full });
        }
    }

    fn vp(x0: f64, y0: f64, x1: f64, y1: f64) -> Viewport {
        Viewport::new(Rect::new(x0, y0, x1, y1))
    }

    /// 10x10 degrees on a 100x100 surface.
    fn map() -> MapView<u32> {
        let mut view = MapView::new(
            MapViewConfig::default(),
            vp(0.0, 0.0, 10.0, 10.0),
            Size::new(100.0, 100.0),
        );
        view.drain_notifications();
        view
    }

    fn notes(view: &mut MapView<u32>) -> Vec<Notification<u32>> {
        view.drain_notifications().collect()
    }

    fn at(x: f64, y: f64, time: u64) -> PointerEvent {
        PointerEvent::new(Point::new(x, y), time)
    }

    fn count(notes: &[Notification<u32>], wanted: &Notification<u32>) -> usize {
        notes.iter().filter(|n| *n == wanted).count()
    }

    #[test]
    fn starts_with_default_interaction() {
        let mut view = MapView::<u32>::new(
            MapViewConfig::default(),
            vp(0.0, 0.0, 10.0, 10.0),
            Size::new(100.0, 100.0),
        );
        assert_eq!(view.interaction_kind(), InteractionKind::Browse);
        assert_eq!(view.cursor(), Cursor::Grab);
        assert_eq!(view.next_deadline(), None);
        assert_eq!(view.previous_viewport(), None);
        assert_eq!(
            notes(&mut view),
            [Notification::InteractionChanged(InteractionKind::Browse)]
        );
    }

    #[test]
    fn idle_fires_once_after_threshold() {
        let mut view = map();
        view.on_pointer_move(&NoFeatures, &at(80.0, 80.0, 0));
        assert_eq!(view.next_deadline(), Some(750));
        view.tick(749);
        assert_eq!(count(&notes(&mut view), &Notification::Idle), 0);

        view.tick(750);
        view.tick(751);
        view.tick(5_000);
        let n = notes(&mut view);
        assert_eq!(count(&n, &Notification::Idle), 1);
        // First idle only records the viewport.
        assert_eq!(count(&n, &Notification::ViewportShift), 0);
        assert_eq!(view.previous_viewport(), Some(vp(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(view.next_deadline(), None);
    }

    #[test]
    fn input_before_deadline_restarts_countdown() {
        let mut view = map();
        view.on_pointer_move(&NoFeatures, &at(80.0, 80.0, 0));
        view.on_wheel(&NoFeatures, &WheelEvent::new(Point::new(50.0, 50.0), 0, 600));
        view.tick(750);
        assert_eq!(count(&notes(&mut view), &Notification::Idle), 0);
        view.tick(1_350);
        assert_eq!(count(&notes(&mut view), &Notification::Idle), 1);
    }

    #[test]
    fn large_move_between_idles_is_a_shift() {
        let mut view = map();
        view.on_pointer_move(&NoFeatures, &at(80.0, 80.0, 0));
        view.tick(750);

        view.set_viewport(vp(8.0, 0.0, 18.0, 10.0));
        view.on_pointer_move(&NoFeatures, &at(80.0, 80.0, 1_000));
        view.tick(1_750);
        let n = notes(&mut view);
        assert_eq!(count(&n, &Notification::ViewportShift), 1);
        let idle = n.iter().position(|x| *x == Notification::Idle);
        let shift = n.iter().position(|x| *x == Notification::ViewportShift);
        assert!(idle < shift);
        assert_eq!(view.previous_viewport(), Some(vp(8.0, 0.0, 18.0, 10.0)));
    }

    #[test]
    fn unchanged_viewport_is_not_a_shift() {
        let mut view = map();
        view.on_idle();
        view.on_idle();
        assert_eq!(count(&notes(&mut view), &Notification::ViewportShift), 0);
    }

    #[test]
    fn zero_area_viewport_never_shifts() {
        let mut view = map();
        view.on_idle();
        view.set_viewport(Viewport::at(Point::new(50.0, 50.0)));
        view.on_idle();
        assert_eq!(count(&notes(&mut view), &Notification::ViewportShift), 0);
        // The unset viewport is recorded, so the next comparison is skipped too.
        assert_eq!(view.previous_viewport(), None);
    }

    #[test]
    fn panning_moves_viewport_and_holds_idle() {
        let mut view = map();
        view.on_pointer_down(&NoFeatures, &at(50.0, 50.0, 0));
        assert_eq!(view.cursor(), Cursor::Grabbing);
        view.on_pointer_move(&NoFeatures, &at(60.0, 50.0, 10));
        assert_eq!(view.viewport(), vp(-1.0, 0.0, 9.0, 10.0));
        assert_eq!(view.next_deadline(), None);
        view.tick(10_000);

        view.on_pointer_up(&NoFeatures, &at(60.0, 50.0, 20));
        assert_eq!(view.cursor(), Cursor::Grab);
        assert_eq!(view.next_deadline(), Some(770));

        let n = notes(&mut view);
        assert_eq!(count(&n, &Notification::Idle), 0);
        assert!(n.contains(&Notification::ViewportChanged(vp(-1.0, 0.0, 9.0, 10.0))));
        assert!(n.contains(&Notification::CursorChanged(Cursor::Grabbing)));
        assert!(n.contains(&Notification::CursorChanged(Cursor::Grab)));
    }

    #[test]
    fn wheel_and_keys_during_pan_do_not_go_idle() {
        let mut view = map();
        view.on_pointer_down(&NoFeatures, &at(50.0, 50.0, 0));
        view.on_wheel(&NoFeatures, &WheelEvent::new(Point::new(50.0, 50.0), 1, 10));
        view.on_key(&NoFeatures, &KeyEvent::new(Key::Other, 20));
        assert_eq!(view.next_deadline(), None);
        view.tick(10_000);
        assert_eq!(count(&notes(&mut view), &Notification::Idle), 0);

        view.on_pointer_up(&NoFeatures, &at(50.0, 50.0, 30));
        assert_eq!(view.next_deadline(), Some(780));
    }

    #[test]
    fn secondary_button_does_not_pan() {
        let mut view = map();
        view.on_pointer_down(
            &NoFeatures,
            &at(50.0, 50.0, 0).with_buttons(PointerButtons::SECONDARY),
        );
        view.on_pointer_move(&NoFeatures, &at(60.0, 50.0, 10));
        assert_eq!(view.viewport(), vp(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn wheel_and_keys_change_viewport() {
        let mut view = map();
        view.on_wheel(&NoFeatures, &WheelEvent::new(Point::new(50.0, 50.0), 1, 0));
        assert_eq!(view.viewport(), vp(2.5, 2.5, 7.5, 7.5));

        view.on_key(&NoFeatures, &KeyEvent::new(Key::Minus, 10));
        assert_eq!(view.viewport(), vp(0.0, 0.0, 10.0, 10.0));

        view.on_key(&NoFeatures, &KeyEvent::new(Key::ArrowRight, 20));
        assert_eq!(view.viewport(), vp(2.5, 0.0, 12.5, 10.0));
        assert_eq!(view.next_deadline(), Some(770));
    }

    #[test]
    fn double_click_zooms_about_pointer() {
        let mut view = map();
        view.on_double_click(&NoFeatures, &at(0.0, 100.0, 0));
        assert_eq!(view.viewport(), vp(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn pointer_position_is_reported_in_geo() {
        let mut view = map();
        view.on_pointer_move(&NoFeatures, &at(25.0, 50.0, 0));
        assert_eq!(
            notes(&mut view).first(),
            Some(&Notification::PointerMoved {
                geo: Point::new(2.5, 5.0)
            })
        );
    }

    #[test]
    fn hovering_a_feature_reports_it_and_shows_hover_cursor() {
        let mut view = map();
        view.on_pointer_move(&Pin, &at(10.0, 10.0, 0));
        let n = notes(&mut view);
        assert!(n.contains(&Notification::FeatureSnap {
            feature: Some(7),
            description: Some(String::from("pin")),
        }));
        assert!(n.contains(&Notification::CursorChanged(Cursor::Hover)));
        assert_eq!(view.cursor(), Cursor::Hover);

        view.on_pointer_move(&Pin, &at(15.0, 10.0, 5));
        let n = notes(&mut view);
        assert!(!n.iter().any(|x| matches!(x, Notification::FeatureSnap { .. })));

        view.on_pointer_move(&Pin, &at(60.0, 60.0, 10));
        let n = notes(&mut view);
        assert!(n.contains(&Notification::FeatureSnap {
            feature: None,
            description: None,
        }));
        assert_eq!(view.cursor(), Cursor::Grab);
    }

    #[test]
    fn disabling_snap_clears_hover() {
        let mut view = map();
        assert!(view.is_snap_enabled());
        view.on_pointer_move(&Pin, &at(10.0, 10.0, 0));
        notes(&mut view);

        view.set_snap_enabled(false);
        assert!(!view.is_snap_enabled());
        assert_eq!(view.cursor(), Cursor::Grab);
        assert!(notes(&mut view).contains(&Notification::FeatureSnap {
            feature: None,
            description: None,
        }));

        view.on_pointer_move(&Pin, &at(10.0, 10.0, 10));
        assert!(
            !notes(&mut view)
                .iter()
                .any(|x| matches!(x, Notification::FeatureSnap { .. }))
        );
    }

    #[test]
    fn drag_select_zooms_and_reverts() {
        let mut view = map();
        view.launch_drag_select();
        assert_eq!(view.interaction_kind(), InteractionKind::DragSelect);
        assert_eq!(view.cursor(), Cursor::ZoomRegion);
        assert!(!view.is_snap_enabled());

        view.on_pointer_down(&Pin, &at(10.0, 10.0, 0));
        view.on_pointer_move(&Pin, &at(50.0, 40.0, 10));
        view.on_pointer_up(&Pin, &at(50.0, 40.0, 20));

        // (1, 6)-(5, 9) grown to the square screen.
        assert_eq!(view.viewport(), vp(1.0, 5.5, 5.0, 9.5));
        assert_eq!(view.interaction_kind(), InteractionKind::Browse);
        assert_eq!(view.cursor(), Cursor::Grab);
        assert_eq!(view.pending_redraw(), Some(true));

        let n = notes(&mut view);
        let changed = n
            .iter()
            .position(|x| matches!(x, Notification::ViewportChanged(_)));
        let reverted = n
            .iter()
            .position(|x| *x == Notification::InteractionChanged(InteractionKind::Browse));
        assert!(changed.is_some() && changed < reverted);
        assert!(!n.iter().any(|x| matches!(x, Notification::FeatureSnap { .. })));
    }

    #[test]
    fn degenerate_drag_select_changes_nothing() {
        let mut view = map();
        view.launch_drag_select();
        view.on_pointer_down(&NoFeatures, &at(10.0, 10.0, 0));
        view.on_pointer_move(&NoFeatures, &at(10.0, 10.0, 10));
        view.on_pointer_up(&NoFeatures, &at(10.0, 10.0, 20));
        assert_eq!(view.viewport(), vp(0.0, 0.0, 10.0, 10.0));
        assert_eq!(view.interaction_kind(), InteractionKind::DragSelect);
        assert!(
            !notes(&mut view)
                .iter()
                .any(|x| matches!(x, Notification::ViewportChanged(_)))
        );
    }

    #[test]
    fn replacing_interaction_drops_pending_idle() {
        let mut view = map();
        view.on_pointer_move(&NoFeatures, &at(80.0, 80.0, 0));
        assert_eq!(view.next_deadline(), Some(750));

        view.launch_drag_select();
        assert_eq!(view.next_deadline(), None);
        view.tick(750);
        view.tick(100_000);
        assert_eq!(count(&notes(&mut view), &Notification::Idle), 0);
    }

    #[test]
    fn replacing_mid_selection_discards_it() {
        let mut view = map();
        view.launch_drag_select();
        view.on_pointer_down(&NoFeatures, &at(10.0, 10.0, 0));
        view.on_pointer_move(&NoFeatures, &at(50.0, 40.0, 10));
        view.launch_default();
        view.on_pointer_up(&NoFeatures, &at(50.0, 40.0, 20));
        assert_eq!(view.viewport(), vp(0.0, 0.0, 10.0, 10.0));
        assert_eq!(view.interaction_kind(), InteractionKind::Browse);
    }

    #[test]
    fn exactly_one_interaction_after_rapid_launches() {
        let mut view = map();
        for round in 0..20_u64 {
            view.on_pointer_move(&NoFeatures, &at(80.0, 80.0, round));
            if round % 2 == 0 {
                view.launch_drag_select();
                assert_eq!(view.interaction_kind(), InteractionKind::DragSelect);
            } else {
                view.launch_default();
                assert_eq!(view.interaction_kind(), InteractionKind::Browse);
            }
            assert_eq!(view.next_deadline(), None);
            let n = notes(&mut view);
            let launched = n
                .iter()
                .filter(|x| matches!(x, Notification::InteractionChanged(_)))
                .count();
            assert_eq!(launched, 1);
        }
        view.tick(u64::MAX);
        assert_eq!(count(&notes(&mut view), &Notification::Idle), 0);
    }

    #[test]
    fn launching_while_hovering_clears_feature_info() {
        let mut view = map();
        view.on_pointer_move(&Pin, &at(10.0, 10.0, 0));
        notes(&mut view);
        view.launch_default();
        assert!(notes(&mut view).contains(&Notification::FeatureSnap {
            feature: None,
            description: None,
        }));
        assert_eq!(view.interaction().snapped(), None);
    }

    #[test]
    fn reinitialize_keeps_interaction() {
        let mut view = map();
        view.launch_drag_select();
        view.on_pointer_down(&NoFeatures, &at(10.0, 10.0, 0));
        view.reinitialize();
        assert_eq!(view.interaction_kind(), InteractionKind::DragSelect);
        let AnyInteraction::DragSelect(select) = view.interaction() else {
            panic!("drag-select should still be active");
        };
        assert_eq!(select.state(), DragState::Idle);
    }

    #[test]
    fn tile_progress_is_clamped() {
        let mut view = map();
        view.on_tile_received();
        assert_eq!(view.tile_progress(), TileProgress::default());

        view.on_tile_requested();
        view.on_tile_requested();
        view.on_tile_received();
        view.on_tile_received();
        view.on_tile_received();
        assert_eq!(view.tile_progress().requested(), 2);
        assert_eq!(view.tile_progress().received(), 2);

        view.on_tile_finished();
        assert_eq!(view.tile_progress(), TileProgress::default());

        let n = notes(&mut view);
        let tiles: Vec<_> = n
            .into_iter()
            .filter(|x| {
                matches!(
                    x,
                    Notification::ImageRequested { .. }
                        | Notification::ImageReceived { .. }
                        | Notification::ImageFinished
                )
            })
            .collect();
        assert_eq!(
            tiles,
            [
                Notification::ImageReceived {
                    received: 0,
                    total: 0
                },
                Notification::ImageRequested { total: 1 },
                Notification::ImageRequested { total: 2 },
                Notification::ImageReceived {
                    received: 1,
                    total: 2
                },
                Notification::ImageReceived {
                    received: 2,
                    total: 2
                },
                Notification::ImageReceived {
                    received: 2,
                    total: 2
                },
                Notification::ImageFinished,
            ]
        );
    }

    #[test]
    fn tile_events_drive_counter() {
        let mut view = map();
        for event in [
            TileEvent::Requested,
            TileEvent::Requested,
            TileEvent::Received,
            TileEvent::Finished,
            TileEvent::Received,
        ] {
            view.on_tile_event(event);
            let p = view.tile_progress();
            assert!(p.received() <= p.requested());
        }
        assert_eq!(view.tile_progress(), TileProgress::default());
    }

    #[test]
    fn center_on_text_recenters() {
        let mut view = map();
        assert_eq!(view.center_on_text("20 , 40"), Ok(Point::new(20.0, 40.0)));
        assert_eq!(view.viewport(), vp(15.0, 35.0, 25.0, 45.0));

        assert!(view.center_on_text("somewhere").is_err());
        assert!(view.center_on_text("200, 0").is_err());
        assert_eq!(view.viewport(), vp(15.0, 35.0, 25.0, 45.0));
    }

    #[test]
    fn set_viewport_fits_screen_aspect() {
        let mut view = map();
        view.on_resize(Size::new(200.0, 100.0));
        view.set_viewport(vp(0.0, 0.0, 10.0, 10.0));
        assert_eq!(view.viewport(), vp(-5.0, 0.0, 15.0, 10.0));
    }

    #[test]
    fn resize_moves_corner_widget() {
        let mut view = map();
        view.on_resize(Size::new(800.0, 600.0));
        assert_eq!(view.corner_origin(), Point::new(640.0, 0.0));
        assert_eq!(view.transform().screen(), Size::new(800.0, 600.0));
        assert!(notes(&mut view).contains(&Notification::LayoutChanged {
            corner_origin: Point::new(640.0, 0.0)
        }));
    }

    #[test]
    fn redraw_requests_are_merged() {
        let mut view = map();
        let mut surface = Surface::default();
        view.paint(&mut surface, || 0);
        notes(&mut view);

        view.request_redraw(false);
        view.request_redraw(false);
        view.request_redraw(true);
        view.request_redraw(false);
        assert_eq!(
            notes(&mut view),
            [
                Notification::RedrawRequested { full: false },
                Notification::RedrawRequested { full: true },
            ]
        );
        assert_eq!(view.pending_redraw(), Some(true));
    }

    #[test]
    fn paint_draws_base_then_overlay() {
        let mut view = map();
        view.on_pointer_move(&Pin, &at(10.0, 10.0, 0));
        notes(&mut view);

        let mut surface = Surface::default();
        let mut now = 100;
        view.paint(&mut surface, || {
            now += 4;
            now
        });
        assert_eq!(surface.ops, [Op::Base { full: true }, Op::Hover(7)]);
        assert_eq!(view.pending_redraw(), None);
        assert_eq!(notes(&mut view), [Notification::Painted { duration_ms: 4 }]);

        surface.ops.clear();
        view.paint(&mut surface, || 0);
        assert_eq!(surface.ops, [Op::Base { full: false }, Op::Hover(7)]);
    }

    #[test]
    fn paint_outlines_selection() {
        let mut view = map();
        view.launch_drag_select();
        view.on_pointer_down(&NoFeatures, &at(10.0, 10.0, 0));
        view.on_pointer_move(&NoFeatures, &at(50.0, 40.0, 10));
        let mut surface = Surface::default();
        view.paint(&mut surface, || 0);
        assert_eq!(
            surface.ops,
            [
                Op::Base { full: true },
                Op::Rect(Rect::new(10.0, 10.0, 50.0, 40.0), StrokeStyle::DashDot),
            ]
        );
    }
}
