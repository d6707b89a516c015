// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted map session: hover, pan, drag-to-zoom, coordinate entry.
//!
//! This example shows how to drive a `MapView` from a host loop:
//! - input events go to the view together with a `FeatureLookup`,
//! - the loop sleeps until the next idle deadline and calls `tick`,
//! - a tile-fetch thread reports progress over a channel and the loop
//!   applies it, so tile bookkeeping never leaves the loop's thread,
//! - queued notifications are drained and logged after every step.
//!
//! Run:
//! - `cargo run -p atlas_demos --example map_session`
//! - `RUST_LOG=trace cargo run -p atlas_demos --example map_session` for per-event logs

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use atlas_interaction::{
    FeatureLookup, Key, KeyEvent, OverlayPainter, PointerEvent, StrokeStyle, WheelEvent,
};
use atlas_map_view::{MapView, MapViewConfig, Notification, RenderSurface, TileEvent};
use atlas_viewport::{ViewTransform, Viewport, format_coordinate};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;

/// Pick radius around a place marker, in pixels.
const PICK_RADIUS: f64 = 6.0;

#[derive(Clone, Debug)]
struct Place {
    name: &'static str,
    geo: Point,
}

/// A toy document: named points keyed by id.
#[derive(Debug, Default)]
struct FeatureStore {
    places: HashMap<u32, Place>,
}

impl FeatureStore {
    fn sample() -> Self {
        let mut places = HashMap::new();
        places.insert(
            1,
            Place {
                name: "Capitole",
                geo: Point::new(1.4442, 43.6047),
            },
        );
        places.insert(
            2,
            Place {
                name: "Blagnac",
                geo: Point::new(1.3638, 43.6293),
            },
        );
        places.insert(
            3,
            Place {
                name: "Montaudran",
                geo: Point::new(1.4843, 43.5746),
            },
        );
        Self { places }
    }
}

impl FeatureLookup<u32> for FeatureStore {
    fn hit_test(&self, screen: Point, view: &ViewTransform) -> Option<u32> {
        self.places
            .iter()
            .map(|(id, place)| (*id, (view.to_screen(place.geo) - screen).hypot2()))
            .filter(|(_, d2)| *d2 <= PICK_RADIUS * PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn describe(&self, feature: &u32) -> Option<String> {
        self.places
            .get(feature)
            .map(|p| format!("{} ({})", p.name, format_coordinate(p.geo)))
    }
}

/// Logs paint calls instead of drawing.
#[derive(Debug, Default)]
struct LogSurface {
    frames: u32,
}

impl OverlayPainter<u32> for LogSurface {
    fn draw_hover(&mut self, feature: &u32, _view: &ViewTransform) {
        tracing::info!(feature, "  overlay: hover highlight");
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
        tracing::info!(?rect, ?style, "  overlay: selection outline");
    }
}

impl RenderSurface<u32> for LogSurface {
    fn paint_base(&mut self, view: &ViewTransform, full: bool) {
        self.frames += 1;
        tracing::info!(
            frame = self.frames,
            full,
            viewport = ?view.viewport().rect(),
            "paint"
        );
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Move(Point),
    Down(Point),
    Up(Point),
    Wheel(Point, i32),
    Key(Key),
    DragSelect,
    CenterOn(&'static str),
    Resize(Size),
}

/// Pretend to fetch `count` tiles, reporting over `tx`.
fn spawn_tile_fetcher(tx: Sender<TileEvent>, count: u32) -> JoinHandle<()> {
    thread::spawn(move || {
        for _ in 0..count {
            if tx.send(TileEvent::Requested).is_err() {
                return;
            }
        }
        for _ in 0..count {
            thread::sleep(Duration::from_millis(60));
            if tx.send(TileEvent::Received).is_err() {
                return;
            }
        }
        // The receiver may already be gone at shutdown.
        let _ = tx.send(TileEvent::Finished);
    })
}

struct Session {
    view: MapView<u32>,
    store: FeatureStore,
    surface: LogSurface,
    tiles: Receiver<TileEvent>,
    start: Instant,
}

impl Session {
    fn now(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Apply tile reports, fire due deadlines, repaint, and log notifications.
    fn pump(&mut self) {
        for event in self.tiles.try_iter() {
            self.view.on_tile_event(event);
        }
        let now = self.now();
        self.view.tick(now);
        if self.view.pending_redraw().is_some() {
            let start = self.start;
            let clock = move || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            self.view.paint(&mut self.surface, clock);
        }
        for notification in self.view.drain_notifications() {
            match notification {
                Notification::FeatureSnap {
                    description: Some(text),
                    ..
                } => tracing::info!(%text, "hovering"),
                Notification::ViewportShift => {
                    tracing::info!("viewport shifted: dependent layers would reload now");
                }
                Notification::Painted { .. } | Notification::RedrawRequested { .. } => {}
                other => tracing::info!(notification = ?other),
            }
        }
    }

    /// Keep the loop running until `until` (milliseconds since start).
    fn run_until(&mut self, until: u64) {
        loop {
            self.pump();
            let now = self.now();
            if now >= until {
                return;
            }
            let wake = self.view.next_deadline().map_or(until, |d| d.min(until));
            let nap = wake.saturating_sub(now).clamp(1, 20);
            thread::sleep(Duration::from_millis(nap));
        }
    }

    fn perform(&mut self, action: Action) {
        let time = self.now();
        tracing::info!(?action, time, "input");
        let store = &self.store;
        let view = &mut self.view;
        match action {
            Action::Move(p) => view.on_pointer_move(store, &PointerEvent::new(p, time)),
            Action::Down(p) => view.on_pointer_down(store, &PointerEvent::new(p, time)),
            Action::Up(p) => view.on_pointer_up(store, &PointerEvent::new(p, time)),
            Action::Wheel(p, steps) => view.on_wheel(store, &WheelEvent::new(p, steps, time)),
            Action::Key(key) => view.on_key(store, &KeyEvent::new(key, time)),
            Action::DragSelect => view.launch_drag_select(),
            Action::CenterOn(text) => {
                if let Err(err) = view.center_on_text(text) {
                    tracing::warn!(%err, text, "coordinate rejected");
                }
            }
            Action::Resize(size) => view.on_resize(size),
        }
        self.pump();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,atlas_map_view=debug")),
        )
        .init();

    let (tx, rx) = mpsc::channel();
    let fetcher = spawn_tile_fetcher(tx, 6);

    let mut session = Session {
        view: MapView::new(
            MapViewConfig::default(),
            Viewport::new(Rect::new(1.3, 43.5, 1.6, 43.7)),
            Size::new(900.0, 600.0),
        ),
        store: FeatureStore::sample(),
        surface: LogSurface::default(),
        tiles: rx,
        start: Instant::now(),
    };

    let capitole = session.view.transform().to_screen(Point::new(1.4442, 43.6047));
    let script = [
        (0, Action::Move(Point::new(100.0, 100.0))),
        (200, Action::Move(capitole)),
        (500, Action::Move(Point::new(700.0, 500.0))),
        // Let the first idle record the viewport, then pan half a screen.
        (1_500, Action::Down(Point::new(700.0, 500.0))),
        (1_550, Action::Move(Point::new(450.0, 500.0))),
        (1_600, Action::Move(Point::new(250.0, 500.0))),
        (1_650, Action::Up(Point::new(250.0, 500.0))),
        // Zoom into a region.
        (2_700, Action::DragSelect),
        (2_750, Action::Down(Point::new(100.0, 100.0))),
        (2_800, Action::Move(Point::new(250.0, 220.0))),
        (2_850, Action::Up(Point::new(250.0, 220.0))),
        (3_900, Action::CenterOn("1.4442 , 43.6047")),
        (3_950, Action::CenterOn("east of here")),
        (4_000, Action::Wheel(Point::new(450.0, 300.0), -2)),
        (4_100, Action::Key(Key::ArrowLeft)),
        (4_200, Action::Resize(Size::new(1200.0, 800.0))),
    ];

    for (at, action) in script {
        session.run_until(at);
        session.perform(action);
    }
    session.run_until(5_500);

    if fetcher.join().is_err() {
        tracing::error!("tile fetcher panicked");
    }
    tracing::info!(frames = session.surface.frames, "session over");
}
