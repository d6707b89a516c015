// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What an interaction can see and ask for while handling one event.

use alloc::string::String;

use atlas_viewport::{ViewTransform, Viewport};
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

/// Feature hit testing and description, provided by the document layer.
///
/// `K` is a lookup key (for example a feature id). Interactions only ever keep
/// keys; anything else about a feature is resolved through this trait when it
/// is needed, so a feature removed from the document simply stops resolving.
pub trait FeatureLookup<K> {
    /// The topmost feature under `screen`, if any.
    fn hit_test(&self, screen: Point, view: &ViewTransform) -> Option<K>;

    /// Displayable text for a feature, or `None` if it no longer exists.
    fn describe(&self, feature: &K) -> Option<String>;
}

/// A [`FeatureLookup`] over an empty document.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeatures;

impl<K> FeatureLookup<K> for NoFeatures {
    fn hit_test(&self, _screen: Point, _view: &ViewTransform) -> Option<K> {
        None
    }

    fn describe(&self, _feature: &K) -> Option<String> {
        None
    }
}

/// Line style for overlay rectangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStyle {
    /// Continuous line.
    Solid,
    /// Alternating dashes and dots, used for rubber-band selections.
    DashDot,
}

/// Drawing operations an interaction may use on top of the painted map.
///
/// Implemented by the render surface; interactions never create one.
pub trait OverlayPainter<K> {
    /// Draw the hover highlight for a feature.
    fn draw_hover(&mut self, feature: &K, view: &ViewTransform);

    /// Outline a rectangle in screen coordinates.
    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle);
}

/// Something an interaction asks its owner to do.
///
/// Interactions hold no reference to the view that owns them; they queue
/// requests instead, and the owner applies them in order once the handler
/// returns.
#[derive(Clone, Debug, PartialEq)]
pub enum Request<K> {
    /// The hovered feature changed.
    FeatureSnap(Option<K>),
    /// Move the viewport by a geographic offset.
    PanBy(Vec2),
    /// Zoom about a geographic anchor; factors above `1.0` zoom in.
    ZoomAbout {
        /// Point that keeps its screen position.
        anchor: Point,
        /// Scale factor.
        factor: f64,
    },
    /// Show this geographic region.
    SetViewport(Viewport),
    /// Repaint; `full` also repaints base content.
    Redraw {
        /// Whether base content must be repainted too.
        full: bool,
    },
    /// Replace the current interaction with the default one.
    LaunchDefault,
}

/// Request buffer filled during a single dispatch.
pub type Requests<K> = SmallVec<[Request<K>; 4]>;

/// Per-event context handed to interaction handlers.
pub struct InteractionCx<'a, K> {
    view: &'a ViewTransform,
    features: &'a dyn FeatureLookup<K>,
    requests: &'a mut Requests<K>,
}

impl<K> core::fmt::Debug for InteractionCx<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InteractionCx")
            .field("view", &self.view)
            .field("requests", &self.requests.len())
            .finish_non_exhaustive()
    }
}

impl<'a, K> InteractionCx<'a, K> {
    /// Create a context over the current view and document.
    pub fn new(
        view: &'a ViewTransform,
        features: &'a dyn FeatureLookup<K>,
        requests: &'a mut Requests<K>,
    ) -> Self {
        Self {
            view,
            features,
            requests,
        }
    }

    /// The view being interacted with.
    pub fn view(&self) -> &ViewTransform {
        self.view
    }

    /// Topmost feature under a screen position.
    pub fn hit_test(&self, screen: Point) -> Option<K> {
        self.features.hit_test(screen, self.view)
    }

    /// Queue a request for the owner.
    pub fn request(&mut self, request: Request<K>) {
        self.requests.push(request);
    }

    /// Requests queued so far during this dispatch.
    pub fn requests(&self) -> &[Request<K>] {
        &self.requests[..]
    }
}
