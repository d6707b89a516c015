// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map view configuration.

use atlas_interaction::InteractionConfig;
use kurbo::Size;

/// Tunables for a [`MapView`](crate::MapView).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapViewConfig {
    /// Passed to every interaction the view launches.
    pub interaction: InteractionConfig,
    /// Largest share of the current viewport that may still overlap the
    /// previous one for the change to count as a shift.
    pub shift_threshold: f64,
    /// Size of the control docked in the top-right corner (layer switcher).
    pub corner_widget: Size,
}

impl MapViewConfig {
    /// Overlap ratio at or below which a viewport change counts as a shift.
    pub const DEFAULT_SHIFT_THRESHOLD: f64 = 0.75;
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            interaction: InteractionConfig::default(),
            shift_threshold: Self::DEFAULT_SHIFT_THRESHOLD,
            corner_widget: Size::new(160.0, 120.0),
        }
    }
}
