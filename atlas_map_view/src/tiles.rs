// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background tile loading progress.
//!
//! Tile sources report asynchronously, from whatever thread fetches the
//! images. Those reports are values ([`TileEvent`]) so they can be sent over
//! a channel and applied on the thread that owns the map view.

/// A report from the tile source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileEvent {
    /// One more tile was requested.
    Requested,
    /// One tile arrived.
    Received,
    /// The source has nothing left in flight.
    Finished,
}

/// Progress of the current tile batch.
///
/// `requested` is the declared total; `received` never exceeds it. Both reset
/// to zero when the batch finishes, so a late arrival for a batch that is
/// already over cannot push the counters out of range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileProgress {
    requested: u32,
    received: u32,
}

impl TileProgress {
    /// Tiles requested in the current batch.
    pub const fn requested(&self) -> u32 {
        self.requested
    }

    /// Tiles received in the current batch.
    pub const fn received(&self) -> u32 {
        self.received
    }

    /// Tiles still in flight.
    pub const fn outstanding(&self) -> u32 {
        self.requested - self.received
    }

    /// Whether a batch is in progress.
    pub const fn is_loading(&self) -> bool {
        self.requested > 0
    }

    /// Count one more request and return the new total.
    pub fn request(&mut self) -> u32 {
        self.requested = self.requested.saturating_add(1);
        self.requested
    }

    /// Count one arrival.
    ///
    /// Returns `false`, leaving the counters untouched, if nothing was outstanding.
    pub fn receive(&mut self) -> bool {
        if self.received < self.requested {
            self.received += 1;
            true
        } else {
            false
        }
    }

    /// End the batch.
    pub fn finish(&mut self) {
        *self = Self::default();
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn tile_event() -> impl Strategy<Value = TileEvent> {
        prop_oneof![
            3 => Just(TileEvent::Requested),
            3 => Just(TileEvent::Received),
            1 => Just(TileEvent::Finished),
        ]
    }

    proptest! {
        /// No interleaving of reports pushes the counters out of range.
        #[test]
        fn any_interleaving_stays_in_range(
            events in prop::collection::vec(tile_event(), 0..200)
        ) {
            let mut p = TileProgress::default();
            for event in events {
                match event {
                    TileEvent::Requested => {
                        p.request();
                    }
                    TileEvent::Received => {
                        p.receive();
                    }
                    TileEvent::Finished => {
                        p.finish();
                        prop_assert_eq!(p.requested(), 0);
                        prop_assert_eq!(p.received(), 0);
                    }
                }
                prop_assert!(p.received() <= p.requested(), "{:?} after {:?}", p, event);
            }
        }
    }
}
