// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by interactions.

use kurbo::Point;

bitflags::bitflags! {
    /// Pointer buttons involved in an event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary (usually left) button.
        const PRIMARY   = 0b0000_0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0000_0010;
        /// Middle button or wheel press.
        const MIDDLE    = 0b0000_0100;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::PRIMARY
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Super.
        const META    = 0b0000_1000;
    }
}

/// A press, release, move, or double-click at a screen position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in logical pixels, relative to the map surface.
    pub position: Point,
    /// Buttons involved: the changed button for press/release, held buttons for moves.
    pub buttons: PointerButtons,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl PointerEvent {
    /// A primary-button event with no modifiers.
    pub fn new(position: Point, time: u64) -> Self {
        Self {
            position,
            buttons: PointerButtons::PRIMARY,
            modifiers: Modifiers::empty(),
            time,
        }
    }

    /// Replace the buttons.
    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Replace the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A wheel rotation, in notches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer position in logical pixels.
    pub position: Point,
    /// Positive values zoom in, negative values zoom out.
    pub steps: i32,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl WheelEvent {
    /// A wheel event with no modifiers.
    pub fn new(position: Point, steps: i32, time: u64) -> Self {
        Self {
            position,
            steps,
            modifiers: Modifiers::empty(),
            time,
        }
    }
}

/// Keys the map view reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Pan west.
    ArrowLeft,
    /// Pan east.
    ArrowRight,
    /// Pan north.
    ArrowUp,
    /// Pan south.
    ArrowDown,
    /// Zoom in about the view center.
    Plus,
    /// Zoom out about the view center.
    Minus,
    /// Abandon the gesture in progress.
    Escape,
    /// Any other key. Still counts as user activity.
    Other,
}

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub fn new(key: Key, time: u64) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            time,
        }
    }
}
