// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame input and the hit test.

use kurbo::{Point, Rect};

bitflags::bitflags! {
    /// Pointer buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary (usually left) button. The only one used for clicks.
        const PRIMARY   = 0b001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b010;
        /// Middle button.
        const MIDDLE    = 0b100;
    }
}

/// Timing and pointer state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f64,
    /// Pointer position in physical pixels.
    pub pointer: Point,
    /// Buttons that went down this frame.
    pub pressed: PointerButtons,
    /// Buttons currently held.
    pub held: PointerButtons,
    /// DPI scale applied to every metric during layout.
    pub scale: f64,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            dt: 0.0,
            pointer: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            pressed: PointerButtons::empty(),
            held: PointerButtons::empty(),
            scale: 1.0,
        }
    }
}

impl FrameInput {
    /// Input with the pointer at `pointer` and nothing pressed.
    pub fn at(pointer: impl Into<Point>, dt: f64) -> Self {
        Self {
            dt,
            pointer: pointer.into(),
            ..Self::default()
        }
    }

    /// Mark the primary button as pressed this frame (and held).
    pub fn with_primary_click(mut self) -> Self {
        self.pressed |= PointerButtons::PRIMARY;
        self.held |= PointerButtons::PRIMARY;
        self
    }

    /// Set the DPI scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// True if the primary button went down this frame.
    pub fn primary_pressed(&self) -> bool {
        self.pressed.contains(PointerButtons::PRIMARY)
    }
}

/// True if `point` lies strictly inside `rect`; edges do not count.
pub fn strictly_contains(rect: Rect, point: Point) -> bool {
    rect.x0 < point.x && point.x < rect.x1 && rect.y0 < point.y && point.y < rect.y1
}
