// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style bundles, per-state style sets, and the scoped style stack.

use kurbo::Vec2;

use crate::animate::{approach, smoothing_factor};
use crate::types::StyleKind;

/// Straight RGBA color, components in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build a color from components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from `0xRRGGBBAA`.
    pub const fn from_rgba_hex(hex: u32) -> Self {
        Self::rgba(
            ((hex >> 24) & 0xff) as f32 / 255.0,
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Components as an array.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "colors are stored in f32; the smoothing factor only needs f32 precision."
    )]
    fn approach(self, target: Self, factor: f64) -> Self {
        let t = factor as f32;
        Self::rgba(
            self.r + (target.r - self.r) * t,
            self.g + (target.g - self.g) * t,
            self.b + (target.b - self.b) * t,
            self.a + (target.a - self.a) * t,
        )
    }
}

/// Visual parameters of a box in one interaction state.
///
/// Metrics are in logical units; layout multiplies them by the frame's scale.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Font size handed to text measurement.
    pub font_size: f64,
    /// Space between the border and the content, per axis.
    pub inner_padding: Vec2,
    /// Space between consecutive children, per axis.
    pub child_gap: Vec2,
    /// Fill color.
    pub background: Color,
    /// Text color.
    pub foreground: Color,
    /// Border color.
    pub border: Color,
    /// Border stroke width.
    pub border_width: f64,
    /// Corner radius.
    pub border_radius: f64,
    /// Exponential smoothing speed, in 1/seconds.
    pub animation_speed: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            inner_padding: Vec2::new(5.0, 3.0),
            child_gap: Vec2::new(3.0, 3.0),
            background: Color::from_rgba_hex(0xd8d8d8ff),
            foreground: Color::BLACK,
            border: Color::from_rgba_hex(0x6d6d6dff),
            border_width: 1.0,
            border_radius: 5.0,
            animation_speed: 20.0,
        }
    }
}

impl Style {
    /// Smooth every field toward `target` over `dt` seconds.
    ///
    /// The speed is adopted from `target` first, so each state controls how
    /// fast boxes settle into it.
    pub fn approach(&mut self, target: &Self, dt: f64) {
        self.animation_speed = target.animation_speed;
        let factor = smoothing_factor(self.animation_speed, dt);

        self.font_size = approach(self.font_size, target.font_size, factor);
        self.inner_padding = Vec2::new(
            approach(self.inner_padding.x, target.inner_padding.x, factor),
            approach(self.inner_padding.y, target.inner_padding.y, factor),
        );
        self.child_gap = Vec2::new(
            approach(self.child_gap.x, target.child_gap.x, factor),
            approach(self.child_gap.y, target.child_gap.y, factor),
        );
        self.background = self.background.approach(target.background, factor);
        self.foreground = self.foreground.approach(target.foreground, factor);
        self.border = self.border.approach(target.border, factor);
        self.border_width = approach(self.border_width, target.border_width, factor);
        self.border_radius = approach(self.border_radius, target.border_radius, factor);
    }
}

/// One [`Style`] per [`StyleKind`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSet {
    kinds: [Style; 3],
}

impl Default for StyleSet {
    fn default() -> Self {
        let base = Style::default();
        Self {
            kinds: [
                base,
                Style {
                    background: Color::from_rgba_hex(0x9b9b9bff),
                    border: Color::from_rgba_hex(0x515151ff),
                    ..base
                },
                Style {
                    background: Color::BLACK,
                    border: Color::WHITE,
                    ..base
                },
            ],
        }
    }
}

impl StyleSet {
    /// The same style for every state.
    pub fn uniform(style: Style) -> Self {
        Self {
            kinds: [style; 3],
        }
    }

    /// Style for `kind`.
    pub fn get(&self, kind: StyleKind) -> &Style {
        &self.kinds[kind.index()]
    }

    /// Mutable style for `kind`.
    pub fn get_mut(&mut self, kind: StyleKind) -> &mut Style {
        &mut self.kinds[kind.index()]
    }

    /// Apply `edit` to the style of every state.
    pub fn edit_all(&mut self, mut edit: impl FnMut(&mut Style)) -> &mut Self {
        for style in &mut self.kinds {
            edit(style);
        }
        self
    }
}

/// Scoped stack of style sets.
///
/// Always holds at least the base set; boxes capture the top at push time.
#[derive(Clone, Debug)]
pub(crate) struct StyleStack {
    sets: Vec<StyleSet>,
}

impl StyleStack {
    pub(crate) fn new(base: StyleSet) -> Self {
        Self { sets: vec![base] }
    }

    pub(crate) fn reset(&mut self, base: StyleSet) {
        self.sets.clear();
        self.sets.push(base);
    }

    pub(crate) fn top(&self) -> &StyleSet {
        // The base set is never popped.
        &self.sets[self.sets.len() - 1]
    }

    /// Duplicate the top and return it for customization.
    pub(crate) fn push(&mut self) -> &mut StyleSet {
        let top = *self.top();
        self.sets.push(top);
        let last = self.sets.len() - 1;
        &mut self.sets[last]
    }

    /// Discard the top. Returns false if only the base set is left.
    pub(crate) fn pop(&mut self) -> bool {
        if self.sets.len() <= 1 {
            return false;
        }
        self.sets.pop();
        true
    }

    pub(crate) fn depth(&self) -> usize {
        self.sets.len()
    }
}
