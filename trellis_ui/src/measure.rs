// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement seam.

use kurbo::Size;

/// Measures display text.
///
/// Must be a pure function of its inputs. A non-positive or non-finite result
/// for non-empty text is treated as a measurement failure.
pub trait TextMeasure {
    /// Extent of `text` rendered at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> Size,
{
    fn measure(&self, text: &str, font_size: f64) -> Size {
        self(text, font_size)
    }
}

/// Fixed-advance measurement: every character is `advance * font_size` wide,
/// lines are `line_height * font_size` tall.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Horizontal advance per character, as a fraction of the font size.
    pub advance: f64,
    /// Line height, as a fraction of the font size.
    pub line_height: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.0,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        let lines = text.lines().count().max(1);
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            columns as f64 * self.advance * font_size,
            lines as f64 * self.line_height * font_size,
        )
    }
}
