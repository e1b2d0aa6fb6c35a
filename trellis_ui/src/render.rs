// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render list and draw-command passthrough.

use kurbo::{Point, Rect, Vec2};

use crate::style::{Color, Style};
use crate::types::{BoxFlags, BoxId};
use crate::ui::Ui;

/// One visible box, in render order.
#[derive(Copy, Clone, Debug)]
pub struct RenderItem<'a> {
    /// The box.
    pub id: BoxId,
    /// Displayed rectangle.
    pub rect: Rect,
    /// Displayed style, unscaled.
    pub style: &'a Style,
    /// Display text; empty for boxes without one.
    pub text: &'a str,
    /// Flags the box was declared with.
    pub flags: BoxFlags,
}

/// A primitive for an external renderer.
///
/// Metrics are already multiplied by the frame's scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand<'a> {
    /// A filled and/or outlined rounded rectangle.
    Rectangle {
        /// Outer bounds.
        rect: Rect,
        /// Fill; transparent without [`BoxFlags::DRAW_BACKGROUND`].
        fill: Color,
        /// Outline color.
        border_color: Color,
        /// Outline width; zero without [`BoxFlags::DRAW_BORDER`].
        border_width: f64,
        /// Corner radius.
        border_radius: f64,
    },
    /// A run of text, top-left anchored.
    Text {
        /// Top-left of the text run.
        origin: Point,
        /// Text to draw.
        text: &'a str,
        /// Font size.
        font_size: f64,
        /// Text color.
        color: Color,
    },
}

impl<M> Ui<M> {
    /// Visible boxes of the last finished frame, parents before children and
    /// siblings in declaration order.
    pub fn render_list(&self) -> impl Iterator<Item = RenderItem<'_>> + '_ {
        self.render_list.iter().map(|&id| {
            let node = self.get(id);
            RenderItem {
                id,
                rect: node.display_rect,
                style: &node.display_style,
                text: &node.text,
                flags: node.flags,
            }
        })
    }

    /// The render list lowered to rectangles and text runs.
    pub fn draw_commands(&self) -> Vec<DrawCommand<'_>> {
        let scale = self.input.scale;
        let mut out = Vec::with_capacity(self.render_list.len() * 2);
        for item in self.render_list() {
            let style = item.style;
            let border_width = if item.flags.contains(BoxFlags::DRAW_BORDER) {
                style.border_width * scale
            } else {
                0.0
            };
            if item
                .flags
                .intersects(BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_BORDER)
            {
                let fill = if item.flags.contains(BoxFlags::DRAW_BACKGROUND) {
                    style.background
                } else {
                    Color::TRANSPARENT
                };
                out.push(DrawCommand::Rectangle {
                    rect: item.rect,
                    fill,
                    border_color: style.border,
                    border_width,
                    border_radius: style.border_radius * scale,
                });
            }
            if item.flags.contains(BoxFlags::DRAW_TEXT) && !item.text.is_empty() {
                let inset = style.inner_padding * scale + Vec2::new(border_width, border_width);
                out.push(DrawCommand::Text {
                    origin: item.rect.origin() + inset,
                    text: item.text,
                    font_size: style.font_size * scale,
                    color: style.foreground,
                });
            }
        }
        out
    }
}
