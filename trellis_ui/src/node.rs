// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The box record.

use kurbo::{Point, Rect, Size};

use crate::style::{Style, StyleSet};
use crate::types::{Axis, BoxFlags, BoxId, SizeKind, StyleKind};

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Links {
    pub(crate) parent: Option<BoxId>,
    pub(crate) previous_sibling: Option<BoxId>,
    pub(crate) next_sibling: Option<BoxId>,
    pub(crate) first_child: Option<BoxId>,
    pub(crate) last_child: Option<BoxId>,
}

/// A declared box.
///
/// Fields fall into three groups:
/// - rebuilt every frame at push time (flags, text, size kinds, tree links,
///   interaction, target rectangle, target style set);
/// - carried across frames for keyed boxes (displayed rectangle, displayed
///   style, resolved style kind);
/// - the identity key, which lives in the identity table.
#[derive(Clone, Debug, Default)]
pub struct UiBox {
    pub(crate) flags: BoxFlags,
    pub(crate) text: String,
    pub(crate) size_kind: [SizeKind; 2],
    pub(crate) links: Links,

    pub(crate) hovered: bool,
    pub(crate) clicked: bool,
    pub(crate) target_origin: Point,
    pub(crate) target_size: Size,
    pub(crate) style_set: StyleSet,

    pub(crate) display_rect: Rect,
    pub(crate) display_style: Style,
    pub(crate) style_kind: StyleKind,

    // Frame number of the last declaration, for duplicate detection.
    pub(crate) declared_frame: u64,
}

impl UiBox {
    /// Clear everything that is rebuilt per frame.
    pub(crate) fn reset_frame(&mut self) {
        self.flags = BoxFlags::empty();
        self.text.clear();
        self.size_kind = [SizeKind::default(); 2];
        self.links = Links::default();
        self.hovered = false;
        self.clicked = false;
        self.target_origin = Point::ZERO;
        self.target_size = Size::ZERO;
    }

    /// Flags set at push time, plus [`BoxFlags::FIRST_FRAME`] for new records.
    pub fn flags(&self) -> BoxFlags {
        self.flags
    }

    /// True on the frame the record was created.
    pub fn is_first_frame(&self) -> bool {
        self.flags.contains(BoxFlags::FIRST_FRAME)
    }

    /// Text displayed by this box (the display segment of its key).
    pub fn display_text(&self) -> &str {
        &self.text
    }

    /// Sizing policy on `axis`.
    pub fn size_kind(&self, axis: Axis) -> SizeKind {
        self.size_kind[axis.index()]
    }

    /// Pointer strictly inside last frame's rectangle of a hoverable box.
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Hovered, clickable, and the primary button went down this frame.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Rectangle computed by this frame's layout.
    pub fn target_rect(&self) -> Rect {
        Rect::from_origin_size(self.target_origin, self.target_size)
    }

    /// Rectangle on screen, possibly mid-animation toward [`UiBox::target_rect`].
    pub fn display_rect(&self) -> Rect {
        self.display_rect
    }

    /// Style set captured from the style stack at push time.
    pub fn style_set(&self) -> &StyleSet {
        &self.style_set
    }

    /// Style on screen, possibly mid-animation.
    pub fn display_style(&self) -> &Style {
        &self.display_style
    }

    /// Interaction state the box was last styled for.
    pub fn style_kind(&self) -> StyleKind {
        self.style_kind
    }

    pub(crate) fn along_child_axis(&mut self, container_flags: BoxFlags) {
        let axis = container_flags.child_axis();
        self.size_kind[axis.index()] = SizeKind::SumOfChildren;
        self.size_kind[axis.cross().index()] = SizeKind::LargestChild;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_persistent_fields() {
        let mut b = UiBox {
            flags: BoxFlags::ANIMATE,
            text: String::from("hello"),
            hovered: true,
            target_size: Size::new(3.0, 4.0),
            display_rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            style_kind: StyleKind::Hovered,
            ..UiBox::default()
        };
        b.reset_frame();
        assert!(b.flags().is_empty());
        assert!(b.display_text().is_empty());
        assert!(!b.hovered());
        assert_eq!(b.target_rect(), Rect::ZERO);
        assert_eq!(b.display_rect(), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(b.style_kind(), StyleKind::Hovered);
    }

    #[test]
    fn child_axis_picks_sum_and_largest() {
        let mut b = UiBox::default();
        b.along_child_axis(BoxFlags::CHILD_AXIS_Y);
        assert_eq!(b.size_kind(Axis::Y), SizeKind::SumOfChildren);
        assert_eq!(b.size_kind(Axis::X), SizeKind::LargestChild);
    }
}
