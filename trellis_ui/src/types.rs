// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the box tree: handles, flags, axes, and size kinds.

use trellis_identity::Slot;

/// Handle of a box declared in the current frame.
///
/// Keyed boxes live in the identity table and keep the same handle every
/// frame they are declared with the same hash segment. Unkeyed boxes live in
/// per-frame storage; their handles are only meaningful until the next
/// [`Ui::begin`](crate::Ui::begin).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BoxId(pub(crate) Handle);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Handle {
    Persistent(Slot),
    Frame { index: u32, frame: u32 },
}

impl BoxId {
    pub(crate) const fn persistent(slot: Slot) -> Self {
        Self(Handle::Persistent(slot))
    }

    /// Handle of the `index`-th unkeyed box of frame `frame`.
    ///
    /// The frame number is truncated; it only has to tell consecutive frames apart.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "BoxId uses 32-bit indices and frame stamps by design."
    )]
    pub(crate) const fn transient(index: usize, frame: u64) -> Self {
        Self(Handle::Frame {
            index: index as u32,
            frame: frame as u32,
        })
    }

    /// True if this box keeps its state across frames.
    pub const fn is_persistent(self) -> bool {
        matches!(self.0, Handle::Persistent(_))
    }
}

bitflags::bitflags! {
    /// Per-frame box flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BoxFlags: u8 {
        /// Children stack along Y instead of X.
        const CHILD_AXIS_Y    = 0b0000_0001;
        /// Fill the rectangle with the background color.
        const DRAW_BACKGROUND = 0b0000_0010;
        /// Stroke the rectangle with the border color and width.
        const DRAW_BORDER     = 0b0000_0100;
        /// Draw the display text.
        const DRAW_TEXT       = 0b0000_1000;
        /// Smooth style and rectangle changes over time.
        const ANIMATE         = 0b0001_0000;
        /// Participates in hover detection.
        const HOVERABLE       = 0b0010_0000;
        /// Participates in click detection.
        const CLICKABLE       = 0b0100_0000;
        /// Set by the engine on the frame a persistent record is claimed.
        const FIRST_FRAME     = 0b1000_0000;

        /// Any flag that makes the box show up in the render list.
        const ANY_VISIBLE = Self::DRAW_BACKGROUND.bits()
            | Self::DRAW_BORDER.bits()
            | Self::DRAW_TEXT.bits();
    }
}

impl BoxFlags {
    /// Axis along which a container with these flags stacks its children.
    pub fn child_axis(self) -> Axis {
        if self.contains(Self::CHILD_AXIS_Y) {
            Axis::Y
        } else {
            Axis::X
        }
    }

    /// True if any drawing flag is set.
    pub fn is_visible(self) -> bool {
        self.intersects(Self::ANY_VISIBLE)
    }
}

/// A layout axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// Both axes, X first.
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// The flag selecting this axis as a container's stacking axis.
    pub const fn as_child_axis_flags(self) -> BoxFlags {
        match self {
            Self::X => BoxFlags::empty(),
            Self::Y => BoxFlags::CHILD_AXIS_Y,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// How a box's extent on one axis is derived.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeKind {
    /// Fixed by the measured display text.
    #[default]
    Text,
    /// Children laid end to end, with gaps between them.
    SumOfChildren,
    /// The largest child.
    LargestChild,
}

/// Interaction state a box is styled for, lowest priority first.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleKind {
    /// Neither hovered nor clicked.
    #[default]
    Inactive,
    /// Pointer over a hoverable box.
    Hovered,
    /// Primary button pressed this frame over a clickable box.
    Clicked,
}

impl StyleKind {
    /// All kinds, by ascending priority.
    pub const ALL: [Self; 3] = [Self::Inactive, Self::Hovered, Self::Clicked];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Per-axis accessors for kurbo values.
pub(crate) trait AxisExt {
    fn along(&self, axis: Axis) -> f64;
    fn along_mut(&mut self, axis: Axis) -> &mut f64;
}

impl AxisExt for kurbo::Vec2 {
    fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn along_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl AxisExt for kurbo::Size {
    fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    fn along_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.width,
            Axis::Y => &mut self.height,
        }
    }
}

impl AxisExt for kurbo::Point {
    fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn along_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}
