// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invariant violations.
//!
//! None of these are recoverable: the engine reports them through `fatal`,
//! which logs the diagnostic and panics. Build with `panic = "abort"` to turn
//! them into process aborts.

use trellis_identity::StoreError;

use crate::types::Axis;

/// An invariant violation detected by the engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UiError {
    /// The identity table cannot claim another record.
    #[error(transparent)]
    Saturated(#[from] StoreError),
    /// A visible box ended layout without a positive extent.
    #[error("visible box `{key}` has non-positive size {size} on the {axis:?} axis after layout")]
    ZeroSize {
        /// Hash segment of the box, or `<unkeyed>`.
        key: String,
        /// Offending axis.
        axis: Axis,
        /// Resolved extent on that axis.
        size: f64,
    },
    /// `pop` was called with no open container.
    #[error("pop called with no active parent")]
    PopWithoutParent,
    /// The first box of a frame was not a container.
    #[error("the first box of a frame must be a container")]
    RootNotContainer,
    /// A box was pushed after the root container had been closed.
    #[error("box pushed with no active parent after the root was closed")]
    DetachedBox,
    /// `pop_style` would have removed the base style set.
    #[error("pop_style called with only the base style set on the stack")]
    StyleStackUnderflow,
    /// Text measurement produced a non-positive or non-finite extent.
    #[error("text measurement failed for {text:?} at font size {font_size}: got {width}x{height}")]
    MeasureFailed {
        /// Text that was measured.
        text: String,
        /// Font size it was measured at.
        font_size: f64,
        /// Reported width.
        width: f64,
        /// Reported height.
        height: f64,
    },
    /// The same hash segment was declared twice in one frame.
    #[error("key `{key}` declared more than once in frame {frame}")]
    DuplicateKey {
        /// The repeated hash segment.
        key: String,
        /// Frame index.
        frame: u64,
    },
    /// A transient handle from an earlier frame was used.
    #[error("box handle does not belong to the current frame")]
    UnknownBox,
}

/// Report an invariant violation and stop.
#[track_caller]
pub(crate) fn fatal(error: UiError) -> ! {
    log::error!("trellis: {error}");
    panic!("trellis: {error}");
}
