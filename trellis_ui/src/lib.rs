// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_ui --heading-base-level=0

//! Trellis UI: an immediate-mode box tree with persistent identity.
//!
//! The caller redeclares the whole interface every frame. Trellis turns those
//! declarations into a tree of boxes, lays the tree out, animates toward the
//! result, and hands back an ordered render list.
//!
//! - Keyed boxes ([`Key`]) are resolved against a fixed-capacity identity table
//!   and keep their displayed rectangle, style, and interaction state between
//!   frames. Unkeyed boxes live for one frame.
//! - Layout runs three passes: own padding and border (preorder), growth by
//!   children according to [`SizeKind`] (postorder), then positioning along the
//!   parent's stacking [`Axis`] (preorder).
//! - Styles come from a stack of [`StyleSet`]s with one [`Style`] per
//!   [`StyleKind`]. Escalating to hovered or clicked snaps; relaxing back is
//!   smoothed with a frame-rate independent exponential ([`animate`]).
//! - Hover and click are tested against last frame's displayed rectangle.
//!   Pointer positions on an edge never hit.
//!
//! Text measurement is pluggable through [`TextMeasure`]; any
//! `Fn(&str, f64) -> Size` works, and [`MonospaceMeasure`] covers tests and
//! demos.
//!
//! Invariant violations (a full identity table, a visible box without area, a
//! malformed tree) are not recoverable. They are logged through `log` and the
//! engine panics with the [`UiError`] message.
//!
//! # Example
//!
//! ```rust
//! use trellis_ui::{Axis, BoxFlags, DrawCommand, FrameInput, MonospaceMeasure, Ui};
//!
//! let mut ui = Ui::new(MonospaceMeasure::default());
//! let mut clicked = false;
//! for frame in 0..2 {
//!     // The second frame clicks where the button was drawn on the first.
//!     let input = if frame == 0 {
//!         FrameInput::at((0.0, 0.0), 1.0 / 60.0)
//!     } else {
//!         FrameInput::at((20.0, 12.0), 1.0 / 60.0).with_primary_click()
//!     };
//!     ui.begin(input);
//!     ui.container(Axis::Y, BoxFlags::empty(), None);
//!     let save = ui.button("Save##toolbar");
//!     ui.text("Unsaved changes");
//!     ui.pop();
//!     ui.end();
//!     clicked = ui.get(save).clicked();
//! }
//! assert!(clicked);
//!
//! let texts: Vec<_> = ui
//!     .draw_commands()
//!     .into_iter()
//!     .filter_map(|command| match command {
//!         DrawCommand::Text { text, .. } => Some(text),
//!         DrawCommand::Rectangle { .. } => None,
//!     })
//!     .collect();
//! assert_eq!(texts, ["Save", "Unsaved changes"]);
//! ```

pub mod animate;
mod config;
mod error;
mod input;
mod layout;
mod measure;
mod node;
mod render;
mod style;
mod types;
mod ui;

pub use config::UiConfig;
pub use error::UiError;
pub use input::{FrameInput, PointerButtons, strictly_contains};
pub use measure::{MonospaceMeasure, TextMeasure};
pub use node::UiBox;
pub use render::{DrawCommand, RenderItem};
pub use style::{Color, Style, StyleSet};
pub use trellis_identity::{Key, KeyMode};
pub use types::{Axis, BoxFlags, BoxId, SizeKind, StyleKind};
pub use ui::Ui;
