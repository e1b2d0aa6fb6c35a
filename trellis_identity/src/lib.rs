// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_identity --heading-base-level=0

//! Trellis Identity: frame-persistent identity for immediate-mode declarations.
//!
//! Immediate-mode UIs redeclare every element every frame. To keep hover,
//! click, and animation state attached to "the same" element, each
//! declaration carries a key, and the key is resolved to a record that
//! outlives the frame.
//!
//! - [`Key`]: a label plus a [`KeyMode`] deciding which part is hashed.
//!   [`Key::parse`] understands the `##` (salt) and `###` (stable id) markers.
//! - [`hash::djb2`] and [`hash::msi_probe`]: the hash and probe sequence.
//! - [`IdentityStore`]: a fixed-capacity open-addressed table. Slot 0 is a
//!   sentinel, occupancy is capped at 70%, and a hit requires the stored
//!   hash segment to match exactly.
//!
//! # Example
//!
//! ```rust
//! use trellis_identity::{IdentityStore, Key};
//!
//! let mut store: IdentityStore<f32> = IdentityStore::with_max_entries(64);
//!
//! // The counter's label changes every frame but its identity does not.
//! let frame_1 = Key::parse("Count: 1###counter");
//! let frame_2 = Key::parse("Count: 2###counter");
//!
//! let a = store.resolve(&frame_1.hash_segment()).unwrap();
//! let b = store.resolve(&frame_2.hash_segment()).unwrap();
//! assert!(a.is_new && !b.is_new);
//! assert_eq!(a.slot, b.slot);
//! assert_eq!(frame_2.display(), "Count: 2");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hash;
pub mod key;
pub mod store;

pub use key::{Key, KeyMode};
pub use store::{IdentityStore, MAX_LOAD_PERCENT, Resolved, Slot, StoreError};
