// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity, open-addressed identity table.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::hash::{djb2, msi_probe};

/// Highest occupancy allowed, in percent of capacity.
pub const MAX_LOAD_PERCENT: usize = 70;

/// Handle of an occupied slot in an [`IdentityStore`].
///
/// Slot `0` is the sentinel and is never handed out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u32);

impl Slot {
    /// Index of the slot in the table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of [`IdentityStore::resolve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// The slot holding the record for the hash segment.
    pub slot: Slot,
    /// True if the slot was claimed by this call.
    pub is_new: bool,
}

/// Errors reported by [`IdentityStore`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Claiming another slot would push occupancy above [`MAX_LOAD_PERCENT`].
    #[error("identity table saturated: {used} of {capacity} slots in use (max load 70%)")]
    Saturated {
        /// Slots in use.
        used: usize,
        /// Total slots, sentinel included.
        capacity: usize,
    },
}

#[derive(Clone, Debug, Default)]
struct Entry<T> {
    key: Option<Box<str>>,
    value: T,
}

/// A persistent table mapping hash segments to records of type `T`.
///
/// Records are claimed on first lookup and live as long as the store; there
/// is no removal. Capacity is fixed at construction.
///
/// ```
/// use trellis_identity::IdentityStore;
///
/// let mut store: IdentityStore<u32> = IdentityStore::with_max_entries(8);
/// let first = store.resolve("Save1").unwrap();
/// assert!(first.is_new);
/// *store.get_mut(first.slot) += 1;
///
/// let again = store.resolve("Save1").unwrap();
/// assert!(!again.is_new);
/// assert_eq!(again.slot, first.slot);
/// assert_eq!(*store.get(again.slot), 1);
/// ```
pub struct IdentityStore<T> {
    entries: Vec<Entry<T>>,
    exponent: u32,
    used: usize,
}

impl<T> Debug for IdentityStore<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IdentityStore")
            .field("capacity", &self.entries.len())
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}

impl<T: Default> IdentityStore<T> {
    /// Create a table able to hold at least `max_entries` records.
    ///
    /// The capacity is the next power of two of `2 * max_entries` (at least 4),
    /// which keeps `max_entries` claims under the load limit.
    pub fn with_max_entries(max_entries: usize) -> Self {
        let capacity = max_entries.saturating_mul(2).max(4).next_power_of_two();
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, Entry::default);
        Self {
            entries,
            exponent: capacity.trailing_zeros(),
            used: 0,
        }
    }
}

impl<T> IdentityStore<T> {
    /// Number of claimed records.
    pub fn len(&self) -> usize {
        self.used
    }

    /// True if nothing has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Number of slots, the sentinel included.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// The most records this table will ever hold.
    pub fn max_load(&self) -> usize {
        self.capacity() * MAX_LOAD_PERCENT / 100
    }

    /// Find the record for `hash_segment`, claiming a slot for it if it has none.
    ///
    /// A hit is only reported when the stored segment matches byte for byte;
    /// hash collisions keep probing.
    pub fn resolve(&mut self, hash_segment: &str) -> Result<Resolved, StoreError> {
        let hash = djb2(hash_segment.as_bytes());
        for idx in probe_sequence(hash, self.exponent) {
            match &self.entries[idx].key {
                Some(existing) if **existing == *hash_segment => {
                    return Ok(Resolved {
                        slot: Self::slot(idx),
                        is_new: false,
                    });
                }
                Some(_) => {}
                None => {
                    if (self.used + 1) * 100 > self.capacity() * MAX_LOAD_PERCENT {
                        break;
                    }
                    self.used += 1;
                    self.entries[idx].key = Some(Box::from(hash_segment));
                    return Ok(Resolved {
                        slot: Self::slot(idx),
                        is_new: true,
                    });
                }
            }
        }
        Err(StoreError::Saturated {
            used: self.used,
            capacity: self.capacity(),
        })
    }

    /// Look up an existing record without claiming.
    pub fn find(&self, hash_segment: &str) -> Option<Slot> {
        let hash = djb2(hash_segment.as_bytes());
        for idx in probe_sequence(hash, self.exponent) {
            match &self.entries[idx].key {
                Some(existing) if **existing == *hash_segment => return Some(Self::slot(idx)),
                Some(_) => {}
                None => return None,
            }
        }
        None
    }

    /// The hash segment a slot was claimed with.
    pub fn key_of(&self, slot: Slot) -> Option<&str> {
        self.entries.get(slot.index())?.key.as_deref()
    }

    /// Record in `slot`.
    pub fn get(&self, slot: Slot) -> &T {
        &self.entries[slot.index()].value
    }

    /// Mutable record in `slot`.
    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        &mut self.entries[slot.index()].value
    }

    /// Iterate claimed slots with their hash segments and records.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str, &T)> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, e)| {
            e.key
                .as_deref()
                .map(|key| (Self::slot(i), key, &e.value))
        })
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot handles are 32-bit; tables never approach that size."
    )]
    const fn slot(idx: usize) -> Slot {
        Slot(idx as u32)
    }
}

/// Slots probed for `hash` in a table of `1 << exponent` slots.
///
/// Walks one full MSI cycle from `hash`, so every slot but the sentinel comes
/// up exactly once.
fn probe_sequence(hash: u64, exponent: u32) -> impl Iterator<Item = usize> {
    let mut index = hash;
    (0..1_u64 << exponent).filter_map(move |_| {
        index = msi_probe(hash, exponent, index);
        usize::try_from(index).ok().filter(|&idx| idx != 0)
    })
}
