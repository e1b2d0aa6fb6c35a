// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String hashing and the multiply-shift-increment probe sequence.

/// Seed of the djb2 hash.
pub const DJB2_SEED: u64 = 5381;

/// Hash a byte string with djb2 (`h = h * 33 + byte`, wrapping).
///
/// ```
/// use trellis_identity::hash::{djb2, DJB2_SEED};
/// assert_eq!(djb2(b""), DJB2_SEED);
/// assert_eq!(djb2(b"a"), DJB2_SEED * 33 + u64::from(b'a'));
/// ```
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |hash, &byte| {
        hash.wrapping_add(hash << 5).wrapping_add(u64::from(byte))
    })
}

/// Advance an MSI probe for a table of `1 << exponent` slots.
///
/// The step is taken from the top `exponent` bits of `hash` and forced odd, so
/// that repeated calls starting from `index = hash` visit every slot of a
/// power-of-two table exactly once before repeating.
pub fn msi_probe(hash: u64, exponent: u32, index: u64) -> u64 {
    debug_assert!(
        (1..64).contains(&exponent),
        "exponent must describe a table of 2..2^63 slots"
    );
    let mask = (1_u64 << exponent) - 1;
    let step = (hash >> (64 - exponent)) | 1;
    index.wrapping_add(step) & mask
}
