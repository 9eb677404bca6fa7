//! Weyl-Golden mixing.
//!
//! Small, predictable integers (node ids, sequence counters) are spread across
//! their full field width by multiplying with an odd constant and XOR-ing a
//! salt. Because every multiplier is odd, multiplication is a bijection modulo
//! `2^bits`: distinct inputs never collapse onto the same mixed output for a
//! fixed multiplier/salt pair.

mod multipliers;

pub use multipliers::*;

use std::sync::OnceLock;

/// Number of entries in the multiplier table (and in every derived
/// sub-table).
pub const MULTIPLIER_COUNT: usize = 128;

/// Mask applied to persona indices before they address a sub-table.
pub const INDEX_MASK: u8 = (MULTIPLIER_COUNT - 1) as u8;

/// One lazily-derived sub-table per possible field width (`0..=64`).
static SUB_TABLES: [OnceLock<[u64; MULTIPLIER_COUNT]>; 65] = [const { OnceLock::new() }; 65];

/// Narrows a 64-bit seed multiplier to `bits` bits, keeping its leading bits
/// and forcing the result odd.
///
/// A width of zero yields `1`; zero-width fields never consult it.
///
/// # Example
/// ```
/// use chrono_id::weyl::derive_multiplier;
///
/// assert_eq!(derive_multiplier(0x9E37_79B9_7F4A_7C55, 15), 0x4F1B);
/// assert_eq!(derive_multiplier(0x9E37_79B9_7F4A_7C55, 0), 1);
/// ```
#[must_use]
pub const fn derive_multiplier(seed: u64, bits: u32) -> u64 {
    match bits {
        0 => 1,
        64.. => seed | 1,
        _ => (seed >> (64 - bits)) | 1,
    }
}

/// Derives all 128 multipliers for the given field width.
#[must_use]
pub const fn derive_sub_table(bits: u32) -> [u64; MULTIPLIER_COUNT] {
    let mut table = [1; MULTIPLIER_COUNT];
    let mut i = 0;
    while i < MULTIPLIER_COUNT {
        table[i] = derive_multiplier(WEYL_MULTIPLIERS[i], bits);
        i += 1;
    }
    table
}

/// Returns the cached sub-table of odd multipliers for a field of `bits` bits.
///
/// The table is derived on first use and shared, read-only, for the rest of
/// the process.
///
/// # Panics
///
/// Panics if `bits > 64`.
pub fn sub_table(bits: u32) -> &'static [u64; MULTIPLIER_COUNT] {
    SUB_TABLES[bits as usize].get_or_init(|| derive_sub_table(bits))
}

/// The Weyl-Golden transform: `((value * multiplier) ^ salt) & mask`.
///
/// Multiplication wraps, matching native fixed-width unsigned arithmetic.
#[inline(always)]
#[must_use]
pub const fn mix(value: u64, mask: u64, multiplier: u64, salt: u64) -> u64 {
    (value.wrapping_mul(multiplier) ^ salt) & mask
}

/// The mixing parameters applied to the node and sequence fields.
///
/// A [`Persona`] carries one of these; [`MixParams::shared`] builds the
/// single-index, single-salt form used for manual assembly.
///
/// [`Persona`]: crate::generator::Persona
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MixParams {
    /// Salt XOR-ed into the mixed node field.
    pub node_salt: u64,
    /// Index into the node-width sub-table (taken modulo 128).
    pub node_idx: u8,
    /// Salt XOR-ed into the mixed sequence field.
    pub seq_salt: u64,
    /// Index into the sequence-width sub-table (taken modulo 128).
    pub seq_idx: u8,
    /// Added to the sequence before mixing.
    pub seq_offset: u64,
}

impl MixParams {
    /// Parameters that leave both fields unsalted and use multiplier 0.
    pub const ZERO: Self = Self {
        node_salt: 0,
        node_idx: 0,
        seq_salt: 0,
        seq_idx: 0,
        seq_offset: 0,
    };

    /// One multiplier index and one salt for both fields, with no sequence
    /// offset.
    #[must_use]
    pub const fn shared(p_idx: u8, salt: u64) -> Self {
        Self {
            node_salt: salt,
            node_idx: p_idx & INDEX_MASK,
            seq_salt: salt,
            seq_idx: p_idx & INDEX_MASK,
            seq_offset: 0,
        }
    }
}
