use std::sync::LazyLock;

use super::Variant;
use crate::weyl::{self, MULTIPLIER_COUNT};

/// Derived constants for one variant: field masks, the timestamp shift and
/// the multiplier sub-tables for the node and sequence widths.
#[derive(Debug)]
pub(crate) struct Layout {
    pub(crate) t_mask: u64,
    pub(crate) n_mask: u64,
    pub(crate) s_mask: u64,
    /// `N + S`.
    pub(crate) t_shift: u32,
    pub(crate) s_shift: u32,
    /// Every bit a well-formed identifier may set.
    pub(crate) valid_mask: u64,
    pub(crate) n_mult: &'static [u64; MULTIPLIER_COUNT],
    pub(crate) s_mult: &'static [u64; MULTIPLIER_COUNT],
}

const fn mask(bits: u32) -> u64 {
    match bits {
        0 => 0,
        64.. => u64::MAX,
        _ => (1 << bits) - 1,
    }
}

impl Layout {
    fn new(v: Variant) -> Self {
        let (t, n, s) = (v.timestamp_bits(), v.node_bits(), v.sequence_bits());
        let t_shift = n + s;
        Self {
            t_mask: mask(t),
            n_mask: mask(n),
            s_mask: mask(s),
            t_shift,
            s_shift: s,
            valid_mask: mask(t + t_shift),
            n_mult: weyl::sub_table(n),
            s_mult: weyl::sub_table(s),
        }
    }
}

static LAYOUTS: LazyLock<[Layout; Variant::COUNT]> =
    LazyLock::new(|| Variant::ALL.map(Layout::new));

impl Variant {
    #[inline]
    pub(crate) fn layout(self) -> &'static Layout {
        &LAYOUTS[self.ordinal()]
    }

    /// Mask of the timestamp field, before shifting.
    #[must_use]
    pub const fn timestamp_mask(self) -> u64 {
        mask(self.timestamp_bits())
    }

    /// Mask of the node field, before shifting.
    #[must_use]
    pub const fn node_mask(self) -> u64 {
        mask(self.node_bits())
    }

    /// Mask of the sequence field.
    #[must_use]
    pub const fn sequence_mask(self) -> u64 {
        mask(self.sequence_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_are_built_once() {
        let a = Variant::CHRONO64S.layout();
        let b = Variant::CHRONO64S.layout();
        assert!(core::ptr::eq(a, b));
    }

    #[test]
    fn masks_and_shifts() {
        let l = Variant::CHRONO64S.layout();
        assert_eq!(l.t_mask, (1 << 33) - 1);
        assert_eq!(l.n_mask, 0x7FFF);
        assert_eq!(l.s_mask, 0x7FFF);
        assert_eq!(l.t_shift, 30);
        assert_eq!(l.valid_mask, i64::MAX as u64);

        let l = Variant::UCHRONO32BS.layout();
        assert_eq!(l.t_mask, u64::from(u32::MAX));
        assert_eq!((l.n_mask, l.s_mask, l.t_shift), (0, 0, 0));
        assert_eq!(l.valid_mask, u64::from(u32::MAX));
    }

    #[test]
    fn const_masks_agree_with_layout() {
        for v in Variant::ALL {
            let l = v.layout();
            assert_eq!(v.timestamp_mask(), l.t_mask);
            assert_eq!(v.node_mask(), l.n_mask);
            assert_eq!(v.sequence_mask(), l.s_mask);
        }
    }

    #[test]
    fn sub_tables_match_field_widths() {
        let l = Variant::UCHRONO64S.layout();
        assert!(core::ptr::eq(l.n_mult, weyl::sub_table(16)));
        assert!(core::ptr::eq(l.s_mult, weyl::sub_table(15)));
    }
}
