use core::fmt;
use core::str::FromStr;

use crate::{Error, FormatError, Result, time::Precision};

/// One entry of the identifier catalog: a precision plus the widths of the
/// timestamp, node and sequence fields.
///
/// Fields are laid out most-significant first:
///
/// ```text
///  +----------+---------------+----------+--------------+
///  | sign (1) | timestamp (T) | node (N) | sequence (S) |
///  +----------+---------------+----------+--------------+
///  |<-- MSB ----------- 32 or 64 bits ----------- LSB ->|
/// ```
///
/// The sign bit exists only on signed variants and is always zero, so signed
/// identifiers stay positive when stored in a signed integer column.
///
/// Variants are plain values; the full catalog is [`Variant::ALL`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    name: &'static str,
    ordinal: u8,
    precision: Precision,
    t_bits: u8,
    n_bits: u8,
    s_bits: u8,
    signed: bool,
}

/// Declares the catalog as associated constants plus the ordered
/// [`Variant::ALL`] table.
///
/// Every entry is checked at compile time: its fields (plus the sign bit)
/// must fill exactly 32 or 64 bits.
macro_rules! define_variants {
    (
        $(
            $(#[$meta:meta])*
            $konst:ident = $ord:literal : $name:literal,
                $precision:ident, T $t:literal, N $n:literal, S $s:literal, $signed:literal;
        )*
    ) => {
        impl Variant {
            $(
                $(#[$meta])*
                pub const $konst: Self = Self {
                    name: $name,
                    ordinal: $ord,
                    precision: Precision::$precision,
                    t_bits: $t,
                    n_bits: $n,
                    s_bits: $s,
                    signed: $signed,
                };
            )*

            /// The whole catalog, 64-bit family first.
            pub const ALL: [Self; Self::COUNT] = [$(Self::$konst),*];
        }

        const _: () = {
            $(
                let width = $t + $n + $s + ($signed as u32);
                assert!(width == 32 || width == 64, "variant must fill its word");
            )*
            let mut i = 0;
            while i < Variant::COUNT {
                assert!(Variant::ALL[i].ordinal as usize == i, "ordinals follow ALL");
                i += 1;
            }
        };
    };
}

define_variants! {
    /// Unsigned 64-bit, month precision.
    UCHRONO64MO = 0: "uchrono64mo", Month, T 12, N 26, S 26, false;
    /// Signed 64-bit, month precision.
    CHRONO64MO = 1: "chrono64mo", Month, T 12, N 25, S 26, true;
    UCHRONO64W = 2: "uchrono64w", Week, T 14, N 26, S 24, false;
    CHRONO64W = 3: "chrono64w", Week, T 14, N 25, S 24, true;
    UCHRONO64D = 4: "uchrono64d", Day, T 17, N 24, S 23, false;
    CHRONO64D = 5: "chrono64d", Day, T 17, N 23, S 23, true;
    UCHRONO64H = 6: "uchrono64h", Hour, T 21, N 22, S 21, false;
    CHRONO64H = 7: "chrono64h", Hour, T 21, N 21, S 21, true;
    UCHRONO64M = 8: "uchrono64m", Minute, T 27, N 19, S 18, false;
    CHRONO64M = 9: "chrono64m", Minute, T 27, N 18, S 18, true;
    /// Unsigned 64-bit, second precision.
    UCHRONO64S = 10: "uchrono64s", Second, T 33, N 16, S 15, false;
    /// Signed 64-bit, second precision. The general-purpose default.
    CHRONO64S = 11: "chrono64s", Second, T 33, N 15, S 15, true;
    UCHRONO64DS = 12: "uchrono64ds", Decisecond, T 36, N 15, S 13, false;
    CHRONO64DS = 13: "chrono64ds", Decisecond, T 36, N 14, S 13, true;
    UCHRONO64CS = 14: "uchrono64cs", Centisecond, T 40, N 12, S 12, false;
    CHRONO64CS = 15: "chrono64cs", Centisecond, T 40, N 11, S 12, true;
    UCHRONO64MS = 16: "uchrono64ms", Millisecond, T 43, N 11, S 10, false;
    CHRONO64MS = 17: "chrono64ms", Millisecond, T 43, N 10, S 10, true;
    UCHRONO64US = 18: "uchrono64us", Microsecond, T 53, N 6, S 5, false;
    CHRONO64US = 19: "chrono64us", Microsecond, T 53, N 5, S 5, true;
    UCHRONO32Y = 20: "uchrono32y", Year, T 8, N 13, S 11, false;
    CHRONO32Y = 21: "chrono32y", Year, T 8, N 12, S 11, true;
    UCHRONO32HY = 22: "uchrono32hy", HalfYear, T 9, N 12, S 11, false;
    CHRONO32HY = 23: "chrono32hy", HalfYear, T 9, N 11, S 11, true;
    UCHRONO32Q = 24: "uchrono32q", Quarter, T 10, N 11, S 11, false;
    CHRONO32Q = 25: "chrono32q", Quarter, T 10, N 10, S 11, true;
    UCHRONO32MO = 26: "uchrono32mo", Month, T 12, N 10, S 10, false;
    CHRONO32MO = 27: "chrono32mo", Month, T 12, N 9, S 10, true;
    UCHRONO32W = 28: "uchrono32w", Week, T 14, N 9, S 9, false;
    CHRONO32W = 29: "chrono32w", Week, T 14, N 8, S 9, true;
    UCHRONO32D = 30: "uchrono32d", Day, T 17, N 8, S 7, false;
    CHRONO32D = 31: "chrono32d", Day, T 17, N 7, S 7, true;
    UCHRONO32H = 32: "uchrono32h", Hour, T 22, N 5, S 5, false;
    CHRONO32H = 33: "chrono32h", Hour, T 22, N 4, S 5, true;
    UCHRONO32TM = 34: "uchrono32tm", TenMinute, T 24, N 4, S 4, false;
    CHRONO32TM = 35: "chrono32tm", TenMinute, T 24, N 3, S 4, true;
    UCHRONO32M = 36: "uchrono32m", Minute, T 28, N 2, S 2, false;
    CHRONO32M = 37: "chrono32m", Minute, T 28, N 1, S 2, true;
    /// Timestamp only, two-second buckets, all 32 bits.
    UCHRONO32BS = 38: "uchrono32bs", BinarySecond, T 32, N 0, S 0, false;
    /// Timestamp only, two-second buckets, 31 bits plus sign.
    CHRONO32BS = 39: "chrono32bs", BinarySecond, T 31, N 0, S 0, true;
}

impl Variant {
    /// Number of catalog entries.
    pub const COUNT: usize = 40;

    /// Looks a variant up by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Variant`] if no entry carries `name`.
    ///
    /// # Example
    /// ```
    /// use chrono_id::Variant;
    ///
    /// assert_eq!(Variant::from_name("UChrono64s").unwrap(), Variant::UCHRONO64S);
    /// assert!(Variant::from_name("chrono128s").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                FormatError::Variant {
                    input: name.to_owned(),
                }
                .into()
            })
    }

    /// Catalog name, e.g. `"chrono64s"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Time granularity of the timestamp field.
    #[must_use]
    pub const fn precision(self) -> Precision {
        self.precision
    }

    /// Width of the timestamp field (T).
    #[must_use]
    pub const fn timestamp_bits(self) -> u32 {
        self.t_bits as u32
    }

    /// Width of the node field (N).
    #[must_use]
    pub const fn node_bits(self) -> u32 {
        self.n_bits as u32
    }

    /// Width of the sequence field (S).
    #[must_use]
    pub const fn sequence_bits(self) -> u32 {
        self.s_bits as u32
    }

    /// Whether the most-significant bit is a reserved, always-zero sign bit.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// Total width of the identifier: 32 or 64.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.timestamp_bits() + self.node_bits() + self.sequence_bits() + self.signed as u32
    }

    /// Whether the variant carries neither node nor sequence bits.
    #[must_use]
    pub const fn is_zero_entropy(self) -> bool {
        self.n_bits == 0 && self.s_bits == 0
    }

    /// Position in [`Variant::ALL`].
    pub(crate) const fn ordinal(self) -> usize {
        self.ordinal as usize
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("precision", &self.precision)
            .field("t", &self.t_bits)
            .field("n", &self.n_bits)
            .field("s", &self.s_bits)
            .field("signed", &self.signed)
            .finish()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_is_complete_and_unique() {
        let names: HashSet<_> = Variant::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(names.len(), Variant::COUNT);
        for (i, v) in Variant::ALL.iter().enumerate() {
            assert_eq!(v.ordinal(), i);
        }
    }

    #[test]
    fn widths_fill_their_word() {
        for v in Variant::ALL {
            let family = if v.name().contains("64") { 64 } else { 32 };
            assert_eq!(v.width(), family, "{}", v.name());
            assert_eq!(v.is_signed(), !v.name().starts_with('u'), "{}", v.name());
        }
    }

    #[test]
    fn names_end_with_precision_symbol() {
        for v in Variant::ALL {
            assert!(v.name().ends_with(v.precision().symbol()), "{}", v.name());
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            Variant::from_name("CHRONO32BS").unwrap(),
            Variant::CHRONO32BS
        );
        assert_eq!(
            "uchrono64ms".parse::<Variant>().unwrap(),
            Variant::UCHRONO64MS
        );
        assert_eq!(
            Variant::from_name("nope").unwrap_err().to_string(),
            "Unknown variant: nope"
        );
    }

    #[test]
    fn only_binary_second_is_zero_entropy() {
        let zero: Vec<_> = Variant::ALL
            .iter()
            .filter(|v| v.is_zero_entropy())
            .collect();
        assert_eq!(zero, [&Variant::UCHRONO32BS, &Variant::CHRONO32BS]);
    }

    #[test]
    fn spot_check_layouts() {
        let v = Variant::CHRONO64S;
        assert_eq!(
            (v.timestamp_bits(), v.node_bits(), v.sequence_bits(), v.is_signed()),
            (33, 15, 15, true)
        );
        let v = Variant::UCHRONO32Y;
        assert_eq!(
            (v.timestamp_bits(), v.node_bits(), v.sequence_bits(), v.is_signed()),
            (8, 13, 11, false)
        );
    }
}
