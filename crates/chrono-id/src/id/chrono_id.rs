use core::cmp::Ordering;
use core::fmt;

use chrono::{DateTime, Utc};

use super::Variant;
use crate::time::format_iso;

/// A time-sortable identifier: the raw 32- or 64-bit payload together with
/// the [`Variant`] that gives it meaning.
///
/// 32-bit variants keep their value in the low half of the `u64`. Ordering
/// follows the raw payload, so identifiers of one variant sort by time first,
/// then node, then sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChronoId {
    raw: u64,
    variant: Variant,
}

impl ChronoId {
    /// Wraps a raw value without checking it against the variant's width.
    ///
    /// Use [`ChronoId::is_valid`] or [`ChronoId::into_valid`] on untrusted
    /// input, or parse it with [`Variant::parse`].
    #[must_use]
    pub const fn from_raw(raw: u64, variant: Variant) -> Self {
        Self { raw, variant }
    }

    /// The raw integer value.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.raw
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Raw timestamp field: whole precision units since 2020-01-01T00:00:00Z.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        let l = self.variant.layout();
        (self.raw >> l.t_shift) & l.t_mask
    }

    /// The mixed node field.
    #[must_use]
    pub fn node(&self) -> u64 {
        let l = self.variant.layout();
        (self.raw >> l.s_shift) & l.n_mask
    }

    /// The mixed sequence field.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.raw & self.variant.layout().s_mask
    }

    /// Decodes the embedded timestamp to the instant that starts its unit.
    ///
    /// Only the timestamp field is read; bits outside the layout, including a
    /// set sign bit on a signed variant, are ignored. Check
    /// [`ChronoId::is_valid`] first when the value comes from outside.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use chrono_id::Variant;
    ///
    /// let dt = Utc.with_ymd_and_hms(2023, 1, 1, 12, 30, 45).unwrap();
    /// let id = Variant::CHRONO64M.from_parts(dt, 1, 2, 0, 0).unwrap();
    /// assert_eq!(id.decode(), Utc.with_ymd_and_hms(2023, 1, 1, 12, 30, 0).unwrap());
    /// ```
    #[must_use]
    pub fn decode(&self) -> DateTime<Utc> {
        // At most 53 bits, which no precision can push outside chrono's range.
        let units = self.timestamp() as i64;
        self.variant
            .precision()
            .inverse(units)
            .expect("timestamp field always decodes to a representable instant")
    }

    /// The decoded instant as ISO-8601 text, e.g. `2023-05-20T10:30:00Z`.
    ///
    /// Millisecond and microsecond variants carry `.mmm` / `.mmmmmm`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        format_iso(&self.decode(), self.variant.precision())
    }

    /// Uppercase hex in four-digit groups: `XXXX-XXXX` for 32-bit variants,
    /// `XXXX-XXXX-XXXX-XXXX` for 64-bit ones.
    #[must_use]
    pub fn formatted(&self) -> String {
        let digits = if self.variant.width() > 32 { 16 } else { 8 };
        let hex = format!("{:0digits$X}", self.raw);
        let mut out = String::with_capacity(hex.len() + hex.len() / 4);
        for (i, c) in hex.chars().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push('-');
            }
            out.push(c);
        }
        out
    }

    /// Returns `true` if no bit outside the variant's fields is set. For
    /// signed variants this includes the always-zero sign bit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.raw & !self.variant.layout().valid_mask == 0
    }

    /// Clears every bit outside the variant's fields.
    #[must_use]
    pub fn into_valid(self) -> Self {
        Self {
            raw: self.raw & self.variant.layout().valid_mask,
            ..self
        }
    }
}

impl PartialOrd for ChronoId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChronoId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw
            .cmp(&other.raw)
            .then_with(|| self.variant.ordinal().cmp(&other.variant.ordinal()))
    }
}

impl From<ChronoId> for u64 {
    fn from(id: ChronoId) -> Self {
        id.raw
    }
}

impl fmt::Display for ChronoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl fmt::Debug for ChronoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.variant.name(), self.formatted())
    }
}
