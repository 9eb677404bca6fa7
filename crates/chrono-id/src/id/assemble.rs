use chrono::{DateTime, Utc};

use super::{ChronoId, Variant};
use crate::{
    Error, FormatError, Result,
    generator::Persona,
    time::{EPOCH_UNIX_SECS, IntoUtc},
    weyl::{self, INDEX_MASK, MixParams},
};

impl Variant {
    /// Assembles an identifier from an instant, a node id, a sequence value
    /// and explicit mixing parameters.
    ///
    /// Node and sequence are masked to their field widths; the timestamp is
    /// masked to T bits, so instants past the variant's horizon wrap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z.
    pub fn assemble(
        self,
        instant: impl IntoUtc,
        node_id: u64,
        seq: u64,
        params: &MixParams,
    ) -> Result<ChronoId> {
        let units = self.units_at(&instant.into_utc())?;
        Ok(self.assemble_units(units, node_id, seq, params))
    }

    /// Assembles an identifier using one multiplier index (`p_idx`, taken
    /// modulo 128) and one salt for both the node and sequence fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use chrono_id::Variant;
    ///
    /// let dt = Utc.with_ymd_and_hms(2023, 5, 20, 10, 30, 0).unwrap();
    /// let id = Variant::UCHRONO64S.from_parts(dt, 5, 7, 3, 0xAB).unwrap();
    /// assert_eq!(id.to_string(), "032E-6014-2681-0386");
    /// ```
    pub fn from_parts(
        self,
        instant: impl IntoUtc,
        node_id: u64,
        seq: u64,
        p_idx: u8,
        salt: u64,
    ) -> Result<ChronoId> {
        self.assemble(instant, node_id, seq, &MixParams::shared(p_idx, salt))
    }

    /// Assembles an identifier with the mixing parameters of `persona`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z.
    pub fn from_persona(
        self,
        instant: impl IntoUtc,
        node_id: u64,
        seq: u64,
        persona: &Persona,
    ) -> Result<ChronoId> {
        self.assemble(instant, node_id, seq, &persona.mix_params())
    }

    /// Wraps a raw integer as an identifier of this variant.
    #[must_use]
    pub const fn from_raw(self, raw: u64) -> ChronoId {
        ChronoId::from_raw(raw, self)
    }

    /// Parses the hex display form. Dashes and spaces are ignored, so both
    /// `032E-6014` and `032E6014` are accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::NullInput`] if `input` is `None`.
    /// - [`FormatError::Hex`] if the text is not hexadecimal or the value is
    ///   wider than the variant.
    pub fn parse<'a>(self, input: impl Into<Option<&'a str>>) -> Result<ChronoId> {
        let input = input.into().ok_or(Error::NullInput { what: "string" })?;
        let invalid = || FormatError::Hex {
            variant: self.name(),
            input: input.to_owned(),
        };

        let clean: String = input
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .collect();
        let raw = u64::from_str_radix(&clean, 16).map_err(|_| invalid())?;
        if self.width() < u64::BITS && raw >> self.width() != 0 {
            return Err(invalid().into());
        }
        Ok(ChronoId::from_raw(raw, self))
    }

    /// Whole precision units since the reference instant.
    pub(crate) fn units_at(self, dt: &DateTime<Utc>) -> Result<i64> {
        if dt.timestamp() < EPOCH_UNIX_SECS {
            return Err(Error::TimestampUnderflow);
        }
        Ok(self.precision().forward(dt))
    }

    /// Packs already-validated fields. `units` must be non-negative.
    #[inline]
    pub(crate) fn assemble_units(
        self,
        units: i64,
        node_id: u64,
        seq: u64,
        params: &MixParams,
    ) -> ChronoId {
        debug_assert!(units >= 0, "timestamp underflow slipped through");
        let l = self.layout();
        let ts = units as u64 & l.t_mask;

        if self.is_zero_entropy() {
            return ChronoId::from_raw(ts, self);
        }

        let node = weyl::mix(
            node_id,
            l.n_mask,
            l.n_mult[usize::from(params.node_idx & INDEX_MASK)],
            params.node_salt,
        );
        let seq = weyl::mix(
            seq.wrapping_add(params.seq_offset) & l.s_mask,
            l.s_mask,
            l.s_mult[usize::from(params.seq_idx & INDEX_MASK)],
            params.seq_salt,
        );
        ChronoId::from_raw((ts << l.t_shift) | (node << l.s_shift) | seq, self)
    }
}
