//! Ambient, per-thread identifier generation.
//!
//! Every thread lazily owns one [`Persona`] plus bucket/sequence state per
//! variant. Nothing is shared across threads and nothing locks; the state is
//! dropped with the thread.
//!
//! # Example
//! ```rust
//! use chrono_id::Variant;
//!
//! let a = Variant::CHRONO64S.generate().unwrap();
//! let b = Variant::CHRONO64S.generate().unwrap();
//! assert_ne!(a, b);
//! ```

use core::cell::RefCell;

use chrono::{DateTime, Utc};
#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{GeneratorState, Persona};
use crate::{
    Result,
    id::{ChronoId, Variant},
    rand::ThreadRandom,
    time::{IntoUtc, TimeSource, WallClock, parse_iso},
};

thread_local! {
    /// Per-thread state, indexed by variant ordinal.
    static AMBIENT: RefCell<[Option<GeneratorState>; Variant::COUNT]> =
        const { RefCell::new([const { None }; Variant::COUNT]) };
}

/// Runs one ambient step for `variant` at `dt` and assembles the result.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(variant, dt), fields(variant = variant.name()))
)]
fn ambient(
    variant: Variant,
    dt: DateTime<Utc>,
    node_id: Option<u64>,
    seq: Option<u64>,
) -> Result<ChronoId> {
    let units = variant.units_at(&dt)?;
    let now = WallClock.now();
    AMBIENT.with_borrow_mut(|states| {
        let state = states[variant.ordinal()].get_or_insert_with(|| {
            GeneratorState::new(Persona::from_rng(
                &ThreadRandom,
                variant.sequence_bits(),
                now,
            ))
        });
        let next = state.advance(variant, units, now, &ThreadRandom);
        let persona = &state.persona;
        Ok(variant.assemble_units(
            units,
            node_id.unwrap_or(persona.node_id()),
            seq.unwrap_or(next),
            &persona.mix_params(),
        ))
    })
}

impl Variant {
    /// Generates an identifier for the current instant from this thread's
    /// ambient state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if the system clock reads before
    /// 2020-01-01T00:00:00Z.
    ///
    /// [`Error::TimestampUnderflow`]: crate::Error::TimestampUnderflow
    pub fn generate(self) -> Result<ChronoId> {
        ambient(self, WallClock.now(), None, None)
    }

    /// Generates an identifier for an explicit instant from this thread's
    /// ambient state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z; the ambient state is left untouched.
    pub fn generate_at(self, instant: impl IntoUtc) -> Result<ChronoId> {
        ambient(self, instant.into_utc(), None, None)
    }

    /// Like [`Variant::generate_at`], but assembles with an explicit node id
    /// and/or sequence value in place of the state-derived ones. The ambient
    /// state still advances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z.
    pub fn generate_with(
        self,
        instant: impl IntoUtc,
        node_id: Option<u64>,
        seq: Option<u64>,
    ) -> Result<ChronoId> {
        ambient(self, instant.into_utc(), node_id, seq)
    }

    /// Generates ambiently with node and sequence carved out of one random
    /// value: node is `(random >> S) & N_mask`, sequence is `random & S_mask`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z.
    pub fn from_time_with_entropy(self, instant: impl IntoUtc, random: u64) -> Result<ChronoId> {
        let node = random
            .checked_shr(self.sequence_bits())
            .unwrap_or(0)
            & self.node_mask();
        let seq = random & self.sequence_mask();
        self.generate_with(instant, Some(node), Some(seq))
    }

    /// Parses ISO-8601 text and generates ambiently at that instant.
    ///
    /// # Errors
    ///
    /// - [`Error::NullInput`] if `input` is `None`.
    /// - [`FormatError::Iso`] if the text is not ISO-8601.
    /// - [`Error::TimestampUnderflow`] if the instant is before
    ///   2020-01-01T00:00:00Z.
    ///
    /// [`Error::NullInput`]: crate::Error::NullInput
    /// [`FormatError::Iso`]: crate::FormatError::Iso
    /// [`Error::TimestampUnderflow`]: crate::Error::TimestampUnderflow
    ///
    /// # Example
    /// ```
    /// use chrono_id::Variant;
    ///
    /// let id = Variant::CHRONO64MS.from_iso_string("2023-05-20T10:30:00.123Z").unwrap();
    /// assert_eq!(id.to_iso_string(), "2023-05-20T10:30:00.123Z");
    /// ```
    pub fn from_iso_string<'a>(self, input: impl Into<Option<&'a str>>) -> Result<ChronoId> {
        self.generate_at(parse_iso(input)?)
    }
}
