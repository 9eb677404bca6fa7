use core::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};

use super::Persona;
use crate::{id::Variant, rand::RandSource};

/// Wall-clock age, in seconds, after which a persona is redrawn whatever the
/// traffic.
pub const ROTATION_INTERVAL_SECS: i64 = 60;

/// Why a persona was redrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// The sequence wrapped inside one bucket.
    Overflow,
    /// The bucket moved backwards.
    Rollback,
    /// The persona outlived [`ROTATION_INTERVAL_SECS`].
    Periodic,
}

impl Rotation {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Overflow => "overflow",
            Self::Rollback => "rollback",
            Self::Periodic => "periodic",
        }
    }
}

/// Persona plus the last bucket and sequence issued from it.
///
/// Shared by [`Generator`] and the per-thread ambient store.
///
/// [`Generator`]: super::Generator
#[derive(Clone, Debug)]
pub(crate) struct GeneratorState {
    pub(crate) persona: Persona,
    /// `-1` until the first identifier, so the first bucket always starts
    /// fresh at sequence zero.
    pub(crate) last_ts: i64,
    pub(crate) sequence: u64,
}

impl GeneratorState {
    pub(crate) const fn new(persona: Persona) -> Self {
        Self {
            persona,
            last_ts: -1,
            sequence: 0,
        }
    }

    /// Moves the state machine to bucket `ts` and returns the sequence value
    /// to assemble with.
    ///
    /// `now` is the wall-clock reading used for periodic rotation; it is
    /// independent of the bucket being generated.
    pub(crate) fn advance<R>(
        &mut self,
        variant: Variant,
        ts: i64,
        now: DateTime<Utc>,
        rng: &R,
    ) -> u64
    where
        R: RandSource<u128>,
    {
        let mask = variant.sequence_mask();
        match ts.cmp(&self.last_ts) {
            Ordering::Greater => {
                self.last_ts = ts;
                self.sequence = 0;
            }
            Ordering::Equal => {
                self.sequence = self.sequence.wrapping_add(1) & mask;
                if self.sequence == 0 {
                    self.rotate(variant, Rotation::Overflow, now, rng);
                }
            }
            Ordering::Less => self.cold_rollback(variant, now, rng),
        }

        if now - self.persona.last_rotate() > TimeDelta::seconds(ROTATION_INTERVAL_SECS) {
            self.rotate(variant, Rotation::Periodic, now, rng);
        }
        self.sequence
    }

    /// The bucket went backwards: redraw the persona so reused coordinates
    /// land on a different node, then keep counting. `last_ts` is left alone.
    #[cold]
    #[inline(never)]
    fn cold_rollback<R>(&mut self, variant: Variant, now: DateTime<Utc>, rng: &R)
    where
        R: RandSource<u128>,
    {
        self.rotate(variant, Rotation::Rollback, now, rng);
        self.sequence = self.sequence.wrapping_add(1) & variant.sequence_mask();
    }

    fn rotate<R>(&mut self, variant: Variant, cause: Rotation, now: DateTime<Utc>, rng: &R)
    where
        R: RandSource<u128>,
    {
        self.persona.rotate_with(rng, variant.sequence_bits(), now);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            variant = variant.name(),
            cause = cause.as_str(),
            last_ts = self.last_ts,
            "rotated persona"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = cause;
    }
}
