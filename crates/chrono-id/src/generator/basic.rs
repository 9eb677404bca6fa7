#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{GeneratorState, Persona};
use crate::{
    Result,
    id::{ChronoId, Variant},
    rand::{RandSource, ThreadRandom},
    time::{IntoUtc, TimeSource, WallClock},
};

/// A stateful, single-owner identifier generator for one [`Variant`].
///
/// Within one bucket each call bumps the sequence; a new bucket resets it to
/// zero. The persona is redrawn when the sequence wraps, when the bucket moves
/// backwards (clock rollback or an older explicit instant), and once its
/// wall-clock age exceeds [`ROTATION_INTERVAL_SECS`].
///
/// ## Features
/// - ✅ Strictly increasing sequence within a bucket
/// - ✅ Rollback resilient (persona rotation)
/// - ❌ Not thread-safe (`&mut self`); wrap it in your own lock to share it
///
/// ## Recommended When
/// - One task or thread produces many identifiers of one variant
/// - You want to inject a clock or random source in tests
///
/// ## See Also
/// - [`Variant::generate`] for ambient per-thread generation
///
/// [`ROTATION_INTERVAL_SECS`]: super::ROTATION_INTERVAL_SECS
#[derive(Clone, Debug)]
pub struct Generator<C = WallClock, R = ThreadRandom>
where
    C: TimeSource,
    R: RandSource<u128>,
{
    variant: Variant,
    state: GeneratorState,
    clock: C,
    rng: R,
}

impl Generator {
    /// Creates a generator with a freshly drawn persona, the system clock and
    /// the thread-local secure RNG.
    ///
    /// # Example
    /// ```
    /// use chrono_id::{Generator, Variant};
    ///
    /// let mut generator = Generator::new(Variant::CHRONO64MS);
    /// let a = generator.generate().unwrap();
    /// let b = generator.generate().unwrap();
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::with_persona(variant, Persona::new(variant.sequence_bits()))
    }

    /// Creates a generator that starts from a caller-supplied persona.
    #[must_use]
    pub fn with_persona(variant: Variant, persona: Persona) -> Self {
        Self::from_components(variant, persona, WallClock, ThreadRandom)
    }
}

impl<C, R> Generator<C, R>
where
    C: TimeSource,
    R: RandSource<u128>,
{
    /// Creates a generator from explicit parts.
    ///
    /// # Parameters
    /// - `variant`: the identifier layout to produce
    /// - `persona`: the starting persona
    /// - `clock`: supplies the default instant and drives periodic rotation
    /// - `rng`: supplies the 128-bit pool for every rotation
    pub const fn from_components(variant: Variant, persona: Persona, clock: C, rng: R) -> Self {
        Self {
            variant,
            state: GeneratorState::new(persona),
            clock,
            rng,
        }
    }

    /// Generates an identifier for the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if the clock reads before
    /// 2020-01-01T00:00:00Z.
    ///
    /// [`Error::TimestampUnderflow`]: crate::Error::TimestampUnderflow
    pub fn generate(&mut self) -> Result<ChronoId> {
        let now = self.clock.now();
        self.generate_at(now)
    }

    /// Generates an identifier for an explicit instant.
    ///
    /// The instant selects the bucket; periodic rotation still follows the
    /// generator's clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z. The generator state is left untouched.
    ///
    /// [`Error::TimestampUnderflow`]: crate::Error::TimestampUnderflow
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, instant), fields(variant = self.variant.name()))
    )]
    pub fn generate_at(&mut self, instant: impl IntoUtc) -> Result<ChronoId> {
        let units = self.variant.units_at(&instant.into_utc())?;
        let now = self.clock.now();
        let seq = self.state.advance(self.variant, units, now, &self.rng);
        let persona = &self.state.persona;
        Ok(self
            .variant
            .assemble_units(units, persona.node_id(), seq, &persona.mix_params()))
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// The persona currently in use.
    #[must_use]
    pub const fn persona(&self) -> &Persona {
        &self.state.persona
    }

    /// The last bucket issued, or `None` before the first identifier.
    #[must_use]
    pub const fn last_timestamp(&self) -> Option<i64> {
        if self.state.last_ts < 0 {
            None
        } else {
            Some(self.state.last_ts)
        }
    }

    /// The sequence value of the last identifier, before offset and mixing.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.state.sequence
    }
}
