use chrono::{DateTime, Utc};

use crate::{
    Result,
    id::{ChronoId, Variant},
    rand::{RandSource, ThreadRandom},
    time::IntoUtc,
    weyl::{INDEX_MASK, MixParams},
};

/// The randomized identity of one producer: a node id plus the salts,
/// multiplier indices and sequence offset used to mix it.
///
/// A persona is drawn from a single 128-bit pool of secure randomness:
///
/// ```text
///  bits    0..16   node_id
///  bits   16..32   node_salt
///  bits   32..39   node_idx
///  bits   39..55   seq_salt
///  bits   55..62   seq_idx
///  bits   62..     seq_offset (masked to the sequence width)
/// ```
///
/// Each persona is owned by exactly one generator (or one thread's ambient
/// state) and is replaced wholesale on rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Persona {
    node_id: u64,
    params: MixParams,
    last_rotate: DateTime<Utc>,
}

const fn offset_mask(s_bits: u32) -> u128 {
    match s_bits {
        0 => 0,
        64.. => u64::MAX as u128,
        _ => (1 << s_bits) - 1,
    }
}

impl Persona {
    /// Draws a fresh persona from [`ThreadRandom`], stamped with the current
    /// time.
    #[must_use]
    pub fn new(s_bits: u32) -> Self {
        Self::from_rng(&ThreadRandom, s_bits, Utc::now())
    }

    /// Draws a persona from a custom random source.
    pub fn from_rng<R>(rng: &R, s_bits: u32, now: DateTime<Utc>) -> Self
    where
        R: RandSource<u128>,
    {
        Self::from_entropy(rng.rand(), s_bits, now)
    }

    /// Slices a persona out of a 128-bit entropy pool.
    ///
    /// # Example
    /// ```
    /// use chrono::Utc;
    /// use chrono_id::generator::Persona;
    ///
    /// let p = Persona::from_entropy(0xBEEF | (0x1234 << 16), 15, Utc::now());
    /// assert_eq!(p.node_id(), 0xBEEF);
    /// assert_eq!(p.mix_params().node_salt, 0x1234);
    /// ```
    #[must_use]
    pub fn from_entropy(pool: u128, s_bits: u32, now: DateTime<Utc>) -> Self {
        let field = |shift: u32, mask: u128| ((pool >> shift) & mask) as u64;
        Self {
            node_id: field(0, 0xFFFF),
            params: MixParams {
                node_salt: field(16, 0xFFFF),
                node_idx: field(32, 0x7F) as u8,
                seq_salt: field(39, 0xFFFF),
                seq_idx: field(55, 0x7F) as u8,
                seq_offset: field(62, offset_mask(s_bits)),
            },
            last_rotate: now,
        }
    }

    /// Builds a persona from explicit values, for replaying a known identity.
    ///
    /// Multiplier indices are taken modulo 128.
    #[must_use]
    pub const fn from_params(node_id: u64, params: MixParams, last_rotate: DateTime<Utc>) -> Self {
        Self {
            node_id,
            params: MixParams {
                node_idx: params.node_idx & INDEX_MASK,
                seq_idx: params.seq_idx & INDEX_MASK,
                ..params
            },
            last_rotate,
        }
    }

    /// Replaces every parameter with fresh randomness from [`ThreadRandom`].
    pub fn rotate(&mut self, s_bits: u32) {
        self.rotate_with(&ThreadRandom, s_bits, Utc::now());
    }

    /// Replaces every parameter with fresh randomness from `rng`.
    pub fn rotate_with<R>(&mut self, rng: &R, s_bits: u32, now: DateTime<Utc>)
    where
        R: RandSource<u128>,
    {
        *self = Self::from_rng(rng, s_bits, now);
    }

    #[must_use]
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    /// Salts, multiplier indices and sequence offset.
    #[must_use]
    pub const fn mix_params(&self) -> MixParams {
        self.params
    }

    /// When the persona was last drawn.
    #[must_use]
    pub const fn last_rotate(&self) -> DateTime<Utc> {
        self.last_rotate
    }
}

impl Variant {
    /// Generates an identifier from an explicit persona without touching any
    /// thread state.
    ///
    /// The node defaults to the persona's node id; the sequence defaults to
    /// fresh random bits of the sequence width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampUnderflow`] if `instant` is before
    /// 2020-01-01T00:00:00Z.
    ///
    /// [`Error::TimestampUnderflow`]: crate::Error::TimestampUnderflow
    pub fn generate_with_persona(
        self,
        instant: impl IntoUtc,
        persona: &Persona,
        node_id: Option<u64>,
        seq: Option<u64>,
    ) -> Result<ChronoId> {
        let node_id = node_id.unwrap_or(persona.node_id());
        let seq = seq.unwrap_or_else(|| ThreadRandom.bits(self.sequence_bits()));
        self.from_persona(instant, node_id, seq, persona)
    }
}
