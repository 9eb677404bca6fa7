//! Compact 32- and 64-bit time-sortable identifiers.
//!
//! Each identifier packs a timestamp at one of fifteen precisions (year down
//! to microsecond, counted from 2020-01-01T00:00:00Z) with a node field and a
//! sequence field. Node and sequence are spread over their full width by
//! Weyl-Golden mixing, so uncoordinated producers rarely collide and the
//! output is bit-identical to every other implementation of the format.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use chrono_id::{Generator, Variant};
//!
//! // Deterministic assembly.
//! let dt = Utc.with_ymd_and_hms(2023, 5, 20, 10, 30, 0).unwrap();
//! let id = Variant::UCHRONO64S.from_parts(dt, 0, 0, 0, 0).unwrap();
//! assert_eq!(id.to_string(), "032E-6014-0000-0000");
//! assert_eq!(id.to_iso_string(), "2023-05-20T10:30:00Z");
//!
//! // Stateful generation.
//! let mut generator = Generator::new(Variant::CHRONO64MS);
//! let a = generator.generate().unwrap();
//! let b = generator.generate().unwrap();
//! assert_ne!(a, b);
//! ```
//!
//! ## Features
//! - `thread-local` (default): ambient per-thread generation via
//!   [`Variant::generate`]
//! - `serde`: `Serialize`/`Deserialize` for [`Variant`], [`Precision`] and
//!   [`ChronoId`]
//! - `tracing`: spans on generation and events on persona rotation
//!
//! [`Precision`]: time::Precision

mod error;
pub mod generator;
pub mod id;
pub mod rand;
#[cfg(feature = "serde")]
mod serde;
pub mod time;
pub mod weyl;

pub use crate::error::*;
pub use crate::generator::{Generator, Persona};
pub use crate::id::{ChronoId, Variant};
