//! `serde` support.
//!
//! - [`Variant`] serializes as its catalog name (`"chrono64s"`).
//! - [`Precision`] serializes as its symbol (`"ms"`).
//! - [`ChronoId`] serializes as `{ "variant": "<name>", "id": "<display form>" }`
//!   so the value round-trips without out-of-band knowledge of its layout.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeStruct};

use crate::{ChronoId, Variant, time::Precision};

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        Self::from_name(&name).map_err(de::Error::custom)
    }
}

impl Serialize for Precision {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(d)?;
        symbol.parse().map_err(de::Error::custom)
    }
}

impl Serialize for ChronoId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("ChronoId", 2)?;
        st.serialize_field("variant", &self.variant())?;
        st.serialize_field("id", &self.formatted())?;
        st.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "ChronoId", deny_unknown_fields)]
struct Repr {
    variant: Variant,
    id: String,
}

impl<'de> Deserialize<'de> for ChronoId {
    /// # Errors
    ///
    /// Fails if the variant is unknown, the id is not valid hex for that
    /// variant, or the id sets the reserved sign bit.
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let Repr { variant, id } = Repr::deserialize(d)?;
        let parsed = variant.parse(id.as_str()).map_err(de::Error::custom)?;
        if !parsed.is_valid() {
            return Err(de::Error::custom(format_args!(
                "{} sets reserved bits for {variant}",
                parsed.formatted()
            )));
        }
        Ok(parsed)
    }
}
