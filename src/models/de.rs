//! Lenient field decoders for Livestatus columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

/// Livestatus reports booleans as `0`/`1`; accept either form.
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(|raw| match raw {
        RawFlag::Bool(b) => b,
        RawFlag::Int(i) => i != 0,
        RawFlag::Float(f) => f != 0.0,
    }))
}

/// Unix seconds to UTC. `0` means "never" and decodes to `None`.
pub(crate) fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let seconds = Option::<f64>::deserialize(deserializer)?;
    Ok(seconds
        .filter(|s| *s > 0.0)
        .and_then(|s| DateTime::from_timestamp(s as i64, 0)))
}
