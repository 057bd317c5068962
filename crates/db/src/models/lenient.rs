//! Loosely typed text fields.
//!
//! Clients of this API routinely send `"age": 26` or `"release_date": 2018`
//! for columns that are stored as text. These helpers accept a JSON string
//! or number and normalize it to its text form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

/// Deserialize an optional string-or-number into `Option<String>`.
///
/// Use with `#[serde(default, deserialize_with = "lenient::text")]` so a
/// missing key also yields `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Unsigned(n) => n.to_string(),
        TextOrNumber::Float(f) => f.to_string(),
    }))
}
