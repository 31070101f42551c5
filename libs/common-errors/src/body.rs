use std::fmt;

use case_fold::equal_fold;
use serde::{
    Deserializer,
    de::{DeserializeOwned, Error as _, IgnoredAny, MapAccess, Visitor},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid JSON: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decodes the first JSON value in `raw`.
///
/// Anything after that value is left unread, matching a streaming decoder
/// that stops once it has a complete value. An empty body is an error.
pub fn decode_json<T>(raw: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    let mut values = serde_json::Deserializer::from_slice(raw).into_iter::<T>();
    match values.next() {
        Some(value) => Ok(value?),
        None => Err(DecodeError(serde_json::Error::custom("empty request body"))),
    }
}

/// Reads a single string field out of a JSON object, leniently.
///
/// Keys match `field` under simple case folding and the last match wins. A
/// `null` value leaves the field as it was. A `null` document or a missing
/// key gives an empty string. Other keys are skipped.
pub fn deserialize_string_field<'de, D>(
    deserializer: D, field: &'static str,
) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(StringFieldVisitor { field })
}

struct StringFieldVisitor {
    field: &'static str,
}

impl<'de> Visitor<'de> for StringFieldVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "an object with a `{}` string", self.field)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(String::new())
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(String::new())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut value = String::new();
        while let Some(key) = map.next_key::<String>()? {
            if !equal_fold(&key, self.field) {
                map.next_value::<IgnoredAny>()?;
                continue;
            }
            if let Some(found) = map.next_value::<Option<String>>()? {
                value = found;
            }
        }
        Ok(value)
    }
}
