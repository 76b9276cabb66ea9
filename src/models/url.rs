use mongodb::bson::oid::ObjectId;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A stored mapping from an original URL to its numeric alias.
///
/// Field names match the `shorturls` documents written by earlier
/// deployments, so `alias` is persisted as `shortUrl`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UrlRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub url: String,
    #[serde(rename = "shortUrl", deserialize_with = "alias_from_number")]
    pub alias: i64,
}

impl UrlRecord {
    pub fn new(url: impl Into<String>, alias: i64) -> Self {
        Self {
            id: None,
            url: url.into(),
            alias,
        }
    }
}

/// Older documents store the alias as a double (`1.0`), newer ones as an int64.
fn alias_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(value) => Ok(value),
        Number::Float(value) if value.fract() == 0.0 && value.is_finite() => Ok(value as i64),
        Number::Float(value) => Err(D::Error::custom(format!(
            "shortUrl {} is not an integer",
            value
        ))),
    }
}
