use serde::{Deserialize, Serialize};

/// Name of the sequence that hands out URL aliases.
pub const ALIAS_SEQUENCE: &str = "shortUrl";

/// A named monotonically increasing sequence kept in the `counters` collection.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub seq: i64,
}
