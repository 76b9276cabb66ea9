use serde::{Deserialize, Serialize};

use crate::models::url::UrlRecord;

/// Body of `POST /api/shorturl/new`, sent as JSON or as a form.
#[derive(Deserialize, Debug, Default)]
pub struct ShortenRequest {
    // Missing field deserializes to "" and fails validation as `invalid URL`.
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize, Debug)]
pub struct ShortenResponse {
    #[serde(rename = "originalURL")]
    pub original_url: String,
    #[serde(rename = "shortURL")]
    pub short_url: i64,
}

impl From<&UrlRecord> for ShortenResponse {
    fn from(record: &UrlRecord) -> Self {
        Self {
            original_url: record.url.clone(),
            short_url: record.alias,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UrlListEntry {
    pub url: String,
    #[serde(rename = "shortUrl")]
    pub short_url: i64,
}

impl From<UrlRecord> for UrlListEntry {
    fn from(record: UrlRecord) -> Self {
        Self {
            url: record.url,
            short_url: record.alias,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
