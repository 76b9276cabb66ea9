use std::sync::Arc;

use crate::error::StoreError;
use crate::models::url::UrlRecord;
use crate::repository::UrlStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(UrlRecord),
    NotFound,
}

/// Maps an alias taken from a request path back to its record.
#[derive(Clone)]
pub struct RedirectResolver {
    store: Arc<dyn UrlStore>,
}

impl RedirectResolver {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// Anything that does not read as a whole number cannot be an alias and
    /// resolves to [`Resolution::NotFound`] without a lookup.
    pub async fn resolve(&self, raw_alias: &str) -> Result<Resolution, StoreError> {
        let Some(alias) = parse_alias(raw_alias) else {
            return Ok(Resolution::NotFound);
        };

        Ok(match self.store.find_by_alias(alias).await? {
            Some(record) => Resolution::Found(record),
            None => Resolution::NotFound,
        })
    }
}

/// Reads a path segment the way a numeric cast would: surrounding whitespace
/// is ignored and integral decimals (`1.0`, `1e2`) are accepted.
fn parse_alias(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(alias) = raw.parse::<i64>() {
        return Some(alias);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
