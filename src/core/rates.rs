//! Exchange rate snapshot model and the provider seam.

use crate::core::error::RateError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// A provider's rate table for one base currency at one point in time.
///
/// One unit of `base` equals `rates[code]` units of the target currency.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RateSnapshot {
    pub base: String,
    pub date: String,
    pub rates: HashMap<String, f64>,
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, RateError>;
}
