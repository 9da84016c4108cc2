use thiserror::Error;

/// Failures surfaced by rate fetching and conversion.
///
/// `Network` and `Parse` are propagated to the caller without retry;
/// `UnsupportedCurrency` lets callers distinguish a bad currency code from a
/// provider outage.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("network error for base currency {base}: {reason}")]
    Network { base: String, reason: String },

    #[error("failed to parse rates response for {base}: {reason}")]
    Parse { base: String, reason: String },

    #[error("currency {0} not supported")]
    UnsupportedCurrency(String),
}
