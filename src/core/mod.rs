//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::RateConverter;
pub use error::RateError;
pub use rates::{RateSnapshot, RateSource};
