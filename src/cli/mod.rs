pub mod convert;
pub mod currencies;
pub mod demo;
pub mod ui;
