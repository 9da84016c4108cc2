use crate::cli::ui::{StyleType, style_text};
use crate::core::convert::RateConverter;
use crate::core::rates::RateSource;
use anyhow::Result;

/// Prints the currency codes supported by the provider. Best effort: an
/// unreachable provider produces an empty listing, not a failure.
pub async fn run<S: RateSource>(converter: &RateConverter<S>) -> Result<()> {
    let mut currencies = converter.supported_currencies().await;
    currencies.sort();

    println!("{}", style_text("Supported currencies", StyleType::Title));
    if currencies.is_empty() {
        println!(
            "{}",
            style_text("No currencies available", StyleType::Subtle)
        );
    } else {
        println!("{}", currencies.join(", "));
    }
    Ok(())
}
