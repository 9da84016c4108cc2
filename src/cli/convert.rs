use crate::cli::ui::{StyleType, format_amount, style_text};
use crate::core::convert::RateConverter;
use crate::core::rates::RateSource;
use anyhow::Result;

/// Runs a single conversion and prints the result.
pub async fn run<S: RateSource>(
    converter: &RateConverter<S>,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<()> {
    let result = converter.convert(amount, from, to).await?;
    println!(
        "{} {} = {} {}",
        amount,
        from,
        style_text(&format_amount(result), StyleType::Value),
        to
    );
    Ok(())
}
