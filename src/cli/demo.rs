use crate::cli::ui::{StyleType, format_amount, style_text};
use crate::core::convert::RateConverter;
use crate::core::rates::RateSource;
use anyhow::Result;

const SAMPLE_CONVERSIONS: [(f64, &str, &str); 3] = [
    (100.0, "USD", "EUR"),
    (50.0, "GBP", "JPY"),
    (1000.0, "EUR", "USD"),
];

/// Runs the sample conversions and a short currency listing.
///
/// Per-item failures are printed and skipped; the run itself always
/// succeeds.
pub async fn run<S: RateSource>(converter: &RateConverter<S>) -> Result<()> {
    println!("{}", style_text("Currency Converter", StyleType::Title));
    println!("{}", "=".repeat(40));

    for (amount, from, to) in SAMPLE_CONVERSIONS {
        match converter.convert(amount, from, to).await {
            Ok(result) => println!("{amount} {from} = {} {to}", format_amount(result)),
            Err(e) => println!(
                "{}",
                style_text(
                    &format!("Error converting {from} to {to}: {e}"),
                    StyleType::Error
                )
            ),
        }
    }

    println!("\nSupported currencies:");
    let currencies = converter.supported_currencies().await;
    let shown = currencies.iter().take(10).cloned().collect::<Vec<_>>();
    println!("{}...", shown.join(", "));

    Ok(())
}
