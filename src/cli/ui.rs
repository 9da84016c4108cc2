use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Formats a converted amount. Whole numbers keep a trailing decimal
/// (`85.0`, not `85`); fractions render with their shortest exact form.
pub fn format_amount(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(85.0), "85.0");
        assert_eq!(format_amount(72.99), "72.99");
        assert_eq!(format_amount(850_000.0), "850000.0");
        assert_eq!(format_amount(0.0), "0.0");
    }
}
