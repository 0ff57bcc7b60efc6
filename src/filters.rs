//! Money formatting for the summary card and transaction list.
//!
//! Format: optional minus sign, then `$`, then the absolute value with two
//! decimals. Negative values render red, everything else green.

/// Format an amount as `$12.34` / `-$12.34`.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, value.abs())
}

/// Tailwind colour class for an amount.
pub fn money_class(value: f64) -> &'static str {
    if value < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    }
}

/// Format an amount wrapped in a coloured span.
pub fn format_money_html(value: f64) -> String {
    format!(
        r#"<span class="font-bold {}">{}</span>"#,
        money_class(value),
        format_money(value)
    )
}
