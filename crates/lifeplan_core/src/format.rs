//! Currency formatting for presentation
//!
//! A convenience for presenters, not part of the core contract.

/// Format a currency value without cents: `$1,234,567`, sign before the
/// dollar sign for negatives
pub fn format_money(value: f64) -> String {
    let abs_value = value.abs();
    let dollars = abs_value.round() as i64;

    // Add thousands separators
    let dollars_str = dollars.to_string();
    let mut result = String::new();
    for (i, c) in dollars_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let dollars_formatted: String = result.chars().rev().collect();

    if value >= 0.0 {
        format!("${}", dollars_formatted)
    } else {
        format!("-${}", dollars_formatted)
    }
}
