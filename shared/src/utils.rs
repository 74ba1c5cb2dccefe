//! # Shared Utility Functions
//!
//! Display helpers shared by the dashboard library and its CLI.
//!
//! ## Amount Formatting
//!
//! - [`format_amount`] - Group the integer part with thousands separators
//! - [`format_vnd`] - Same, suffixed with the currency code used by the API
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_vnd;
//!
//! assert_eq!(format_vnd(1234567.0), "1,234,567 VND");
//! ```

/// Currency code appended by [`format_vnd`].
pub const CURRENCY: &str = "VND";

/// Format an amount rounded to whole units with `,` thousands separators.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_amount;
///
/// assert_eq!(format_amount(0.0), "0");
/// assert_eq!(format_amount(999.6), "1,000");
/// assert_eq!(format_amount(-25000.0), "-25,000");
/// ```
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an amount as `"<grouped> VND"`.
pub fn format_vnd(amount: f64) -> String {
    format!("{} {}", format_amount(amount), CURRENCY)
}
