use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, StatsError};

/// Parse a decimal price string into a non-negative [`Decimal`].
///
/// Surrounding whitespace is tolerated. A string that does not parse as a
/// number, or parses to a negative value, is a coercion failure.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use stats_core::money::parse_price;
///
/// assert_eq!(parse_price("249.00").unwrap(), Decimal::new(24900, 2));
/// assert!(parse_price("free").is_err());
/// assert!(parse_price("-1.00").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<Decimal> {
    let coercion_err = || StatsError::ValueCoercion {
        field: "item_price",
        value: raw.to_string(),
    };

    let value = Decimal::from_str(raw.trim()).map_err(|_| coercion_err())?;
    if value.is_sign_negative() {
        return Err(coercion_err());
    }
    Ok(value)
}

/// Format a monetary amount with a leading `$` and exactly two decimal
/// places, rounding half-up at the cent boundary.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use stats_core::money::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(981, 0)), "$981.00");
/// assert_eq!(format_currency(Decimal::new(11705, 1)), "$1170.50");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
