//! Summary statistics over purchase totals.
//!
//! Pure helpers on slices of [`Decimal`] values. All arithmetic stays in
//! decimal representation so two-decimal currency rounding is exact.

use rust_decimal::Decimal;

/// Sum of all values. Zero for an empty slice.
pub fn sum(values: &[Decimal]) -> Decimal {
    values.iter().copied().sum()
}

/// Arithmetic mean of the values. `None` for an empty slice.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / Decimal::from(values.len() as u64))
}

/// Largest value. `None` for an empty slice.
pub fn max(values: &[Decimal]) -> Option<Decimal> {
    values.iter().copied().max()
}

/// Median of the values: the middle element of the ascending ordering for
/// an odd count, the mean of the two middle elements for an even count.
/// `None` for an empty slice.
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
