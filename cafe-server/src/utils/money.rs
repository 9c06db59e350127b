//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` (SQLite REAL) but every sum and product
//! goes through `Decimal`, rounded half-up to 2 decimal places.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// unit_price × quantity
pub fn line_subtotal(unit_price: f64, quantity: i32) -> Decimal {
    (to_decimal(unit_price) * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of f64 amounts without float drift
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    to_f64(amounts.into_iter().map(to_decimal).sum())
}

/// total / count, 0 when there is nothing to average
pub fn average(total: f64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    to_f64(to_decimal(total) / Decimal::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_subtotal_no_float_drift() {
        // 0.1 * 3 is 0.30000000000000004 in f64
        assert_eq!(to_f64(line_subtotal(0.1, 3)), 0.3);
        assert_eq!(to_f64(line_subtotal(12.5, 2)), 25.0);
    }

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts([0.1, 0.2]), 0.3);
        assert_eq!(sum_amounts(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(10.0, 3), 3.33);
        assert_eq!(average(20.0, 3), 6.67);
        assert_eq!(average(99.0, 0), 0.0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
