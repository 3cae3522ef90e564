//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done on `Decimal` internally, then converted
//! back to `f64` for storage/serialization at 2 decimal places.

use rust_decimal::prelude::*;

use crate::db::models::PaymentRecord;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// NaN/Infinity/out-of-range values collapse to zero; request validation
/// rejects them long before they get here.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal to money precision (half-up)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum non-cancelled payment amounts with precise arithmetic
pub fn sum_payments(payments: &[PaymentRecord]) -> f64 {
    let total: Decimal = payments
        .iter()
        .filter(|p| !p.cancelled)
        .map(|p| to_decimal(p.amount))
        .sum();

    to_f64(total)
}

/// Check if payment is sufficient (with small tolerance for edge cases)
///
/// Returns true if paid >= required - 0.01
pub fn is_payment_sufficient(paid: f64, required: f64) -> bool {
    let paid_dec = to_decimal(paid);
    let required_dec = to_decimal(required);
    paid_dec >= required_dec - MONEY_TOLERANCE
}

/// Whether `amount` would overpay an order: paid + amount > total + 0.01
pub fn exceeds_balance(paid: f64, amount: f64, total: f64) -> bool {
    to_decimal(paid) + to_decimal(amount) > to_decimal(total) + MONEY_TOLERANCE
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PaymentMethod;

    fn payment(amount: f64, cancelled: bool) -> PaymentRecord {
        PaymentRecord {
            method: PaymentMethod::Cash,
            amount,
            reference: None,
            time: 0,
            cancelled,
            cancel_reason: None,
        }
    }

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_rounding_half_up() {
        // 0.005 should round up to 0.01
        let value = Decimal::new(5, 3);
        assert_eq!(round_money(value).to_f64().unwrap(), 0.01);

        // 0.004 should round down to 0.00
        let value = Decimal::new(4, 3);
        assert_eq!(round_money(value).to_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_sum_payments_skips_cancelled() {
        let payments = vec![payment(10.0, false), payment(5.5, true), payment(4.5, false)];
        assert_eq!(sum_payments(&payments), 14.5);
    }

    #[test]
    fn test_sum_payments_many_small() {
        let payments: Vec<PaymentRecord> = (0..100).map(|_| payment(0.01, false)).collect();
        assert_eq!(sum_payments(&payments), 1.0);
    }

    #[test]
    fn test_is_payment_sufficient() {
        assert!(is_payment_sufficient(100.0, 100.0));
        assert!(is_payment_sufficient(100.01, 100.0));
        assert!(is_payment_sufficient(99.995, 100.0)); // Within tolerance
        assert!(!is_payment_sufficient(99.98, 100.0)); // Outside tolerance
    }

    #[test]
    fn test_exceeds_balance() {
        assert!(!exceeds_balance(0.0, 100.0, 100.0));
        assert!(!exceeds_balance(60.0, 40.0, 100.0));
        // 0.01 over is tolerated (cash rounding)
        assert!(!exceeds_balance(60.0, 40.01, 100.0));
        assert!(exceeds_balance(60.0, 40.02, 100.0));
        assert!(exceeds_balance(100.0, 0.02, 100.0));
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }

    // ── Decimal 转换边界 ──────────────────────────────────────────

    #[test]
    fn test_to_decimal_nan_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_infinity_becomes_zero() {
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_f64_extremes_become_zero() {
        // f64::MAX 超出 Decimal 范围
        assert_eq!(to_decimal(f64::MAX), Decimal::ZERO);
        assert_eq!(to_decimal(f64::MIN), Decimal::ZERO);
    }
}
