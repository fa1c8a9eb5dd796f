use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Timestamp in whole seconds since the Unix epoch
///
/// Book snapshots and trades share this unit so they can be joined by range.
pub type Timestamp = i64;

/// Symbol identifier for a tradeable instrument
pub type Symbol = String;

/// Lossy conversion of a stored decimal into the float domain features live in
///
/// Yields NaN for values f64 cannot represent, so bad input poisons the
/// derived column instead of silently becoming zero.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(dec!(100.5)), 100.5);
        assert_eq!(to_f64(dec!(-0.25)), -0.25);
        assert_eq!(to_f64(Decimal::ZERO), 0.0);
    }
}
