// src/common/math.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Arredonda valores monetários para 2 casas (centavos).
pub fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / total * 100`, com 2 casas. Total zero resulta em 0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

pub fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(dec!(10.555)), dec!(10.56));
        assert_eq!(money(dec!(0.125)), dec!(0.13));
        assert_eq!(money(dec!(3)), dec!(3));
    }

    #[test]
    fn test_percentage_handles_zero_total() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 2), 100.0);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(5, 2), 2.5);
        assert_eq!(ratio(1, 0), 0.0);
    }
}
