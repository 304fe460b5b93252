//! Weekly interest-rate roll.

use rand::Rng;
use rust_decimal::Decimal;

/// Lower bound of the weekly rate roll, percent.
pub const WEEKLY_RATE_MIN: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
/// Upper bound of the weekly rate roll, percent.
pub const WEEKLY_RATE_MAX: Decimal = Decimal::from_parts(300, 0, 0, false, 2);

/// Draw the week's annual rate uniformly from [0.50, 3.00] percent at
/// two-decimal granularity.
pub fn roll_weekly_rate<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let hundredths = rng.gen_range(50i64..=300);
    Decimal::new(hundredths, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn roll_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let rate = roll_weekly_rate(&mut rng);
            assert!(rate >= WEEKLY_RATE_MIN && rate <= WEEKLY_RATE_MAX);
            assert_eq!(rate, rate.round_dp(2));
        }
    }

    #[test]
    fn roll_is_deterministic_per_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(roll_weekly_rate(&mut a), roll_weekly_rate(&mut b));
        }
    }
}
