//! Per-stock price step: bounded random walk plus additive event impact.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::warn;

/// Absolute bound of the per-cycle base percentage change (3.00%).
pub const BASE_CHANGE_LIMIT: Decimal = Decimal::from_parts(300, 0, 0, false, 2);

/// Band fraction below the reference price.
const BAND_LOWER: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
/// Band fraction above the reference price.
const BAND_UPPER: Decimal = Decimal::from_parts(14, 0, 0, false, 1);

/// Result of one price-update step for a single stock.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceStep {
    /// Post-clamp price, rounded to two decimals.
    pub new_price: Decimal,
    /// Change actually applied, recomputed from the clamped price against
    /// the reference price so an independent verifier gets the same number.
    pub change_percentage: Decimal,
    /// Theoretical change before clamping (base roll + event impact).
    pub theoretical_change: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

/// Draw the base percentage change uniformly from
/// [-BASE_CHANGE_LIMIT, +BASE_CHANGE_LIMIT] at two-decimal granularity.
pub fn roll_base_change<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let hundredths = rng.gen_range(-300i64..=300);
    Decimal::new(hundredths, 2)
}

/// Advance one stock from its reference price.
///
/// The trading band is recomputed from the reference price first, the
/// theoretical change (base + aggregate event impact) is applied, and the
/// result is rounded then clamped into the band. A zero or negative
/// reference never divides: the step degrades to a no-op with a warning.
pub fn price_step(reference_price: Decimal, base_change: Decimal, event_impact: Decimal) -> PriceStep {
    if reference_price <= Decimal::ZERO {
        warn!(%reference_price, "non-positive reference price, skipping price move");
        return PriceStep {
            new_price: reference_price,
            change_percentage: Decimal::ZERO,
            theoretical_change: Decimal::ZERO,
            min_price: reference_price,
            max_price: reference_price,
        };
    }

    let min_price = (reference_price * BAND_LOWER).round_dp(2);
    let max_price = (reference_price * BAND_UPPER).round_dp(2);

    let theoretical_change = base_change + event_impact;
    let factor = Decimal::ONE + theoretical_change / Decimal::ONE_HUNDRED;
    let unclamped = (reference_price * factor).round_dp(2);
    let new_price = unclamped.clamp(min_price, max_price);

    let change_percentage =
        ((new_price - reference_price) / reference_price * Decimal::ONE_HUNDRED).round_dp(2);

    PriceStep {
        new_price,
        change_percentage,
        theoretical_change,
        min_price,
        max_price,
    }
}
