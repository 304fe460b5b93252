//! Pure valuation functions shared by the trading boundary and the weekly
//! and monthly processors.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;

use sim_core::{BuildingAge, Holding, LandDemand, Listing, MarketEvaluation};

/// Purchase multiplier for the land-demand category.
pub fn demand_multiplier(demand: LandDemand) -> Decimal {
    match demand {
        LandDemand::Rising => Decimal::new(20, 1),
        LandDemand::Normal => Decimal::new(15, 1),
        LandDemand::Falling => Decimal::new(10, 1),
    }
}

/// Purchase multiplier for the building-age bracket.
pub fn age_multiplier(age: BuildingAge) -> Decimal {
    match age {
        BuildingAge::New => Decimal::new(10, 1),
        BuildingAge::SemiNew => Decimal::new(8, 1),
        BuildingAge::Old => Decimal::new(6, 1),
    }
}

/// Flat depreciation rate in percent for the land-demand category, applied
/// once regardless of holding duration. The per-day component comes on top
/// of this in [`sale_value`].
pub fn demand_depreciation_rate(demand: LandDemand) -> Decimal {
    match demand {
        LandDemand::Rising => Decimal::ZERO,
        LandDemand::Normal => Decimal::ONE,
        LandDemand::Falling => Decimal::TWO,
    }
}

/// Purchase price: base price scaled by the demand and age multipliers.
pub fn purchase_price(listing: &Listing) -> Decimal {
    (listing.base_price * demand_multiplier(listing.land_demand) * age_multiplier(listing.building_age))
        .round_dp(2)
}

/// Monthly running cost in yen: (management + reserve rate) x area.
pub fn monthly_running_cost(listing: &Listing) -> Decimal {
    ((listing.management_rate + listing.reserve_rate) * listing.area).round_dp(2)
}

/// Yield percentage range in hundredths keyed by (land demand, market
/// evaluation). Exhaustive on both enums so a new category cannot silently
/// fall through to a default.
fn yield_range_hundredths(demand: LandDemand, evaluation: MarketEvaluation) -> (i64, i64) {
    match (demand, evaluation) {
        (LandDemand::Rising, MarketEvaluation::Good) => (600, 800),
        (LandDemand::Rising, MarketEvaluation::Normal) => (500, 600),
        (LandDemand::Rising, MarketEvaluation::Bad) => (400, 500),
        (LandDemand::Normal, MarketEvaluation::Good) => (500, 650),
        (LandDemand::Normal, MarketEvaluation::Normal) => (400, 500),
        (LandDemand::Normal, MarketEvaluation::Bad) => (300, 400),
        (LandDemand::Falling, MarketEvaluation::Good) => (400, 550),
        (LandDemand::Falling, MarketEvaluation::Normal) => (300, 400),
        (LandDemand::Falling, MarketEvaluation::Bad) => (200, 300),
    }
}

/// Yield percentage range as decimals, for display on unpurchased listings.
pub fn yield_range(demand: LandDemand, evaluation: MarketEvaluation) -> (Decimal, Decimal) {
    let (lo, hi) = yield_range_hundredths(demand, evaluation);
    (Decimal::new(lo, 2), Decimal::new(hi, 2))
}

/// Draw a qualitative market evaluation, uniform over the three outcomes
/// and independent of land demand.
pub fn roll_evaluation<R: Rng + ?Sized>(rng: &mut R) -> MarketEvaluation {
    match rng.gen_range(0u8..3) {
        0 => MarketEvaluation::Good,
        1 => MarketEvaluation::Normal,
        _ => MarketEvaluation::Bad,
    }
}

/// Draw a surface yield uniformly within the (demand, evaluation) range,
/// two-decimal granularity.
pub fn roll_yield_rate<R: Rng + ?Sized>(
    demand: LandDemand,
    evaluation: MarketEvaluation,
    rng: &mut R,
) -> Decimal {
    let (lo, hi) = yield_range_hundredths(demand, evaluation);
    Decimal::new(rng.gen_range(lo..=hi), 2)
}

/// Sale value of a holding: purchase price less depreciation.
///
/// Depreciation is the flat land-demand rate plus 0.005% per day owned.
/// The day count takes the absolute value so a purchase date nominally in
/// the future (clock skew) does not error. Floored at zero.
pub fn sale_value(holding: &Holding, demand: LandDemand, now: NaiveDate) -> Decimal {
    let days_owned = (now - holding.purchase_date).num_days().abs();
    let daily = Decimal::new(5, 3) * Decimal::from(days_owned as u64);
    let depreciation = (demand_depreciation_rate(demand) + daily).min(Decimal::ONE_HUNDRED);
    (holding.purchase_price * (Decimal::ONE_HUNDRED - depreciation) / Decimal::ONE_HUNDRED)
        .round_dp(2)
        .max(Decimal::ZERO)
}
