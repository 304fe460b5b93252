//! Monthly per-holding computations: cost charge, rent-market re-roll and
//! vacancy recomputation.

use rand::Rng;
use rust_decimal::Decimal;

use sim_core::{BuildingAge, Holding, LandDemand, Listing, MarketEvaluation};

use crate::valuation::{roll_evaluation, roll_yield_rate};

/// Yen per coin unit for the monthly cost conversion.
const YEN_PER_COIN: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Monthly fee charge for one holding.
#[derive(Clone, Debug, PartialEq)]
pub struct CostOutcome {
    /// Management fee in yen.
    pub management_fee: Decimal,
    /// Repair reserve in yen.
    pub repair_reserve: Decimal,
    /// Total converted to coin units; the amount debited.
    pub total_coins: Decimal,
}

/// Result of the monthly rent-market re-roll.
#[derive(Clone, Debug, PartialEq)]
pub struct RentRevision {
    pub evaluation: MarketEvaluation,
    pub yield_rate: Decimal,
    /// Market rent before the user's rent adjustment.
    pub market_rent: Decimal,
    /// New `current_rent` with `rent_change_rate` applied.
    pub adjusted_rent: Decimal,
}

/// Monthly management and reserve fees.
///
/// Recomputed from the original listing's per-area rates when it still
/// exists; otherwise the holding's stored monthly running cost is split
/// 50/50 between the two fee kinds. The yen total converts to coin units
/// at 10,000 yen per coin.
pub fn monthly_cost(holding: &Holding, listing: Option<&Listing>) -> CostOutcome {
    let (management_fee, repair_reserve) = match listing {
        Some(listing) => (
            (listing.management_rate * listing.area).round_dp(2),
            (listing.reserve_rate * listing.area).round_dp(2),
        ),
        None => {
            let half = (holding.management_cost / Decimal::TWO).round_dp(2);
            (half, holding.management_cost - half)
        }
    };
    let total_yen = management_fee + repair_reserve;
    CostOutcome {
        management_fee,
        repair_reserve,
        total_coins: (total_yen / YEN_PER_COIN).round_dp(2),
    }
}

/// Re-roll the rent market for a holding.
///
/// Draws a qualitative evaluation, a yield within the (land demand,
/// evaluation) range, and derives the market monthly rent as
/// `yield x purchase_price / 1200`. The holding's persisted
/// `rent_change_rate` then applies multiplicatively so a user-set rent
/// deviation survives the re-roll.
pub fn revise_rent<R: Rng + ?Sized>(
    holding: &Holding,
    demand: LandDemand,
    rng: &mut R,
) -> RentRevision {
    let evaluation = roll_evaluation(rng);
    let yield_rate = roll_yield_rate(demand, evaluation, rng);
    let market_rent =
        (yield_rate * holding.purchase_price / Decimal::new(1200, 0)).round_dp(2);
    let adjustment = Decimal::ONE + holding.rent_change_rate / Decimal::ONE_HUNDRED;
    let adjusted_rent = (market_rent * adjustment).round_dp(2);
    RentRevision {
        evaluation,
        yield_rate,
        market_rent,
        adjusted_rent,
    }
}

fn demand_component(demand: LandDemand) -> Decimal {
    match demand {
        LandDemand::Rising => Decimal::ZERO,
        LandDemand::Normal => Decimal::new(5, 0),
        LandDemand::Falling => Decimal::new(10, 0),
    }
}

fn age_component(age: BuildingAge) -> Decimal {
    match age {
        BuildingAge::New => Decimal::ZERO,
        BuildingAge::SemiNew => Decimal::new(5, 0),
        BuildingAge::Old => Decimal::new(10, 0),
    }
}

/// Vacancy rate: demand component + age component + the user's rent
/// deviation, clamped into [0, 100] whatever the inputs.
pub fn vacancy_rate(demand: LandDemand, age: BuildingAge, rent_change_rate: Decimal) -> Decimal {
    (demand_component(demand) + age_component(age) + rent_change_rate)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
