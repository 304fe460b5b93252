#![deny(warnings)]

//! Real-estate economics: pure valuation functions and the per-holding
//! computations behind the weekly and monthly processors.
//!
//! Nothing here touches storage; functions take borrowed holdings/listings
//! plus an injected RNG and return outcome structs for the runtime to apply.

mod monthly;
mod valuation;
mod weekly;

pub use monthly::{monthly_cost, revise_rent, vacancy_rate, CostOutcome, RentRevision};
pub use valuation::{
    age_multiplier, demand_depreciation_rate, demand_multiplier, monthly_running_cost,
    purchase_price, roll_evaluation, roll_yield_rate, sale_value, yield_range,
};
pub use weekly::{loan_payment, rent_income, LoanOutcome, RentOutcome, WEEKS_PER_YEAR};
