//! Weekly per-holding computations: rent income net of vacancy and the
//! straight-line loan payment.

use rust_decimal::Decimal;

use sim_core::Holding;

/// Loan interest is annual-rate / (100 x 52).
pub const WEEKS_PER_YEAR: u32 = 52;

/// One week of rent for a holding.
#[derive(Clone, Debug, PartialEq)]
pub struct RentOutcome {
    /// A quarter of the monthly rent.
    pub gross: Decimal,
    pub vacancy_deduction: Decimal,
    /// Amount credited to the owner.
    pub net: Decimal,
}

/// One week of loan amortization.
#[derive(Clone, Debug, PartialEq)]
pub struct LoanOutcome {
    pub principal: Decimal,
    pub interest: Decimal,
    /// Amount debited from the owner.
    pub total: Decimal,
    pub balance_after: Decimal,
}

/// Weekly rent: a quarter of the monthly rent, reduced by the vacancy rate.
pub fn rent_income(holding: &Holding) -> RentOutcome {
    let gross = (holding.current_rent / Decimal::new(4, 0)).round_dp(2);
    let vacancy_deduction = (gross * holding.vacancy_rate / Decimal::ONE_HUNDRED).round_dp(2);
    let net = gross - vacancy_deduction;
    RentOutcome {
        gross,
        vacancy_deduction,
        net,
    }
}

/// Weekly loan payment at the given annual rate (percent).
///
/// Returns `None` once the balance reaches zero: fully amortized holdings
/// stop producing payments entirely. Principal is the straight-line amount
/// fixed at purchase; the balance is floored at zero so the final payment
/// cannot overshoot.
pub fn loan_payment(holding: &Holding, annual_rate: Decimal) -> Option<LoanOutcome> {
    if holding.loan_balance <= Decimal::ZERO {
        return None;
    }
    let principal = holding.weekly_principal;
    let divisor = Decimal::ONE_HUNDRED * Decimal::from(WEEKS_PER_YEAR);
    let interest = (holding.loan_balance * annual_rate / divisor).round_dp(2);
    let total = principal + interest;
    let balance_after = (holding.loan_balance - principal).max(Decimal::ZERO);
    Some(LoanOutcome {
        principal,
        interest,
        total,
        balance_after,
    })
}
