//! Real-estate period jobs: the weekly rent/loan cycle and the monthly
//! cost/yield/vacancy cycle.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use sim_core::{
    CoinLedgerEntry, HoldingId, MonthKey, MonthlyCost, TxnKind, UserId, WeekKey, WeeklyLoanPayment,
    WeeklyRentIncome, WorldState,
};
use sim_estate::{
    loan_payment, monthly_cost, rent_income, revise_rent, vacancy_rate, LoanOutcome, RentOutcome,
};
use sim_market::roll_weekly_rate;

use crate::{JobError, JobReport};

struct WeeklyMutation {
    holding: HoldingId,
    owner: UserId,
    rent: RentOutcome,
    loan: Option<LoanOutcome>,
}

/// Weekly real-estate cycle.
///
/// Rolls the week's interest rate first (unconditionally, so the loan step
/// below always sees this week's rate), then processes every non-sold
/// holding: credit net rent, debit the loan payment while a balance
/// remains, bump `weeks_owned`. Idempotent per (holding, week) via the
/// rent-income ledger; `force` re-runs the full logic. The whole run is
/// computed before anything is applied, so a failure never leaves a
/// partially processed week.
pub fn run_weekly_cycle<R: Rng + ?Sized>(
    world: &mut WorldState,
    date: NaiveDate,
    force: bool,
    rng: &mut R,
) -> Result<JobReport, JobError> {
    let mut report = JobReport::new("weekly real estate");
    let week = WeekKey::from_date(date);

    let rate = roll_weekly_rate(rng);
    world.interest_rates.set_rate(date, rate);
    debug!(%rate, %week, "weekly interest rate rolled");
    // Read back through the series: the loan computation must use the rate
    // in effect now, which the roll above just became.
    let current_rate = world.interest_rates.current_rate(date);

    let mut mutations = Vec::new();
    for holding in world.holdings.iter().filter(|h| !h.is_sold) {
        let already_done = world
            .rent_incomes
            .iter()
            .any(|r| r.holding == holding.id && r.week == week);
        if already_done && !force {
            debug!(holding = ?holding.id, %week, "week already processed, skipping");
            report.skipped += 1;
            continue;
        }
        if world.accounts.iter().all(|a| a.id != holding.owner) {
            warn!(holding = ?holding.id, owner = ?holding.owner, "owner account missing, skipping");
            report.skipped += 1;
            continue;
        }
        mutations.push(WeeklyMutation {
            holding: holding.id,
            owner: holding.owner,
            rent: rent_income(holding),
            loan: loan_payment(holding, current_rate),
        });
    }

    for m in mutations {
        world.rent_incomes.push(WeeklyRentIncome {
            holding: m.holding,
            owner: m.owner,
            gross: m.rent.gross,
            vacancy_deduction: m.rent.vacancy_deduction,
            net: m.rent.net,
            week,
            recorded_on: date,
        });
        world.coin_ledger.push(CoinLedgerEntry {
            user: m.owner,
            amount: m.rent.net,
            kind: TxnKind::RentIncome,
            memo: format!("weekly rent, holding {}", m.holding.0),
            recorded_on: date,
        });
        if let Some(account) = world.account_mut(m.owner) {
            account.balance += m.rent.net;
        }

        if let Some(loan) = &m.loan {
            world.loan_payments.push(WeeklyLoanPayment {
                holding: m.holding,
                owner: m.owner,
                principal: loan.principal,
                interest: loan.interest,
                total: loan.total,
                balance_after: loan.balance_after,
                week,
                recorded_on: date,
            });
            world.coin_ledger.push(CoinLedgerEntry {
                user: m.owner,
                amount: -loan.total,
                kind: TxnKind::LoanPayment,
                memo: format!("weekly loan payment, holding {}", m.holding.0),
                recorded_on: date,
            });
            if let Some(account) = world.account_mut(m.owner) {
                account.balance -= loan.total;
                if account.balance < Decimal::ZERO {
                    warn!(user = ?m.owner, balance = %account.balance, "balance went negative");
                }
            }
        }

        if let Some(holding) = world.holding_mut(m.holding) {
            if let Some(loan) = &m.loan {
                holding.loan_balance = loan.balance_after;
            }
            holding.weeks_owned += 1;
        }
        report.processed += 1;
    }

    info!(%report, "weekly cycle finished");
    Ok(report)
}

struct MonthlyMutation {
    holding: HoldingId,
    owner: UserId,
    cost: sim_estate::CostOutcome,
    rent_update: Option<(Decimal, Decimal, Decimal)>, // yield, rent, vacancy
}

/// Monthly real-estate cycle.
///
/// Idempotent per calendar month via the monthly-cost ledger; `force`
/// re-runs it. Per non-sold holding: debit management/reserve fees
/// (listing rates when the listing survives, the stored running cost split
/// 50/50 otherwise), re-roll the rent market and recompute vacancy. The
/// market re-roll needs the listing's demand and age categories, so it is
/// skipped for holdings whose listing is gone; the cost charge still
/// applies.
pub fn run_monthly_cycle<R: Rng + ?Sized>(
    world: &mut WorldState,
    date: NaiveDate,
    force: bool,
    rng: &mut R,
) -> Result<JobReport, JobError> {
    let mut report = JobReport::new("monthly real estate");
    let month = MonthKey::from_date(date);

    if !force && world.monthly_costs.iter().any(|c| c.month == month) {
        report.skipped = world.holdings.iter().filter(|h| !h.is_sold).count();
        info!(%month, "month already processed, skipping run");
        return Ok(report);
    }

    let mut mutations = Vec::new();
    for holding in world.holdings.iter().filter(|h| !h.is_sold) {
        if world.accounts.iter().all(|a| a.id != holding.owner) {
            warn!(holding = ?holding.id, owner = ?holding.owner, "owner account missing, skipping");
            report.skipped += 1;
            continue;
        }
        let listing = holding.listing.and_then(|id| world.listing(id));
        let cost = monthly_cost(holding, listing);
        let rent_update = match listing {
            Some(listing) => {
                let revision = revise_rent(holding, listing.land_demand, rng);
                let vacancy = vacancy_rate(
                    listing.land_demand,
                    listing.building_age,
                    holding.rent_change_rate,
                );
                Some((revision.yield_rate, revision.adjusted_rent, vacancy))
            }
            None => {
                debug!(holding = ?holding.id, "listing gone, keeping last yield and vacancy");
                None
            }
        };
        mutations.push(MonthlyMutation {
            holding: holding.id,
            owner: holding.owner,
            cost,
            rent_update,
        });
    }

    for m in mutations {
        world.monthly_costs.push(MonthlyCost {
            holding: m.holding,
            owner: m.owner,
            management_fee: m.cost.management_fee,
            repair_reserve: m.cost.repair_reserve,
            total_coins: m.cost.total_coins,
            month,
            recorded_on: date,
        });
        world.coin_ledger.push(CoinLedgerEntry {
            user: m.owner,
            amount: -m.cost.total_coins,
            kind: TxnKind::MaintenanceCost,
            memo: format!("monthly upkeep, holding {}", m.holding.0),
            recorded_on: date,
        });
        if let Some(account) = world.account_mut(m.owner) {
            account.balance -= m.cost.total_coins;
            if account.balance < Decimal::ZERO {
                warn!(user = ?m.owner, balance = %account.balance, "balance went negative");
            }
        }
        if let Some(holding) = world.holding_mut(m.holding) {
            if let Some((yield_rate, rent, vacancy)) = m.rent_update {
                holding.yield_rate = yield_rate;
                holding.current_rent = rent;
                holding.vacancy_rate = vacancy;
            }
        }
        report.processed += 1;
    }

    info!(%report, "monthly cycle finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::{
        BuildingAge, Holding, LandDemand, Listing, ListingId, ListingStatus, PropertyType,
        UserAccount,
    };

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn listing() -> Listing {
        Listing {
            id: ListingId(1),
            property_name: "Cedar Court".to_string(),
            property_type: PropertyType::Apartment,
            base_price: Decimal::new(8_000_000, 0),
            land_demand: LandDemand::Falling,
            building_age: BuildingAge::Old,
            area: Decimal::new(40, 0),
            management_rate: Decimal::new(250, 0),
            reserve_rate: Decimal::new(125, 0),
            status: ListingStatus::Sold,
        }
    }

    fn holding(id: u64, balance: i64) -> Holding {
        Holding {
            id: HoldingId(id),
            owner: UserId(1),
            listing: Some(ListingId(1)),
            purchase_price: Decimal::new(12_000_000, 0),
            purchase_date: date(1, 10),
            loan_balance: Decimal::new(balance, 0),
            total_loan_amount: Decimal::new(10_000_000, 0),
            weekly_principal: Decimal::new(50_000, 0),
            current_rent: Decimal::new(120_000, 0),
            rent_change_rate: Decimal::ZERO,
            vacancy_rate: Decimal::new(10, 0),
            yield_rate: Decimal::new(400, 2),
            management_cost: Decimal::new(15_000, 0),
            weeks_owned: 4,
            is_sold: false,
            sale_price: None,
            sale_date: None,
        }
    }

    fn world() -> WorldState {
        WorldState {
            listings: vec![listing()],
            holdings: vec![holding(1, 4_000_000)],
            accounts: vec![UserAccount {
                id: UserId(1),
                balance: Decimal::new(1_000_000, 0),
            }],
            ..WorldState::default()
        }
    }

    #[test]
    fn weekly_cycle_credits_rent_and_debits_loan() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = run_weekly_cycle(&mut w, date(3, 2), false, &mut rng).unwrap();
        assert_eq!(report.processed, 1);

        // Rent: 120,000 / 4 = 30,000 gross, 10% vacancy -> 27,000 net.
        assert_eq!(w.rent_incomes.len(), 1);
        assert_eq!(w.rent_incomes[0].net, Decimal::new(27_000, 0));

        // Loan: principal 50,000 plus interest at the rolled rate.
        assert_eq!(w.loan_payments.len(), 1);
        let payment = &w.loan_payments[0];
        assert_eq!(payment.principal, Decimal::new(50_000, 0));
        let rate = w.interest_rates.current_rate(date(3, 2));
        let expected_interest =
            (Decimal::new(4_000_000, 0) * rate / Decimal::new(5200, 0)).round_dp(2);
        assert_eq!(payment.interest, expected_interest);

        let holding = &w.holdings[0];
        assert_eq!(holding.loan_balance, Decimal::new(3_950_000, 0));
        assert_eq!(holding.weeks_owned, 5);

        let expected_balance =
            Decimal::new(1_000_000, 0) + Decimal::new(27_000, 0) - payment.total;
        assert_eq!(w.accounts[0].balance, expected_balance);
        assert_eq!(w.coin_ledger.len(), 2);
    }

    #[test]
    fn weekly_cycle_is_idempotent_per_week() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        run_weekly_cycle(&mut w, date(3, 2), false, &mut rng).unwrap();
        let balance = w.accounts[0].balance;

        // Same ISO week, later day: guard holds.
        let second = run_weekly_cycle(&mut w, date(3, 5), false, &mut rng).unwrap();
        assert_eq!(second.processed, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(w.rent_incomes.len(), 1);
        assert_eq!(w.accounts[0].balance, balance);
        assert_eq!(w.holdings[0].weeks_owned, 5);

        // Next week processes again.
        let next = run_weekly_cycle(&mut w, date(3, 9), false, &mut rng).unwrap();
        assert_eq!(next.processed, 1);
        assert_eq!(w.rent_incomes.len(), 2);
    }

    #[test]
    fn force_reprocesses_the_same_week() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        run_weekly_cycle(&mut w, date(3, 2), false, &mut rng).unwrap();
        let forced = run_weekly_cycle(&mut w, date(3, 2), true, &mut rng).unwrap();
        assert_eq!(forced.processed, 1);
        assert_eq!(w.rent_incomes.len(), 2);
        assert_eq!(w.holdings[0].weeks_owned, 6);
    }

    #[test]
    fn weekly_rate_roll_happens_even_when_all_skipped() {
        let mut w = world();
        w.holdings[0].is_sold = true;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = run_weekly_cycle(&mut w, date(3, 2), false, &mut rng).unwrap();
        assert_eq!(report.processed, 0);
        assert_eq!(w.interest_rates.len(), 1);
    }

    #[test]
    fn amortized_holding_stops_paying_but_keeps_earning() {
        let mut w = world();
        w.holdings[0].loan_balance = Decimal::ZERO;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        run_weekly_cycle(&mut w, date(3, 2), false, &mut rng).unwrap();
        assert_eq!(w.rent_incomes.len(), 1);
        assert!(w.loan_payments.is_empty());
        assert_eq!(w.coin_ledger.len(), 1);
    }

    #[test]
    fn sold_holdings_are_untouched() {
        let mut w = world();
        w.holdings[0].is_sold = true;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = run_weekly_cycle(&mut w, date(3, 2), false, &mut rng).unwrap();
        assert_eq!(report.processed, 0);
        assert!(w.rent_incomes.is_empty());
        assert_eq!(w.holdings[0].weeks_owned, 4);
    }

    #[test]
    fn monthly_cycle_charges_costs_and_rerolls_rent() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let report = run_monthly_cycle(&mut w, date(4, 1), false, &mut rng).unwrap();
        assert_eq!(report.processed, 1);

        // (250 + 125) x 40 = 15,000 yen -> 1.50 coins.
        assert_eq!(w.monthly_costs.len(), 1);
        assert_eq!(w.monthly_costs[0].total_coins, Decimal::new(150, 2));
        assert_eq!(
            w.accounts[0].balance,
            Decimal::new(1_000_000, 0) - Decimal::new(150, 2)
        );

        // Falling demand, old building, no rent deviation: vacancy 20.
        let holding = &w.holdings[0];
        assert_eq!(holding.vacancy_rate, Decimal::new(20, 0));
        // Rent rederived from the rolled yield.
        let expected_rent = (holding.yield_rate * holding.purchase_price
            / Decimal::new(1200, 0))
        .round_dp(2);
        assert_eq!(holding.current_rent, expected_rent);
    }

    #[test]
    fn monthly_cycle_is_idempotent_per_month() {
        let mut w = world();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        run_monthly_cycle(&mut w, date(4, 1), false, &mut rng).unwrap();
        let rent = w.holdings[0].current_rent;

        let second = run_monthly_cycle(&mut w, date(4, 28), false, &mut rng).unwrap();
        assert_eq!(second.processed, 0);
        assert_eq!(w.monthly_costs.len(), 1);
        assert_eq!(w.holdings[0].current_rent, rent);

        let next_month = run_monthly_cycle(&mut w, date(5, 1), false, &mut rng).unwrap();
        assert_eq!(next_month.processed, 1);
        assert_eq!(w.monthly_costs.len(), 2);
    }

    #[test]
    fn missing_listing_still_charges_via_fallback() {
        let mut w = world();
        w.holdings[0].listing = None;
        let vacancy_before = w.holdings[0].vacancy_rate;
        let rent_before = w.holdings[0].current_rent;
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let report = run_monthly_cycle(&mut w, date(4, 1), false, &mut rng).unwrap();
        assert_eq!(report.processed, 1);
        // Stored cost 15,000 yen split 50/50, converted to coins.
        assert_eq!(w.monthly_costs[0].management_fee, Decimal::new(7_500, 0));
        assert_eq!(w.monthly_costs[0].repair_reserve, Decimal::new(7_500, 0));
        assert_eq!(w.monthly_costs[0].total_coins, Decimal::new(150, 2));
        // No market data without the listing: rent and vacancy stand.
        assert_eq!(w.holdings[0].vacancy_rate, vacancy_before);
        assert_eq!(w.holdings[0].current_rent, rent_before);
    }

    #[test]
    fn negative_balance_is_allowed() {
        let mut w = world();
        w.accounts[0].balance = Decimal::ZERO;
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        run_monthly_cycle(&mut w, date(4, 1), false, &mut rng).unwrap();
        assert!(w.accounts[0].balance < Decimal::ZERO);
    }
}
