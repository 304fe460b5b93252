//! Append-only per-period ledgers mirroring the processors' mutations, plus
//! user coin accounts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{HoldingId, MonthKey, UserId, WeekKey};

/// Transaction tag for every balance-changing row in the coin ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnKind {
    RentIncome,
    LoanPayment,
    MaintenanceCost,
    /// Written by the trading boundary, never by the simulation core.
    StockTrade,
    /// Written by the trading boundary, never by the simulation core.
    PropertyTrade,
}

/// Signed balance movement. The simulation core appends rows here but never
/// reads them back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoinLedgerEntry {
    pub user: UserId,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub memo: String,
    pub recorded_on: NaiveDate,
}

/// One rent-income row per holding per week.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeeklyRentIncome {
    pub holding: HoldingId,
    pub owner: UserId,
    pub gross: Decimal,
    pub vacancy_deduction: Decimal,
    pub net: Decimal,
    pub week: WeekKey,
    pub recorded_on: NaiveDate,
}

/// One loan-payment row per holding per week while a balance remains.
/// Fully amortized holdings stop producing rows.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeeklyLoanPayment {
    pub holding: HoldingId,
    pub owner: UserId,
    pub principal: Decimal,
    pub interest: Decimal,
    pub total: Decimal,
    pub balance_after: Decimal,
    pub week: WeekKey,
    pub recorded_on: NaiveDate,
}

/// One cost row per holding per month.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthlyCost {
    pub holding: HoldingId,
    pub owner: UserId,
    /// Management fee in yen.
    pub management_fee: Decimal,
    /// Repair reserve in yen.
    pub repair_reserve: Decimal,
    /// Total charge converted to coin units.
    pub total_coins: Decimal,
    pub month: MonthKey,
    pub recorded_on: NaiveDate,
}

/// A user's coin balance. Debits never block: balances are permitted to go
/// negative and are only flagged in the logs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub balance: Decimal,
}
