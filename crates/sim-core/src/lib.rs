#![deny(warnings)]

//! Core domain models and invariants for the investment simulation.
//!
//! This crate defines the serializable entities for the stock market and
//! real-estate economies, the append-only ledgers the period jobs write,
//! and validation helpers that guarantee the basic invariants the engines
//! rely on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod estate;
mod ledger;
mod market;
mod period;
mod rates;

pub use estate::{
    validate_holding, validate_listing, BuildingAge, Holding, LandDemand, Listing, ListingStatus,
    MarketEvaluation, PropertyType,
};
pub use ledger::{
    CoinLedgerEntry, MonthlyCost, TxnKind, UserAccount, WeeklyLoanPayment, WeeklyRentIncome,
};
pub use market::{
    validate_event_template, validate_stock, EventCategory, EventImpact, EventTemplate,
    ImpactPolarity, ImpactTarget, Industry, News, NewsCategory, Stock, StockPriceHistory,
};
pub use period::{MonthKey, WeekKey};
pub use rates::{InterestRatePoint, InterestRateSeries, DEFAULT_INTEREST_RATE};

/// Unique identifier of an industry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndustryId(pub u64);

/// Unique identifier of a stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StockId(pub u64);

/// Unique identifier of a market event template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

/// Unique identifier of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Unique identifier of a real-estate listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(pub u64);

/// Unique identifier of a user's real-estate holding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HoldingId(pub u64);

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Names and titles must not be blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Prices must be strictly positive.
    #[error("price must be > 0")]
    NonPositivePrice,
    /// Band invariant `min <= current <= max` violated.
    #[error("stock {0:?} price is outside its trading band")]
    PriceOutsideBand(StockId),
    /// Probability weights live on a 0-100 scale.
    #[error("probability weight {0} exceeds 100")]
    WeightOutOfRange(u8),
    /// Monetary value that must not be negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Area must be strictly positive.
    #[error("area must be > 0")]
    NonPositiveArea,
    /// Vacancy rates are clamped percentages.
    #[error("holding {0:?} vacancy rate is outside [0, 100]")]
    VacancyOutOfRange(HoldingId),
    /// Loan balance above the original loan amount.
    #[error("holding {0:?} loan balance exceeds its total loan amount")]
    LoanExceedsTotal(HoldingId),
    /// Cross-entity reference to a missing row.
    #[error("reference not found: {0}")]
    DanglingReference(String),
}

/// Top-level persistent state: every entity the period jobs read or write.
///
/// The external trading boundary creates holdings and accounts and flips
/// listings between available and sold; the simulation core only consumes
/// them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub industries: Vec<Industry>,
    pub stocks: Vec<Stock>,
    pub price_history: Vec<StockPriceHistory>,
    pub events: Vec<EventTemplate>,
    pub event_impacts: Vec<EventImpact>,
    pub news: Vec<News>,
    pub interest_rates: InterestRateSeries,
    pub listings: Vec<Listing>,
    pub holdings: Vec<Holding>,
    pub accounts: Vec<UserAccount>,
    pub rent_incomes: Vec<WeeklyRentIncome>,
    pub loan_payments: Vec<WeeklyLoanPayment>,
    pub monthly_costs: Vec<MonthlyCost>,
    pub coin_ledger: Vec<CoinLedgerEntry>,
}

impl WorldState {
    pub fn stock(&self, id: StockId) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id == id)
    }

    pub fn stock_mut(&mut self, id: StockId) -> Option<&mut Stock> {
        self.stocks.iter_mut().find(|s| s.id == id)
    }

    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn holding_mut(&mut self, id: HoldingId) -> Option<&mut Holding> {
        self.holdings.iter_mut().find(|h| h.id == id)
    }

    pub fn account_mut(&mut self, user: UserId) -> Option<&mut UserAccount> {
        self.accounts.iter_mut().find(|a| a.id == user)
    }

    /// The price-history row for (stock, day), if one was already written.
    pub fn history_row_mut(
        &mut self,
        stock: StockId,
        day: chrono::NaiveDate,
    ) -> Option<&mut StockPriceHistory> {
        self.price_history
            .iter_mut()
            .find(|r| r.stock == stock && r.recorded_on == day)
    }
}

/// Validate the world, including cross-references between entities.
pub fn validate_world(world: &WorldState) -> Result<(), ValidationError> {
    for stock in &world.stocks {
        validate_stock(stock)?;
        if !world.industries.iter().any(|i| i.id == stock.industry) {
            return Err(ValidationError::DanglingReference(format!(
                "industry {:?} of stock {:?}",
                stock.industry, stock.id
            )));
        }
    }
    for tpl in &world.events {
        validate_event_template(tpl)?;
    }
    for impact in &world.event_impacts {
        if !world.events.iter().any(|e| e.id == impact.event) {
            return Err(ValidationError::DanglingReference(format!(
                "event {:?} of impact",
                impact.event
            )));
        }
        match impact.target {
            ImpactTarget::Industry(id) => {
                if !world.industries.iter().any(|i| i.id == id) {
                    return Err(ValidationError::DanglingReference(format!(
                        "industry {id:?} targeted by impact"
                    )));
                }
            }
            ImpactTarget::Stock(id) => {
                if world.stock(id).is_none() {
                    return Err(ValidationError::DanglingReference(format!(
                        "stock {id:?} targeted by impact"
                    )));
                }
            }
        }
    }
    for listing in &world.listings {
        validate_listing(listing)?;
    }
    for holding in &world.holdings {
        validate_holding(holding)?;
        if !world.accounts.iter().any(|a| a.id == holding.owner) {
            return Err(ValidationError::DanglingReference(format!(
                "owner {:?} of holding {:?}",
                holding.owner, holding.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_world() -> WorldState {
        let mut world = WorldState {
            industries: vec![Industry {
                id: IndustryId(1),
                name: "Technology".to_string(),
            }],
            stocks: vec![Stock {
                id: StockId(1),
                industry: IndustryId(1),
                name: "Acme Robotics".to_string(),
                current_price: Decimal::new(100_000, 2),
                min_price: Decimal::new(60_000, 2),
                max_price: Decimal::new(140_000, 2),
                updated_on: None,
            }],
            events: vec![EventTemplate {
                id: EventId(1),
                title: "Export boom".to_string(),
                description: "Overseas demand lifts manufacturers".to_string(),
                category: EventCategory::Economy,
                polarity: ImpactPolarity::Positive,
                probability_weight: 20,
                active: true,
            }],
            event_impacts: vec![EventImpact {
                event: EventId(1),
                target: ImpactTarget::Industry(IndustryId(1)),
                impact_percentage: Decimal::new(300, 2),
            }],
            accounts: vec![UserAccount {
                id: UserId(7),
                balance: Decimal::new(500_000, 2),
            }],
            ..WorldState::default()
        };
        world.interest_rates.set_rate(date(2026, 1, 5), Decimal::new(180, 2));
        world
    }

    #[test]
    fn world_snapshot_roundtrip() {
        let world = sample_world();
        validate_world(&world).unwrap();
        let s = serde_json::to_string_pretty(&world).unwrap();
        let back: WorldState = serde_json::from_str(&s).unwrap();
        assert_eq!(back.stocks.len(), 1);
        assert_eq!(back.events.len(), 1);
        assert_eq!(back.interest_rates.len(), 1);
    }

    #[test]
    fn dangling_industry_rejected() {
        let mut world = sample_world();
        world.industries.clear();
        assert!(matches!(
            validate_world(&world),
            Err(ValidationError::DanglingReference(_))
        ));
    }

    #[test]
    fn dangling_impact_target_rejected() {
        let mut world = sample_world();
        world.event_impacts.push(EventImpact {
            event: EventId(1),
            target: ImpactTarget::Stock(StockId(99)),
            impact_percentage: Decimal::new(-100, 2),
        });
        assert!(validate_world(&world).is_err());
    }

    #[test]
    fn band_violation_rejected() {
        let mut world = sample_world();
        world.stocks[0].current_price = Decimal::new(150_000, 2);
        assert_eq!(
            validate_world(&world),
            Err(ValidationError::PriceOutsideBand(StockId(1)))
        );
    }

    #[test]
    fn history_row_lookup_is_per_day() {
        let mut world = sample_world();
        world.price_history.push(StockPriceHistory {
            stock: StockId(1),
            price: Decimal::new(101_000, 2),
            change_percentage: Decimal::new(100, 2),
            recorded_on: date(2026, 3, 2),
        });
        assert!(world.history_row_mut(StockId(1), date(2026, 3, 2)).is_some());
        assert!(world.history_row_mut(StockId(1), date(2026, 3, 3)).is_none());
        assert!(world.history_row_mut(StockId(2), date(2026, 3, 2)).is_none());
    }
}
