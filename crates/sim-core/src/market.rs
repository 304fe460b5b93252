//! Stock-market entities: industries, stocks, price history, market event
//! templates and the news they publish.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EventId, IndustryId, StockId, ValidationError};

/// An industry grouping stocks for sector-wide event impacts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Industry {
    pub id: IndustryId,
    pub name: String,
}

/// A tradable stock with its current price and trading band.
///
/// The band is recomputed on every price cycle as a fixed fraction of the
/// pre-update reference price; `min_price <= current_price <= max_price`
/// holds after every update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stock {
    pub id: StockId,
    pub industry: IndustryId,
    pub name: String,
    pub current_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    /// Day of the last completed price update, if any.
    pub updated_on: Option<NaiveDate>,
}

/// One price-history row per stock per calendar day.
///
/// Re-running the update for an already-processed day updates the existing
/// row instead of appending a duplicate. Old rows are pruned by an external
/// retention job, so the series may have gaps beyond the horizon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockPriceHistory {
    pub stock: StockId,
    pub price: Decimal,
    pub change_percentage: Decimal,
    pub recorded_on: NaiveDate,
}

/// Broad classification of a market event template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Economy,
    Policy,
    Industry,
    Company,
    Disaster,
}

/// Direction of an event's expected price effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactPolarity {
    Positive,
    Negative,
}

/// News classification, derived from the polarity of the triggering event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsCategory {
    Bullish,
    Bearish,
}

impl From<ImpactPolarity> for NewsCategory {
    fn from(polarity: ImpactPolarity) -> Self {
        match polarity {
            ImpactPolarity::Positive => NewsCategory::Bullish,
            ImpactPolarity::Negative => NewsCategory::Bearish,
        }
    }
}

/// Static template describing a possible market happening.
///
/// `probability_weight` is an absolute percentage on a 0-100 scale; each
/// active template rolls independently every event cycle, so several events
/// can trigger in the same cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub polarity: ImpactPolarity,
    pub probability_weight: u8,
    pub active: bool,
}

/// What an event impact applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactTarget {
    /// Every stock in the industry.
    Industry(IndustryId),
    /// A single stock.
    Stock(StockId),
}

/// Signed percentage shock one event applies to one target.
///
/// Impacts are additive: when several events trigger in one cycle, a stock
/// receives the sum of every matching impact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventImpact {
    pub event: EventId,
    pub target: ImpactTarget,
    pub impact_percentage: Decimal,
}

/// Informational record emitted whenever an event triggers. Never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct News {
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    /// Triggering template; `None` for one-off manually triggered events.
    pub event: Option<EventId>,
    pub published_on: NaiveDate,
}

/// Validate a stock's band invariant and basic fields.
pub fn validate_stock(stock: &Stock) -> Result<(), ValidationError> {
    if stock.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if stock.current_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    if stock.min_price > stock.current_price || stock.current_price > stock.max_price {
        return Err(ValidationError::PriceOutsideBand(stock.id));
    }
    Ok(())
}

/// Validate an event template.
pub fn validate_event_template(tpl: &EventTemplate) -> Result<(), ValidationError> {
    if tpl.title.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if tpl.probability_weight > 100 {
        return Err(ValidationError::WeightOutOfRange(tpl.probability_weight));
    }
    Ok(())
}
