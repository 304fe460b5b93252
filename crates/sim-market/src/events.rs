//! Market event engine: probability rolls, impact aggregation, news.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use sim_core::{
    EventImpact, EventTemplate, ImpactPolarity, ImpactTarget, Industry, IndustryId, News, Stock,
    StockId,
};

/// Errors produced by the event engine.
#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    /// Probability overrides live on the same 0-100 scale as template weights.
    #[error("probability override {0} exceeds 100")]
    ProbabilityOutOfRange(u8),
}

/// Roll each active template independently against a uniform [1, 100] draw.
///
/// A template triggers when the draw is at or below its probability weight,
/// so weights are absolute percentages and several events can trigger in
/// the same cycle. `probability_override` replaces every template's weight
/// for this cycle (the scheduler's manual knob).
pub fn roll_events<'a, R: Rng + ?Sized>(
    templates: &'a [EventTemplate],
    probability_override: Option<u8>,
    rng: &mut R,
) -> Result<Vec<&'a EventTemplate>, EventError> {
    if let Some(p) = probability_override {
        if p > 100 {
            return Err(EventError::ProbabilityOutOfRange(p));
        }
    }
    let mut triggered = Vec::new();
    for tpl in templates {
        if !tpl.active {
            continue;
        }
        let weight = probability_override.unwrap_or(tpl.probability_weight);
        let roll = rng.gen_range(1u32..=100);
        if roll <= u32::from(weight) {
            debug!(event = %tpl.title, roll, weight, "event triggered");
            triggered.push(tpl);
        }
    }
    Ok(triggered)
}

/// Sum the percentage impacts of the triggered events per affected stock.
///
/// Industry targets fan out to every stock in the industry; stock targets
/// hit only that stock. When two triggered events reach the same stock,
/// both impacts sum. The map iterates in stock-id order, so downstream
/// processing is deterministic.
pub fn accumulate_impacts(
    triggered: &[&EventTemplate],
    impacts: &[EventImpact],
    stocks: &[Stock],
) -> BTreeMap<StockId, Decimal> {
    let mut per_stock: BTreeMap<StockId, Decimal> = BTreeMap::new();
    for tpl in triggered {
        for impact in impacts.iter().filter(|i| i.event == tpl.id) {
            match impact.target {
                ImpactTarget::Industry(industry) => {
                    for stock in stocks.iter().filter(|s| s.industry == industry) {
                        *per_stock.entry(stock.id).or_insert(Decimal::ZERO) +=
                            impact.impact_percentage;
                    }
                }
                ImpactTarget::Stock(id) => {
                    if stocks.iter().any(|s| s.id == id) {
                        *per_stock.entry(id).or_insert(Decimal::ZERO) += impact.impact_percentage;
                    }
                }
            }
        }
    }
    per_stock
}

/// Build the news record a triggered template publishes.
pub fn news_from_template(tpl: &EventTemplate, published_on: NaiveDate) -> News {
    News {
        title: tpl.title.clone(),
        content: tpl.description.clone(),
        category: tpl.polarity.into(),
        event: Some(tpl.id),
        published_on,
    }
}

/// Parameters of a manually triggered one-off event.
///
/// Unlike templates this bypasses the probability roll entirely: it always
/// fires, with a direct industry-level impact drawn from the given range.
#[derive(Clone, Debug)]
pub struct FlashEventSpec {
    pub title: String,
    pub description: String,
    pub polarity: ImpactPolarity,
    /// Target industry; `None` picks one at random.
    pub industry: Option<IndustryId>,
    /// Impact magnitude range in percent (absolute values).
    pub min_impact: Decimal,
    pub max_impact: Decimal,
}

/// A fired one-off event ready to be applied.
#[derive(Clone, Debug)]
pub struct FlashEvent {
    pub news: News,
    pub industry: IndustryId,
    /// Signed impact, negative for bearish events.
    pub impact_percentage: Decimal,
}

fn to_hundredths(value: Decimal) -> i64 {
    (value.abs() * Decimal::ONE_HUNDRED)
        .round_dp(0)
        .to_i64()
        .unwrap_or(0)
}

/// Instantiate a one-off event. Returns `None` when no target industry can
/// be resolved.
pub fn instantiate_flash_event<R: Rng + ?Sized>(
    spec: &FlashEventSpec,
    industries: &[Industry],
    published_on: NaiveDate,
    rng: &mut R,
) -> Option<FlashEvent> {
    let industry = match spec.industry {
        Some(id) => {
            if !industries.iter().any(|i| i.id == id) {
                warn!(?id, "flash event targets an unknown industry");
                return None;
            }
            id
        }
        None => {
            if industries.is_empty() {
                return None;
            }
            industries[rng.gen_range(0..industries.len())].id
        }
    };

    let lo = to_hundredths(spec.min_impact);
    let hi = to_hundredths(spec.max_impact);
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let magnitude = Decimal::new(rng.gen_range(lo..=hi), 2);
    let impact_percentage = match spec.polarity {
        ImpactPolarity::Positive => magnitude,
        ImpactPolarity::Negative => -magnitude,
    };

    Some(FlashEvent {
        news: News {
            title: spec.title.clone(),
            content: spec.description.clone(),
            category: spec.polarity.into(),
            event: None,
            published_on,
        },
        industry,
        impact_percentage,
    })
}
