//! Market-side jobs: the event roll, the per-stock price step, and the
//! manual one-off event trigger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use sim_core::{News, StockId, StockPriceHistory, WorldState};
use sim_market::{
    accumulate_impacts, instantiate_flash_event, news_from_template, price_step, roll_base_change,
    roll_events, FlashEventSpec, PriceStep,
};

use crate::{JobError, JobReport};

struct StockUpdate {
    stock: StockId,
    step: PriceStep,
}

fn apply_stock_updates(world: &mut WorldState, date: NaiveDate, updates: Vec<StockUpdate>) {
    for update in updates {
        if let Some(row) = world.history_row_mut(update.stock, date) {
            row.price = update.step.new_price;
            row.change_percentage = update.step.change_percentage;
        } else {
            world.price_history.push(StockPriceHistory {
                stock: update.stock,
                price: update.step.new_price,
                change_percentage: update.step.change_percentage,
                recorded_on: date,
            });
        }
        if let Some(stock) = world.stock_mut(update.stock) {
            stock.current_price = update.step.new_price;
            stock.min_price = update.step.min_price;
            stock.max_price = update.step.max_price;
            stock.updated_on = Some(date);
        }
    }
}

/// Advance every stock one price step.
///
/// Stocks already updated for `date` are skipped unless `force` is set; a
/// re-run therefore leaves exactly one history row per stock per day.
/// `impacts` is the aggregate event impact per stock for this cycle, zero
/// for stocks it does not mention.
pub fn advance_stock_prices<R: Rng + ?Sized>(
    world: &mut WorldState,
    date: NaiveDate,
    force: bool,
    impacts: &BTreeMap<StockId, Decimal>,
    rng: &mut R,
) -> JobReport {
    let mut report = JobReport::new("stock prices");
    let mut updates = Vec::with_capacity(world.stocks.len());

    for stock in &world.stocks {
        if !force && stock.updated_on == Some(date) {
            debug!(stock = %stock.name, %date, "already updated today, skipping");
            report.skipped += 1;
            continue;
        }
        let base = roll_base_change(rng);
        let impact = impacts.get(&stock.id).copied().unwrap_or(Decimal::ZERO);
        let step = price_step(stock.current_price, base, impact);
        debug!(
            stock = %stock.name,
            theoretical = %step.theoretical_change,
            applied = %step.change_percentage,
            "price step"
        );
        updates.push(StockUpdate {
            stock: stock.id,
            step,
        });
        report.processed += 1;
    }

    apply_stock_updates(world, date, updates);
    info!(%report, "stock price update finished");
    report
}

/// One full market cycle: roll events, publish their news, then advance
/// prices with the aggregate impacts feeding the price step.
pub fn run_market_cycle<R: Rng + ?Sized>(
    world: &mut WorldState,
    date: NaiveDate,
    force: bool,
    probability_override: Option<u8>,
    rng: &mut R,
) -> Result<JobReport, JobError> {
    let triggered = roll_events(&world.events, probability_override, rng)?;
    let news: Vec<News> = triggered
        .iter()
        .map(|tpl| news_from_template(tpl, date))
        .collect();
    let impacts = accumulate_impacts(&triggered, &world.event_impacts, &world.stocks);

    let published = news.len();
    world.news.extend(news);

    let mut report = advance_stock_prices(world, date, force, &impacts, rng);
    report.job = "market cycle";
    report.news_published = published;
    Ok(report)
}

/// Manually trigger a one-off event. Bypasses the probability roll: the
/// event always fires, publishes news, and applies its impact to every
/// stock in the target industry immediately, idempotency guard ignored.
pub fn trigger_market_event<R: Rng + ?Sized>(
    world: &mut WorldState,
    date: NaiveDate,
    spec: &FlashEventSpec,
    rng: &mut R,
) -> JobReport {
    let mut report = JobReport::new("manual event");
    let Some(flash) = instantiate_flash_event(spec, &world.industries, date, rng) else {
        return report;
    };

    let mut updates = Vec::new();
    for stock in world.stocks.iter().filter(|s| s.industry == flash.industry) {
        let step = price_step(stock.current_price, Decimal::ZERO, flash.impact_percentage);
        updates.push(StockUpdate {
            stock: stock.id,
            step,
        });
        report.processed += 1;
    }

    world.news.push(flash.news);
    report.news_published = 1;
    apply_stock_updates(world, date, updates);
    info!(industry = ?flash.industry, impact = %flash.impact_percentage, "manual event applied");
    report
}
