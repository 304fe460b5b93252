#![deny(warnings)]

//! Market engines: bounded random-walk stock pricing, probability-rolled
//! market events, and the weekly interest-rate roll.
//!
//! Everything here is pure computation over borrowed domain state with an
//! injected seedable RNG; callers apply the returned outcomes to storage.

mod events;
mod rates;
mod stocks;

pub use events::{
    accumulate_impacts, instantiate_flash_event, news_from_template, roll_events, EventError,
    FlashEvent, FlashEventSpec,
};
pub use rates::{roll_weekly_rate, WEEKLY_RATE_MAX, WEEKLY_RATE_MIN};
pub use stocks::{price_step, roll_base_change, PriceStep, BASE_CHANGE_LIMIT};
