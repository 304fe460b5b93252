//! Real-estate entities: purchasable listings, user holdings and the
//! category enums driving the yield and vacancy tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{HoldingId, ListingId, UserId, ValidationError};

/// Qualitative land-demand trend. Drives the purchase multiplier, yield
/// range and vacancy tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandDemand {
    Rising,
    Normal,
    Falling,
}

/// Building-age bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingAge {
    New,
    SemiNew,
    Old,
}

/// Qualitative read of the rent market, rolled each monthly cycle
/// independently of land demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvaluation {
    Good,
    Normal,
    Bad,
}

/// Kind of property a listing offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Office,
    House,
}

/// Whether a listing can currently be bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Available,
    Sold,
}

/// An available-for-purchase property template.
///
/// Monetary fields are in yen; `management_rate` and `reserve_rate` are yen
/// per unit area per month.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub property_name: String,
    pub property_type: PropertyType,
    pub base_price: Decimal,
    pub land_demand: LandDemand,
    pub building_age: BuildingAge,
    pub area: Decimal,
    pub management_rate: Decimal,
    pub reserve_rate: Decimal,
    pub status: ListingStatus,
}

/// A user's purchased real-estate position.
///
/// While held, `loan_balance` only decreases and never drops below zero and
/// `vacancy_rate` stays within [0, 100]. Once `is_sold` flips, the holding
/// is frozen except for historical reads; the trading boundary resets the
/// source listing to available at that point.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Holding {
    pub id: HoldingId,
    pub owner: UserId,
    /// Source listing; `None` after the listing was deleted.
    pub listing: Option<ListingId>,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub loan_balance: Decimal,
    pub total_loan_amount: Decimal,
    /// Straight-line weekly principal, fixed at purchase time and never
    /// recalculated.
    pub weekly_principal: Decimal,
    /// Monthly rent after the user's rent adjustment.
    pub current_rent: Decimal,
    /// User-set deviation from market rent, percent. Preserved across the
    /// monthly rent-market re-roll.
    pub rent_change_rate: Decimal,
    pub vacancy_rate: Decimal,
    pub yield_rate: Decimal,
    /// Monthly running cost in yen captured at purchase; fee-split fallback
    /// once the source listing is gone.
    pub management_cost: Decimal,
    pub weeks_owned: u32,
    pub is_sold: bool,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
}

/// Validate a listing's monetary and physical fields.
pub fn validate_listing(listing: &Listing) -> Result<(), ValidationError> {
    if listing.property_name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if listing.base_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    if listing.area <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveArea);
    }
    if listing.management_rate < Decimal::ZERO || listing.reserve_rate < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney);
    }
    Ok(())
}

/// Validate a holding's loan and vacancy invariants.
pub fn validate_holding(holding: &Holding) -> Result<(), ValidationError> {
    if holding.purchase_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    if holding.loan_balance < Decimal::ZERO
        || holding.total_loan_amount < Decimal::ZERO
        || holding.weekly_principal < Decimal::ZERO
    {
        return Err(ValidationError::NegativeMoney);
    }
    if holding.loan_balance > holding.total_loan_amount {
        return Err(ValidationError::LoanExceedsTotal(holding.id));
    }
    let hundred = Decimal::ONE_HUNDRED;
    if holding.vacancy_rate < Decimal::ZERO || holding.vacancy_rate > hundred {
        return Err(ValidationError::VacancyOutOfRange(holding.id));
    }
    Ok(())
}
