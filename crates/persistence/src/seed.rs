//! Deterministic demo world used by the CLI when no snapshot exists yet.

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use sim_core::{
    BuildingAge, EventCategory, EventId, EventImpact, EventTemplate, Holding, HoldingId,
    ImpactPolarity, ImpactTarget, Industry, IndustryId, LandDemand, Listing, ListingId,
    ListingStatus, PropertyType, Stock, StockId, UserAccount, UserId, WorldState,
};

fn stock(id: u64, industry: u64, name: &str, price_yen: i64) -> Stock {
    let price = Decimal::new(price_yen, 0);
    Stock {
        id: StockId(id),
        industry: IndustryId(industry),
        name: name.to_string(),
        current_price: price,
        min_price: (price * Decimal::new(6, 1)).round_dp(2),
        max_price: (price * Decimal::new(14, 1)).round_dp(2),
        updated_on: None,
    }
}

/// Build a small but fully cross-referenced world. The seed jitters the
/// initial stock prices so different saves do not all start identical;
/// everything else is fixed reference data.
pub fn seed_demo_world(seed: u64) -> WorldState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = WorldState {
        industries: vec![
            Industry {
                id: IndustryId(1),
                name: "Technology".to_string(),
            },
            Industry {
                id: IndustryId(2),
                name: "Energy".to_string(),
            },
            Industry {
                id: IndustryId(3),
                name: "Real Estate".to_string(),
            },
        ],
        stocks: vec![
            stock(1, 1, "Acme Robotics", rng.gen_range(800..1200)),
            stock(2, 1, "Nimbus Cloudware", rng.gen_range(1500..2500)),
            stock(3, 2, "Bolt Petroleum", rng.gen_range(400..700)),
            stock(4, 2, "Helios Solar", rng.gen_range(900..1400)),
            stock(5, 3, "Keystone Estates", rng.gen_range(600..1000)),
            stock(6, 3, "Harbor Development", rng.gen_range(1100..1800)),
        ],
        events: vec![
            EventTemplate {
                id: EventId(1),
                title: "Breakthrough chip announced".to_string(),
                description: "A domestic fab ships a process two generations ahead of schedule."
                    .to_string(),
                category: EventCategory::Industry,
                polarity: ImpactPolarity::Positive,
                probability_weight: 10,
                active: true,
            },
            EventTemplate {
                id: EventId(2),
                title: "Crude supply disruption".to_string(),
                description: "Shipping lanes close and spot prices spike overnight.".to_string(),
                category: EventCategory::Economy,
                polarity: ImpactPolarity::Positive,
                probability_weight: 8,
                active: true,
            },
            EventTemplate {
                id: EventId(3),
                title: "Property tax reform".to_string(),
                description: "A surprise levy on second homes cools the housing market."
                    .to_string(),
                category: EventCategory::Policy,
                polarity: ImpactPolarity::Negative,
                probability_weight: 6,
                active: true,
            },
            EventTemplate {
                id: EventId(4),
                title: "Data-center outage".to_string(),
                description: "A regional blackout takes major cloud platforms offline."
                    .to_string(),
                category: EventCategory::Disaster,
                polarity: ImpactPolarity::Negative,
                probability_weight: 5,
                active: true,
            },
        ],
        event_impacts: vec![
            EventImpact {
                event: EventId(1),
                target: ImpactTarget::Industry(IndustryId(1)),
                impact_percentage: Decimal::new(300, 2),
            },
            EventImpact {
                event: EventId(2),
                target: ImpactTarget::Industry(IndustryId(2)),
                impact_percentage: Decimal::new(400, 2),
            },
            EventImpact {
                event: EventId(3),
                target: ImpactTarget::Industry(IndustryId(3)),
                impact_percentage: Decimal::new(-250, 2),
            },
            EventImpact {
                event: EventId(4),
                target: ImpactTarget::Stock(StockId(2)),
                impact_percentage: Decimal::new(-350, 2),
            },
        ],
        listings: vec![
            Listing {
                id: ListingId(1),
                property_name: "Sunrise Heights 203".to_string(),
                property_type: PropertyType::Apartment,
                base_price: Decimal::new(9_000_000, 0),
                land_demand: LandDemand::Rising,
                building_age: BuildingAge::SemiNew,
                area: Decimal::new(45, 0),
                management_rate: Decimal::new(220, 0),
                reserve_rate: Decimal::new(130, 0),
                status: ListingStatus::Sold,
            },
            Listing {
                id: ListingId(2),
                property_name: "Cedar Court House".to_string(),
                property_type: PropertyType::House,
                base_price: Decimal::new(14_000_000, 0),
                land_demand: LandDemand::Normal,
                building_age: BuildingAge::Old,
                area: Decimal::new(80, 0),
                management_rate: Decimal::new(150, 0),
                reserve_rate: Decimal::new(120, 0),
                status: ListingStatus::Available,
            },
            Listing {
                id: ListingId(3),
                property_name: "Harborview Office 5F".to_string(),
                property_type: PropertyType::Office,
                base_price: Decimal::new(22_000_000, 0),
                land_demand: LandDemand::Falling,
                building_age: BuildingAge::New,
                area: Decimal::new(120, 0),
                management_rate: Decimal::new(300, 0),
                reserve_rate: Decimal::new(180, 0),
                status: ListingStatus::Available,
            },
        ],
        holdings: vec![Holding {
            id: HoldingId(1),
            owner: UserId(1),
            listing: Some(ListingId(1)),
            // Purchase price per the valuation tables: 9M x 2.0 x 0.8.
            purchase_price: Decimal::new(14_400_000, 0),
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap_or_default(),
            loan_balance: Decimal::new(10_000_000, 0),
            total_loan_amount: Decimal::new(10_000_000, 0),
            weekly_principal: Decimal::new(48_077, 0),
            current_rent: Decimal::new(66_000, 0),
            rent_change_rate: Decimal::ZERO,
            vacancy_rate: Decimal::new(5, 0),
            yield_rate: Decimal::new(550, 2),
            management_cost: Decimal::new(15_750, 0),
            weeks_owned: 0,
            is_sold: false,
            sale_price: None,
            sale_date: None,
        }],
        accounts: vec![
            UserAccount {
                id: UserId(1),
                balance: Decimal::new(2_000_000, 0),
            },
            UserAccount {
                id: UserId(2),
                balance: Decimal::new(5_000_000, 0),
            },
        ],
        ..WorldState::default()
    };
    world
        .interest_rates
        .set_rate(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap_or_default(), Decimal::new(150, 2));
    world
}
