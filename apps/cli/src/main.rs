#![deny(warnings)]

//! Headless scheduler entry point: loads (or seeds) a world snapshot, runs
//! one period job, prints the report and saves the snapshot back.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use sim_core::{validate_world, ImpactPolarity};
use sim_market::FlashEventSpec;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    job: Option<String>,
    date: Option<NaiveDate>,
    seed: u64,
    force: bool,
    probability: Option<u8>,
    snapshot: String,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        job: None,
        date: None,
        seed: 42,
        force: false,
        probability: None,
        snapshot: persistence::default_snapshot_path().to_string(),
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--job" => args.job = it.next(),
            "--date" => {
                args.date = it
                    .next()
                    .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
            }
            "--seed" => {
                if let Some(s) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = s;
                }
            }
            "--probability" => args.probability = it.next().and_then(|s| s.parse().ok()),
            "--force" => args.force = true,
            "--snapshot" => {
                if let Some(p) = it.next() {
                    args.snapshot = p;
                }
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args()?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut world = match persistence::load_snapshot(&args.snapshot) {
        Ok(world) => world,
        Err(err) => {
            info!(%err, "no usable snapshot, seeding a demo world");
            persistence::seed_demo_world(args.seed)
        }
    };
    validate_world(&world)?;

    let job = args.job.as_deref().unwrap_or("market");
    let report = match job {
        "market" => {
            sim_runtime::run_market_cycle(&mut world, date, args.force, args.probability, &mut rng)?
        }
        "event-now" => {
            let spec = FlashEventSpec {
                title: "Flash market shock".to_string(),
                description: "Manually triggered market movement".to_string(),
                polarity: ImpactPolarity::Negative,
                industry: None,
                min_impact: Decimal::new(100, 2),
                max_impact: Decimal::new(500, 2),
            };
            sim_runtime::trigger_market_event(&mut world, date, &spec, &mut rng)
        }
        "weekly" => sim_runtime::run_weekly_cycle(&mut world, date, args.force, &mut rng)?,
        "monthly" => sim_runtime::run_monthly_cycle(&mut world, date, args.force, &mut rng)?,
        other => bail!("unknown job: {other} (expected market|event-now|weekly|monthly)"),
    };

    validate_world(&world)?;
    persistence::save_snapshot(&args.snapshot, &world)?;

    println!("{date} | {report}");
    Ok(())
}
