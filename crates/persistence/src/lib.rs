#![deny(warnings)]

//! Snapshot persistence for [`sim_core::WorldState`] and demo-world seeding.
//!
//! Snapshots come in two flavors: JSON for anything a human might want to
//! inspect or hand-edit, bincode for compact saves. The format is chosen by
//! file extension.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use sim_core::WorldState;

mod seed;

pub use seed::seed_demo_world;

/// Default location for the local save file.
pub fn default_snapshot_path() -> &'static str {
    "./saves/world.json"
}

/// Snapshot I/O and encoding errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Write a snapshot, creating parent directories as needed. `.json` paths
/// get pretty-printed JSON, anything else bincode.
pub fn save_snapshot<P: AsRef<Path>>(path: P, world: &WorldState) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if is_json(path) {
        fs::write(path, serde_json::to_vec_pretty(world)?)?;
    } else {
        fs::write(path, bincode::serialize(world)?)?;
    }
    info!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Read a snapshot written by [`save_snapshot`].
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<WorldState, SnapshotError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let world = if is_json(path) {
        serde_json::from_slice(&bytes)?
    } else {
        bincode::deserialize(&bytes)?
    };
    info!(path = %path.display(), "snapshot loaded");
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::validate_world;

    #[test]
    fn demo_world_validates() {
        let world = seed_demo_world(42);
        validate_world(&world).unwrap();
        assert!(!world.stocks.is_empty());
        assert!(!world.holdings.is_empty());
        assert!(!world.events.is_empty());
    }

    #[test]
    fn json_snapshot_roundtrip() {
        let dir = std::env::temp_dir().join("sim-snapshot-json-test");
        let path = dir.join("world.json");
        let world = seed_demo_world(42);
        save_snapshot(&path, &world).unwrap();
        let back = load_snapshot(&path).unwrap();
        assert_eq!(back.stocks.len(), world.stocks.len());
        assert_eq!(back.holdings.len(), world.holdings.len());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn binary_snapshot_roundtrip() {
        let dir = std::env::temp_dir().join("sim-snapshot-bin-test");
        let path = dir.join("world.save");
        let world = seed_demo_world(7);
        save_snapshot(&path, &world).unwrap();
        let back = load_snapshot(&path).unwrap();
        assert_eq!(back.stocks.len(), world.stocks.len());
        assert_eq!(
            back.interest_rates.current_rate(
                chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
            ),
            world
                .interest_rates
                .current_rate(chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_snapshot_is_an_io_error() {
        let err = load_snapshot("./does/not/exist.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
