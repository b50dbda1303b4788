//! Vending machine dataset.
//!
//! Loaded once at startup, either from the JSON file compiled into the
//! library or from a file on disk, and never mutated afterwards.

mod loader;

use anyhow::Result;
use chrono::{DateTime, Utc};
use geo::{BoundingRect, MultiPoint, Point};
use tracing::{info, warn};

use crate::models::{GeoBbox, GeoPoint, NearestResult, VendingMachine};
use crate::resolver::{find_nearest, ResolveError};

pub use loader::{load_machines, DatasetFormat};

const BUNDLED_JSON: &str = include_str!("../../data/automaatit.json");

/// Immutable, ordered list of machines
#[derive(Debug, Clone)]
pub struct Dataset {
    machines: Vec<VendingMachine>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Parse the dataset bundled with the library
    pub fn bundled() -> Result<Self> {
        let machines = loader::parse_json(BUNDLED_JSON.as_bytes())?;
        Ok(Self::from_machines(machines, "bundled"))
    }

    /// Load a dataset file (`.json`, `.csv`, optionally `.gz` compressed)
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let machines = load_machines(path)?;
        Ok(Self::from_machines(machines, &path.display().to_string()))
    }

    /// Build a dataset, dropping records with out-of-range coordinates
    pub fn from_machines(machines: Vec<VendingMachine>, source: &str) -> Self {
        let total = machines.len();
        let machines: Vec<VendingMachine> = machines
            .into_iter()
            .enumerate()
            .filter_map(|(idx, m)| {
                if m.point().is_valid() {
                    Some(m)
                } else {
                    warn!(
                        "Skipping record {} ({}): invalid coordinate {}",
                        idx,
                        m.street_address,
                        m.point()
                    );
                    None
                }
            })
            .collect();

        info!(
            "Loaded {} machines from {} ({} skipped)",
            machines.len(),
            source,
            total - machines.len()
        );

        Self {
            machines,
            source: source.to_string(),
            loaded_at: Utc::now(),
        }
    }

    pub fn machines(&self) -> &[VendingMachine] {
        &self.machines
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Where the data came from ("bundled" or a file path)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Bounding box of all machine locations
    pub fn bbox(&self) -> Option<GeoBbox> {
        let points: MultiPoint<f64> = self
            .machines
            .iter()
            .map(|m| Point::from(m.point()))
            .collect();
        points
            .bounding_rect()
            .map(|rect| GeoBbox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Nearest machine to `query`
    pub fn nearest(&self, query: GeoPoint) -> Result<NearestResult, ResolveError> {
        find_nearest(query, &self.machines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(lat: f64, lon: f64) -> VendingMachine {
        VendingMachine {
            lat,
            lon,
            street_address: format!("{} {}", lat, lon),
            postal_code: "00100".to_string(),
            postal_locality: "HELSINKI".to_string(),
        }
    }

    #[test]
    fn test_bundled_parses() {
        let dataset = Dataset::bundled().unwrap();
        assert!(!dataset.is_empty());
        assert_eq!(dataset.source(), "bundled");
        assert!(dataset.machines().iter().all(|m| m.point().is_valid()));
    }

    #[test]
    fn test_bundled_nearest_from_turku() {
        let dataset = Dataset::bundled().unwrap();
        let result = dataset.nearest(GeoPoint::new(60.4518, 22.2666)).unwrap();
        assert_eq!(result.machine.postal_locality, "TURKU");
        assert!(result.distance_km < 1.0);
    }

    #[test]
    fn test_invalid_records_skipped() {
        let dataset = Dataset::from_machines(
            vec![machine(60.0, 25.0), machine(120.0, 25.0), machine(61.0, f64::NAN)],
            "test",
        );
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.machines()[0].lat, 60.0);
    }

    #[test]
    fn test_bbox() {
        let dataset = Dataset::from_machines(
            vec![machine(60.0, 25.0), machine(61.5, 22.0), machine(65.0, 25.5)],
            "test",
        );
        let bbox = dataset.bbox().unwrap();
        assert_eq!(bbox, GeoBbox::new(22.0, 60.0, 25.5, 65.0));
        assert!(dataset.machines().iter().all(|m| bbox.contains(m.point())));
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::from_machines(vec![], "empty");
        assert!(dataset.bbox().is_none());
        assert_eq!(
            dataset.nearest(GeoPoint::new(60.0, 25.0)).unwrap_err(),
            ResolveError::EmptyCandidateSet
        );
    }
}
