use super::{AreaCode, Region, RegionId};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// One row of the county population dataset
#[derive(Debug, Clone, Deserialize)]
pub struct PopulationRecord {
    pub fips: AreaCode,
    #[serde(default)]
    pub county_name: String,
    #[serde(default)]
    pub state_name: String,
    /// Missing, null and negative values (Census placeholders) count as 0
    #[serde(default)]
    pub population: Option<i64>,
}

impl PopulationRecord {
    /// Population as a count; unusable values become 0 with a warning
    fn population_or_zero(&self) -> u64 {
        match self.population.map(u64::try_from) {
            Some(Ok(population)) => population,
            _ => {
                warn!(code = ?self.fips, population = ?self.population, "population missing or negative, counting as 0");
                0
            }
        }
    }
}

/// Read-only lookup from normalized county code to county attributes
#[derive(Debug, Default, Clone)]
pub struct RegionCatalog {
    regions: HashMap<RegionId, Region>,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from raw population records.
    /// Later duplicates replace earlier ones; unusable codes are skipped.
    pub fn from_records(records: impl IntoIterator<Item = PopulationRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            let Some(id) = RegionId::normalize(record.fips.clone()) else {
                warn!(code = ?record.fips, "skipping population record with invalid area code");
                continue;
            };
            let population = record.population_or_zero();
            catalog.insert(Region {
                id,
                population,
                name: record.county_name,
                parent_name: record.state_name,
            });
        }
        catalog
    }

    /// Insert a region, replacing any existing entry with the same id
    pub fn insert(&mut self, region: Region) {
        if let Some(old) = self.regions.insert(region.id, region) {
            warn!(id = %old.id, "duplicate region id, keeping the later record");
        }
    }

    /// Look up by any area code encoding; the code is normalized first
    pub fn lookup(&self, code: impl Into<AreaCode>) -> Option<&Region> {
        RegionId::normalize(code).and_then(|id| self.get(&id))
    }

    /// Look up by an already-normalized id
    #[inline]
    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn population(&self, id: &RegionId) -> Option<u64> {
        self.get(id).map(|r| r.population)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }
}

impl FromIterator<Region> for RegionCatalog {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for region in iter {
            catalog.insert(region);
        }
        catalog
    }
}
