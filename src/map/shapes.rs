use crate::region::RegionId;
use std::collections::HashMap;

/// A ring of (lon, lat) coordinates
pub type LonLatRing = Vec<(f64, f64)>;

/// Rings of one polygon: exterior first, then holes
pub type LonLatPolygon = Vec<LonLatRing>;

/// Unprojected county boundary
#[derive(Debug, Clone, PartialEq)]
pub struct CountyShape {
    pub id: RegionId,
    pub polygons: Vec<LonLatPolygon>,
}

/// Everything loaded from the geometry datasets, in file order
#[derive(Debug, Default, Clone)]
pub struct MapShapes {
    pub counties: Vec<CountyShape>,
    /// State outlines, drawn only
    pub states: Vec<LonLatRing>,
    index: HashMap<RegionId, usize>,
}

impl MapShapes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add county polygons, merging into an earlier shape with the same id
    pub fn add_county(&mut self, id: RegionId, polygons: Vec<LonLatPolygon>) {
        match self.index.get(&id) {
            Some(&idx) => self.counties[idx].polygons.extend(polygons),
            None => {
                self.index.insert(id, self.counties.len());
                self.counties.push(CountyShape { id, polygons });
            }
        }
    }

    pub fn add_state(&mut self, ring: LonLatRing) {
        self.states.push(ring);
    }

    pub fn has_data(&self) -> bool {
        !self.counties.is_empty()
    }
}
