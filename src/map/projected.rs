use super::geometry::{self, Polygon, Ring};
use super::projection::{AlbersUsa, Viewport};
use super::shapes::{LonLatRing, MapShapes};
use super::spatial::FeatureGrid;
use crate::engine::{Centroid, GeometryProjector};
use crate::region::RegionId;
use glam::DVec2;
use rayon::prelude::*;
use std::collections::HashMap;

/// Pixel cell size for the hover hit-test grid
const HIT_GRID_CELL: f64 = 16.0;

/// A county projected onto the canvas
#[derive(Debug, Clone)]
pub struct ProjectedCounty {
    pub id: RegionId,
    pub polygons: Vec<Polygon>,
    /// Pixel bounding box, NaN when nothing projected
    pub min: DVec2,
    pub max: DVec2,
    /// NaN when the county lies outside the projection
    pub centroid: Centroid,
}

/// Snapshot of all map geometry for one viewport size.
///
/// Rebuilt from scratch whenever the viewport changes; centroids are
/// computed once per build and serve every selection until the next one.
pub struct ProjectedMap {
    viewport: Viewport,
    counties: Vec<ProjectedCounty>,
    index: HashMap<RegionId, usize>,
    states: Vec<Ring>,
    grid: FeatureGrid,
}

impl ProjectedMap {
    pub fn build(shapes: &MapShapes, viewport: Viewport) -> Self {
        let projection = AlbersUsa::fit(viewport);
        let project_ring = |ring: &LonLatRing| -> Ring {
            ring.iter().map(|&(lon, lat)| projection.project(lon, lat)).collect()
        };

        let counties: Vec<ProjectedCounty> = shapes
            .counties
            .par_iter()
            .map(|shape| {
                let polygons: Vec<Polygon> = shape
                    .polygons
                    .iter()
                    .map(|rings| rings.iter().map(&project_ring).collect())
                    .collect();
                let (min, max) = geometry::bounds(polygons.iter().flatten().flatten().copied())
                    .unwrap_or((DVec2::NAN, DVec2::NAN));
                let centroid = geometry::centroid(&polygons);
                ProjectedCounty {
                    id: shape.id,
                    polygons,
                    min,
                    max,
                    centroid,
                }
            })
            .collect();

        let states = shapes.states.par_iter().map(&project_ring).collect();

        let index = counties.iter().enumerate().map(|(idx, c)| (c.id, idx)).collect();
        let grid = FeatureGrid::build(
            counties.iter().enumerate().map(|(idx, c)| (idx, c.min, c.max)),
            HIT_GRID_CELL,
        );

        Self {
            viewport,
            counties,
            index,
            states,
            grid,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn counties(&self) -> &[ProjectedCounty] {
        &self.counties
    }

    pub fn county(&self, id: &RegionId) -> Option<&ProjectedCounty> {
        self.index.get(id).map(|&idx| &self.counties[idx])
    }

    pub fn states(&self) -> &[Ring] {
        &self.states
    }

    /// County under a canvas pixel, if any
    pub fn county_at(&self, p: DVec2) -> Option<RegionId> {
        self.grid
            .query_point(p)
            .iter()
            .map(|&idx| &self.counties[idx])
            .find(|c| c.polygons.iter().any(|polygon| geometry::polygon_contains(polygon, p)))
            .map(|c| c.id)
    }
}

impl GeometryProjector for ProjectedMap {
    fn regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.counties.iter().map(|c| c.id)
    }

    fn centroid(&self, id: &RegionId) -> Option<Centroid> {
        self.county(id).map(|c| c.centroid)
    }
}
