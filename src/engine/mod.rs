//! Region-selection engine: rank counties by planar distance from an anchor
//! county and take the nearest ones until their combined population reaches
//! a target.

mod accumulate;
mod rank;
mod select;

pub use accumulate::accumulate;
pub use rank::{rank, Candidate, RankedRegion};
pub use select::SelectionEngine;

use crate::region::RegionId;
use glam::DVec2;

/// Planar coordinate in the units of the active map projection
pub type Centroid = DVec2;

/// A centroid is usable only when both components are real numbers.
/// Projections report geometry outside their extent as NaN.
#[inline(always)]
pub fn is_valid_centroid(c: Centroid) -> bool {
    c.x.is_finite() && c.y.is_finite()
}

/// Source of per-region centroids for one projection state.
///
/// Implementations are rebuilt whenever the projection changes; the engine
/// never keeps centroids past a single `select` call.
pub trait GeometryProjector {
    /// Regions that have geometry, in geometry order. This order is the
    /// tie-break order for equal distances.
    fn regions(&self) -> impl Iterator<Item = RegionId> + '_;

    /// Projected centroid, or `None` when the region has no geometry.
    /// A present centroid may still be invalid (NaN).
    fn centroid(&self, id: &RegionId) -> Option<Centroid>;
}

/// Outcome of one selection: counties in ascending distance order plus
/// their combined population
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    pub selected: Vec<RegionId>,
    pub achieved_total: u64,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, id: &RegionId) -> bool {
        self.selected.contains(id)
    }

    /// How far the selection falls short of `target` (0 when reached)
    pub fn shortfall(&self, target: u64) -> u64 {
        target.saturating_sub(self.achieved_total)
    }
}
