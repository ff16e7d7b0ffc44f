use super::{accumulate, is_valid_centroid, rank, Candidate, GeometryProjector, RankedRegion, SelectionResult};
use crate::region::{RegionCatalog, RegionId};
use tracing::debug;

/// Selection engine bound to one catalog and one projection state.
///
/// Holds no mutable state: `select` is a pure function of its arguments and
/// the borrowed catalog/projector, so it is cheap to rebuild whenever the
/// projector is rebuilt.
pub struct SelectionEngine<'a, P> {
    catalog: &'a RegionCatalog,
    projector: &'a P,
}

impl<'a, P: GeometryProjector> SelectionEngine<'a, P> {
    pub fn new(catalog: &'a RegionCatalog, projector: &'a P) -> Self {
        Self { catalog, projector }
    }

    /// Nearest counties around `anchor` whose combined population first
    /// reaches `target`.
    ///
    /// Returns an empty result when the target is zero, the anchor has no
    /// population record, or the anchor has no valid centroid.
    pub fn select(&self, anchor: &RegionId, target: u64) -> SelectionResult {
        if target == 0 {
            return SelectionResult::empty();
        }

        let ranked = self.ranked(anchor);
        let result = accumulate(&ranked, target);

        debug!(
            anchor = %anchor,
            target,
            candidates = ranked.len(),
            selected = result.len(),
            achieved = result.achieved_total,
            "selection"
        );
        result
    }

    /// Every eligible county ranked by distance from `anchor`.
    ///
    /// Counties without a population record are left out entirely, as are
    /// counties whose centroid falls outside the projection.
    pub fn ranked(&self, anchor: &RegionId) -> Vec<RankedRegion> {
        if self.catalog.get(anchor).is_none() {
            return Vec::new();
        }
        let Some(origin) = self.projector.centroid(anchor).filter(|c| is_valid_centroid(*c)) else {
            return Vec::new();
        };

        let candidates: Vec<Candidate> = self
            .projector
            .regions()
            .filter_map(|id| {
                let population = self.catalog.population(&id)?;
                let centroid = self.projector.centroid(&id)?;
                Some(Candidate { id, centroid, population })
            })
            .collect();

        rank(origin, candidates)
    }
}
