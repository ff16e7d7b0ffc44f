use super::{is_valid_centroid, Centroid};
use crate::region::RegionId;
use rayon::prelude::*;

/// A county eligible for ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: RegionId,
    pub centroid: Centroid,
    pub population: u64,
}

/// A candidate with its distance from the anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRegion {
    pub id: RegionId,
    pub distance: f64,
    pub population: u64,
}

/// Rank candidates by Euclidean distance from `anchor`, nearest first.
///
/// Candidates with a NaN centroid are dropped. Equal distances keep their
/// input order (both the collect and the parallel sort are stable).
pub fn rank(anchor: Centroid, candidates: Vec<Candidate>) -> Vec<RankedRegion> {
    if !is_valid_centroid(anchor) {
        return Vec::new();
    }

    let mut ranked: Vec<RankedRegion> = candidates
        .into_par_iter()
        .filter(|c| is_valid_centroid(c.centroid))
        .map(|c| RankedRegion {
            id: c.id,
            distance: anchor.distance(c.centroid),
            population: c.population,
        })
        .collect();

    ranked.par_sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn candidate(code: &str, x: f64, y: f64) -> Candidate {
        Candidate {
            id: RegionId::normalize(code).unwrap(),
            centroid: DVec2::new(x, y),
            population: 1,
        }
    }

    fn ids(ranked: &[RankedRegion]) -> Vec<&str> {
        ranked.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_ascending() {
        let ranked = rank(
            DVec2::ZERO,
            vec![
                candidate("00003", 3.0, 4.0),
                candidate("00001", 0.0, 1.0),
                candidate("00002", -2.0, 0.0),
            ],
        );
        assert_eq!(ids(&ranked), vec!["00001", "00002", "00003"]);
        assert_eq!(ranked[2].distance, 5.0);
    }

    #[test]
    fn test_anchor_included_at_zero() {
        let ranked = rank(DVec2::new(2.0, 2.0), vec![candidate("00009", 3.0, 2.0), candidate("00001", 2.0, 2.0)]);
        assert_eq!(ranked[0].id.as_str(), "00001");
        assert_eq!(ranked[0].distance, 0.0);
    }

    #[test]
    fn test_invalid_centroids_dropped() {
        let ranked = rank(
            DVec2::ZERO,
            vec![
                candidate("00001", 1.0, 0.0),
                candidate("02013", f64::NAN, 10.0),
                candidate("15001", 3.0, f64::NAN),
            ],
        );
        assert_eq!(ids(&ranked), vec!["00001"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(
            DVec2::ZERO,
            vec![
                candidate("00005", 0.0, 1.0),
                candidate("00002", 1.0, 0.0),
                candidate("00009", -1.0, 0.0),
                candidate("00001", 0.0, -1.0),
            ],
        );
        assert_eq!(ids(&ranked), vec!["00005", "00002", "00009", "00001"]);
    }

    #[test]
    fn test_invalid_anchor_ranks_nothing() {
        let ranked = rank(DVec2::new(f64::NAN, f64::NAN), vec![candidate("00001", 1.0, 0.0)]);
        assert!(ranked.is_empty());
    }
}
