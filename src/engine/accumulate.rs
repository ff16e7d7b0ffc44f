use super::{RankedRegion, SelectionResult};

/// Take ranked regions in order until the running population total is at
/// least `target`.
///
/// The threshold is inclusive. Running out of regions is not an error: the
/// result then holds every ranked region and whatever total they reach.
/// A zero target selects nothing.
pub fn accumulate(ranked: &[RankedRegion], target: u64) -> SelectionResult {
    let mut result = SelectionResult::empty();
    if target == 0 {
        return result;
    }

    for region in ranked {
        result.selected.push(region.id);
        result.achieved_total = result.achieved_total.saturating_add(region.population);

        if result.achieved_total >= target {
            break;
        }
    }

    result
}
