use glam::Vec2;
use ndarray::ArrayViewMut1;

use super::neighbors::NeighborList;

/// Pushes apart every listed pair that is closer than `min_dist`, half the overlap each.
///
/// Pairs are visited in index order using the neighbor lists built before integration, and each
/// correction is written back before the next pair is read. Returns the number of corrected pairs.
pub fn resolve_overlaps(
    mut positions: ArrayViewMut1<'_, Vec2>,
    neighbors: &[NeighborList],
    min_dist: f32,
) -> usize {
    let min_dist2 = min_dist * min_dist;
    let mut corrected = 0;

    for (i, list) in neighbors.iter().enumerate() {
        for &j in list {
            let delta = positions[j] - positions[i];
            let d2 = delta.length_squared();
            if d2 >= min_dist2 || d2 == 0.0 {
                continue;
            }

            let d = d2.sqrt();
            let shift = delta * (0.5 * (min_dist - d) / d);

            positions[i] -= shift;
            positions[j] += shift;
            corrected += 1;
        }
    }

    corrected
}
