use glam::{IVec2, Vec2};
use ndarray::ArrayView1;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::grid_2d::SpatialGrid2D;

/// Indices of the particles within the interaction radius of one particle.
pub type NeighborList = SmallVec<[usize; 32]>;

/// Offsets of the 3×3 block of cells around a particle's own cell.
const CELL_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 0),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

/// Fills `lists[i]` with every `j != i` in the 3×3 cell block around particle `i` whose squared
/// distance to `i` is below `radius²`.
///
/// Only complete when the grid's cell size is at least `radius`. Lists are directional: a tie on
/// the cutoff may put `j` in `i`'s list but not the reverse.
pub fn find_neighbors(
    grid: &SpatialGrid2D,
    positions: ArrayView1<'_, Vec2>,
    radius: f32,
    lists: &mut [NeighborList],
) {
    debug_assert!(grid.cell_size() >= radius);
    debug_assert_eq!(grid.len(), positions.len());

    let radius2 = radius * radius;

    lists.par_iter_mut().enumerate().for_each(|(i, list)| {
        list.clear();

        let p = positions[i];
        let cell = grid.cell_of(i);

        for offset in CELL_OFFSETS {
            for &j in grid.bucket(cell + offset) {
                if j != i && p.distance_squared(positions[j]) < radius2 {
                    list.push(j);
                }
            }
        }
    });
}
