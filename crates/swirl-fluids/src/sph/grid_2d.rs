use std::collections::HashMap;

use glam::{IVec2, Vec2};
use ndarray::ArrayView1;

/// Uniform bucket grid over the plane, rebuilt from scratch every tick.
///
/// Cells are keyed by `floor(position / cell_size)` and are unbounded, so particles outside the
/// domain still land in a bucket.
#[derive(Debug, Clone)]
pub struct SpatialGrid2D {
    cell_size: f32,
    /// Particle indices per cell, in increasing index order.
    buckets: HashMap<IVec2, Vec<usize>>,
    /// Cell of each particle as of the last rebuild.
    particle_cells: Vec<IVec2>,
}

impl SpatialGrid2D {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            buckets: HashMap::new(),
            particle_cells: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cell_at(&self, p: Vec2) -> IVec2 {
        (p / self.cell_size).floor().as_ivec2()
    }

    pub fn rebuild(&mut self, positions: ArrayView1<'_, Vec2>) {
        // Keep the allocations of cells that were occupied before.
        self.buckets.values_mut().for_each(Vec::clear);
        self.particle_cells.clear();

        for (i, &p) in positions.iter().enumerate() {
            let cell = self.cell_at(p);
            self.buckets.entry(cell).or_default().push(i);
            self.particle_cells.push(cell);
        }
    }

    /// The cell particle `i` was placed in by the last rebuild.
    #[inline(always)]
    pub fn cell_of(&self, i: usize) -> IVec2 {
        self.particle_cells[i]
    }

    /// Particles in `cell`, in increasing index order.
    #[inline]
    pub fn bucket(&self, cell: IVec2) -> &[usize] {
        self.buckets.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All non-empty buckets.
    pub fn iter_buckets(&self) -> impl Iterator<Item = (IVec2, &[usize])> {
        self.buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(&cell, bucket)| (cell, bucket.as_slice()))
    }

    /// Number of particles placed by the last rebuild.
    pub fn len(&self) -> usize {
        self.particle_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particle_cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::aview1;

    use super::*;

    #[test]
    fn places_particles_by_floor() {
        let positions = [
            Vec2::new(0.5, 0.5),
            Vec2::new(10.5, 0.0),
            Vec2::new(-0.1, -19.9),
        ];

        let mut grid = SpatialGrid2D::new(10.0);
        grid.rebuild(aview1(&positions));

        assert_eq!(grid.cell_of(0), IVec2::new(0, 0));
        assert_eq!(grid.cell_of(1), IVec2::new(1, 0));
        assert_eq!(grid.cell_of(2), IVec2::new(-1, -2));
        assert_eq!(grid.bucket(IVec2::new(-1, -2)), &[2]);
    }

    #[test]
    fn bucket_order_follows_index_order() {
        let positions = [
            Vec2::new(1.0, 1.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
        ];

        let mut grid = SpatialGrid2D::new(10.0);
        grid.rebuild(aview1(&positions));

        assert_eq!(grid.bucket(IVec2::ZERO), &[0, 2, 3]);
        assert_eq!(grid.bucket(IVec2::new(5, 5)), &[1]);
    }

    #[test]
    fn rebuild_discards_previous_contents() {
        let mut grid = SpatialGrid2D::new(10.0);
        grid.rebuild(aview1(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]));
        grid.rebuild(aview1(&[Vec2::new(15.0, 1.0), Vec2::new(2.0, 2.0)]));

        assert_eq!(grid.bucket(IVec2::ZERO), &[1]);
        assert_eq!(grid.bucket(IVec2::new(1, 0)), &[0]);
        assert_eq!(grid.iter_buckets().map(|(_, b)| b.len()).sum::<usize>(), 2);
    }

    #[test]
    fn empty_cells_have_empty_buckets() {
        let grid = SpatialGrid2D::new(10.0);
        assert!(grid.bucket(IVec2::new(7, -3)).is_empty());
        assert!(grid.is_empty());
    }
}
