use glam::Vec2;
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Per-particle state as parallel arrays. Every array has the same length, fixed at construction.
#[derive(Debug, Clone)]
pub struct Particles {
    /// Particle positions.
    pub(crate) positions: Array1<Vec2>,
    /// Particle velocities.
    pub(crate) velocities: Array1<Vec2>,
    /// Kernel-weighted density, recomputed every tick.
    pub(crate) densities: Array1<f32>,
    /// Clipped pressure, recomputed every tick.
    pub(crate) pressures: Array1<f32>,
    /// Force accumulator, zeroed at the start of every tick.
    pub(crate) forces: Array1<Vec2>,

    /// Scratch buffer for velocity changes computed from a snapshot of the velocities.
    pub(crate) velocity_deltas: Array1<Vec2>,
    /// Positions at the start of integration.
    pub(crate) previous_positions: Array1<Vec2>,
}

impl Particles {
    pub fn new(positions: Vec<Vec2>, rest_density: f32) -> Self {
        let n = positions.len();

        Self {
            positions: Array1::from_vec(positions),
            velocities: Array1::from_elem(n, Vec2::ZERO),
            densities: Array1::from_elem(n, rest_density),
            pressures: Array1::zeros(n),
            forces: Array1::from_elem(n, Vec2::ZERO),
            velocity_deltas: Array1::from_elem(n, Vec2::ZERO),
            previous_positions: Array1::from_elem(n, Vec2::ZERO),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> ArrayView1<'_, Vec2> {
        self.positions.view()
    }

    pub fn velocities(&self) -> ArrayView1<'_, Vec2> {
        self.velocities.view()
    }

    pub fn velocities_mut(&mut self) -> ArrayViewMut1<'_, Vec2> {
        self.velocities.view_mut()
    }

    pub fn densities(&self) -> ArrayView1<'_, f32> {
        self.densities.view()
    }

    pub fn pressures(&self) -> ArrayView1<'_, f32> {
        self.pressures.view()
    }

    pub fn forces(&self) -> ArrayView1<'_, Vec2> {
        self.forces.view()
    }
}

/// Lays out `count` particles on a hexagonally offset lattice, starting at the bottom left of the
/// domain and filling rows inward from the boundary by `spacing`.
pub fn seed_block(count: usize, half_extent: f32, spacing: f32) -> Vec<Vec2> {
    let origin = Vec2::splat(-half_extent + spacing);
    let width = 2.0 * (half_extent - spacing);
    let dy = 3f32.sqrt() / 2.0 * spacing;
    let per_row = ((width / spacing).floor() as usize).max(1);

    (0..count)
        .map(|k| {
            let row = k / per_row;
            let col = k % per_row;
            let offset = if row % 2 == 0 { 0.0 } else { 0.5 * spacing };
            origin + Vec2::new(col as f32 * spacing + offset, row as f32 * dy)
        })
        .collect()
}
