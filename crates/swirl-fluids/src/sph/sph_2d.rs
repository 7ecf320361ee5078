use glam::Vec2;
use log::{debug, info, warn};
use ndarray::{ArrayView1, ArrayViewMut1};

use crate::{pointer::PointerInput, Fluid, ParamsError, SphParams};

use super::{
    forces,
    grid_2d::SpatialGrid2D,
    integrate,
    neighbors::{find_neighbors, NeighborList},
    overlap::resolve_overlaps,
    particles::{seed_block, Particles},
    FluidStats,
    Stage,
};

/// A 2D smoothed-particle fluid with a fixed number of particles in an axis-aligned box.
#[derive(Debug, Clone)]
pub struct SphFluid2D {
    /// Validated parameters, fixed at construction.
    params: SphParams,
    particles: Particles,
    /// Bucket grid used for the neighbor search.
    grid: SpatialGrid2D,
    /// Neighbors of each particle, rebuilt at the start of every tick.
    neighbors: Vec<NeighborList>,
    /// Summary of the last tick.
    stats: FluidStats,
    /// Number of ticks run so far.
    ticks: u64,
}

impl SphFluid2D {
    /// Creates a fluid with `params.particle_count` particles packed into a block at the bottom
    /// left of the domain.
    pub fn new(params: &SphParams) -> Result<Self, ParamsError> {
        params.validate()?;

        let spacing = (2.0 * params.particle_radius).max(params.interaction_radius * 0.5);
        let positions = seed_block(params.particle_count, params.half_extent, spacing);

        Self::with_positions(params, positions)
    }

    /// Creates a fluid from explicit initial positions, one per particle.
    pub fn with_positions(params: &SphParams, positions: Vec<Vec2>) -> Result<Self, ParamsError> {
        params.validate()?;

        if positions.len() != params.particle_count {
            return Err(ParamsError::ParticleCount {
                expected: params.particle_count,
                actual: positions.len(),
            });
        }

        let n = positions.len();
        info!(
            "Creating SPH fluid with {n} particles, interaction radius {}, cell size {}",
            params.interaction_radius,
            params.cell_size(),
        );

        Ok(Self {
            params: params.clone(),
            particles: Particles::new(positions, params.rest_density),
            grid: SpatialGrid2D::new(params.cell_size()),
            neighbors: vec![NeighborList::new(); n],
            stats: FluidStats::default(),
            ticks: 0,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn velocities(&self) -> ArrayView1<'_, Vec2> {
        self.particles.velocities()
    }

    pub fn velocities_mut(&mut self) -> ArrayViewMut1<'_, Vec2> {
        self.particles.velocities_mut()
    }

    pub fn densities(&self) -> ArrayView1<'_, f32> {
        self.particles.densities()
    }

    pub fn pressures(&self) -> ArrayView1<'_, f32> {
        self.particles.pressures()
    }

    pub fn grid(&self) -> &SpatialGrid2D {
        &self.grid
    }

    /// Neighbors of particle `i` as of the last neighbor search.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    pub fn stats(&self) -> FluidStats {
        self.stats
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rebuilds the spatial grid and every neighbor list from the current positions.
    pub fn update_neighbors(&mut self) {
        self.grid.rebuild(self.particles.positions.view());
        find_neighbors(
            &self.grid,
            self.particles.positions.view(),
            self.params.interaction_radius,
            &mut self.neighbors,
        );
    }

    /// Runs a single stage of the force pipeline against the current neighbor lists.
    pub fn run_stage(&mut self, stage: Stage, dt: f32, pointer: Option<PointerInput>) {
        let params = &self.params;
        let particles = &mut self.particles;
        let neighbors = &self.neighbors;

        match stage {
            Stage::Density => forces::compute_densities(particles, neighbors, params),
            Stage::Pressure => forces::compute_pressures(particles, params),
            Stage::Gravity => forces::apply_gravity(particles, params.gravity),
            Stage::SurfaceTension => forces::accumulate_surface_tension(particles, neighbors, params),
            Stage::PressureForce => forces::accumulate_pressure_force(particles, neighbors, params),
            Stage::Viscosity => forces::apply_viscosity(particles, neighbors, params, dt),
            Stage::Repulsion => forces::apply_repulsion(particles, neighbors, params, dt),
            Stage::Pointer => forces::apply_pointer(particles, pointer, params),
        }
    }
}

impl Fluid for SphFluid2D {
    type Params = SphParams;

    fn params(&self) -> &SphParams {
        &self.params
    }

    fn step(&mut self, dt: f32, pointer: Option<PointerInput>) {
        self.update_neighbors();

        self.particles.forces.fill(Vec2::ZERO);
        for stage in Stage::PIPELINE {
            self.run_stage(stage, dt, pointer);
        }
        forces::apply_forces(&mut self.particles, dt);

        let params = &self.params;

        let resets = integrate::integrate(&mut self.particles, dt, params.half_extent, params.damping);

        let overlaps = resolve_overlaps(
            self.particles.positions.view_mut(),
            &self.neighbors,
            params.min_separation(),
        );

        self.stats = FluidStats::measure(&self.particles, params.mass, resets, overlaps);
        self.ticks += 1;

        if resets > 0 {
            warn!("Tick {}: reset {resets} particles with non-finite state", self.ticks);
        }

        debug!(
            "Tick {}: max density {:.4}, max pressure {:.4}, kinetic energy {:.4}, {} overlaps",
            self.ticks,
            self.stats.max_density,
            self.stats.max_pressure,
            self.stats.kinetic_energy,
            self.stats.overlaps,
        );
    }

    fn particle_radius(&self) -> f32 {
        self.params.particle_radius
    }

    fn positions(&self) -> ArrayView1<'_, Vec2> {
        self.particles.positions()
    }
}
