use glam::Vec2;
use thiserror::Error;

/// Smallest spatial grid cell size, regardless of the interaction radius.
pub const MIN_CELL_SIZE: f32 = 10.0;

/// Configuration of an SPH fluid, fixed for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct SphParams {
    /// Number of particles. Never changes after construction.
    pub particle_count: usize,
    /// Particles are kept inside `[-half_extent, half_extent]` on both axes.
    pub half_extent: f32,
    /// Visual radius of a particle. Pairs closer than `1.5 * particle_radius` after integration
    /// are pushed apart.
    pub particle_radius: f32,
    /// Smoothing radius of the kernels and cutoff of the neighbor search.
    pub interaction_radius: f32,
    /// Density above which pressure becomes positive.
    pub rest_density: f32,
    /// Pressure stiffness coefficient.
    pub stiffness: f32,
    /// Viscosity coefficient.
    pub viscosity: f32,
    /// Velocity damping applied when a particle hits the boundary.
    ///
    /// Must lie in `[0, 1]`. The vertical axis uses half of this factor.
    pub damping: f32,
    /// Radius around the pointer inside which particles follow its motion. `0.0` disables the
    /// pointer.
    pub pointer_radius: f32,
    /// Mass of a single particle.
    pub mass: f32,
    /// Velocity added to every particle once per tick.
    pub gravity: Vec2,
    /// Surface tension coefficient.
    pub surface_tension: f32,
}

impl Default for SphParams {
    fn default() -> Self {
        Self {
            particle_count: 600,
            half_extent: 240.0,
            particle_radius: 3.0,
            interaction_radius: 18.0,
            rest_density: 1.0,
            stiffness: 4.0e6,
            viscosity: 1.5,
            damping: 0.6,
            pointer_radius: 60.0,
            mass: 1.0e7,
            gravity: Vec2::new(0.0, -9.81),
            surface_tension: 2.0e8,
        }
    }
}

impl SphParams {
    /// Side length of a spatial grid cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        MIN_CELL_SIZE.max(self.interaction_radius)
    }

    /// Distance below which two particles overlap.
    #[inline]
    pub fn min_separation(&self) -> f32 {
        1.5 * self.particle_radius
    }

    /// Size of the simulation domain along each axis.
    #[inline]
    pub fn domain_size(&self) -> Vec2 {
        Vec2::splat(2.0 * self.half_extent)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.particle_count == 0 {
            return Err(ParamsError::NoParticles);
        }

        positive("half_extent", self.half_extent)?;
        positive("interaction_radius", self.interaction_radius)?;
        positive("mass", self.mass)?;

        non_negative("particle_radius", self.particle_radius)?;
        non_negative("rest_density", self.rest_density)?;
        non_negative("stiffness", self.stiffness)?;
        non_negative("viscosity", self.viscosity)?;
        non_negative("pointer_radius", self.pointer_radius)?;
        non_negative("surface_tension", self.surface_tension)?;

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ParamsError::Damping(self.damping));
        }

        if !self.gravity.is_finite() {
            return Err(ParamsError::Gravity(self.gravity));
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::Negative { name, value })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("a fluid needs at least one particle")]
    NoParticles,
    #[error("`{name}` must be finite and greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("`{name}` must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("damping must lie in [0, 1], got {0}")]
    Damping(f32),
    #[error("gravity must be finite, got {0}")]
    Gravity(Vec2),
    #[error("expected {expected} initial positions, got {actual}")]
    ParticleCount { expected: usize, actual: usize },
}
