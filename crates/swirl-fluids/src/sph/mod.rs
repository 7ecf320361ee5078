use ndarray::azip;

use particles::Particles;

pub mod forces;
pub mod grid_2d;
pub mod integrate;
pub mod neighbors;
pub mod overlap;
pub mod particles;
pub mod sph_2d;

/// Floor for a density used as a divisor.
pub const DENSITY_EPSILON: f32 = 1.0e-6;

/// One stage of the force pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Density,
    Pressure,
    Gravity,
    SurfaceTension,
    PressureForce,
    Viscosity,
    Repulsion,
    Pointer,
}

/// Where a stage writes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Per-particle scalar fields (density, pressure).
    Field,
    /// The force accumulator.
    Force,
    /// Velocities, directly.
    Velocity,
}

impl Stage {
    /// The stages of one tick, in the order they run.
    pub const PIPELINE: [Stage; 8] = [
        Stage::Density,
        Stage::Pressure,
        Stage::Gravity,
        Stage::SurfaceTension,
        Stage::PressureForce,
        Stage::Viscosity,
        Stage::Repulsion,
        Stage::Pointer,
    ];

    pub fn channel(self) -> Channel {
        match self {
            Stage::Density | Stage::Pressure => Channel::Field,
            Stage::SurfaceTension | Stage::PressureForce => Channel::Force,
            Stage::Gravity | Stage::Viscosity | Stage::Repulsion | Stage::Pointer => Channel::Velocity,
        }
    }
}

/// Summary of the fluid state at the end of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FluidStats {
    pub max_density: f32,
    pub mean_density: f32,
    pub max_pressure: f32,
    pub kinetic_energy: f32,
    /// Particles reset this tick because their state was not finite.
    pub resets: usize,
    /// Overlapping pairs pushed apart this tick.
    pub overlaps: usize,
}

impl FluidStats {
    pub fn measure(particles: &Particles, mass: f32, resets: usize, overlaps: usize) -> Self {
        let mut stats = FluidStats { resets, overlaps, ..Default::default() };
        let mut density_sum = 0.0;

        azip!((&density in &particles.densities, &pressure in &particles.pressures, &v in &particles.velocities) {
            stats.max_density = stats.max_density.max(density);
            stats.max_pressure = stats.max_pressure.max(pressure);
            stats.kinetic_energy += 0.5 * mass * v.length_squared();
            density_sum += density;
        });

        if !particles.is_empty() {
            stats.mean_density = density_sum / particles.len() as f32;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn pipeline_runs_fields_before_forces() {
        let first_force = Stage::PIPELINE.iter().position(|s| s.channel() == Channel::Force).unwrap();
        let last_field = Stage::PIPELINE.iter().rposition(|s| s.channel() == Channel::Field).unwrap();
        assert!(last_field < first_force);
        assert_eq!(Stage::PIPELINE.last(), Some(&Stage::Pointer));
    }

    #[test]
    fn stats_summarize_particles() {
        let mut particles = Particles::new(vec![Vec2::ZERO, Vec2::ONE], 0.0);
        particles.densities[0] = 1.0;
        particles.densities[1] = 3.0;
        particles.pressures[1] = 5.0;
        particles.velocities[0] = Vec2::new(2.0, 0.0);

        let stats = FluidStats::measure(&particles, 2.0, 1, 0);

        assert_eq!(stats.max_density, 3.0);
        assert_eq!(stats.mean_density, 2.0);
        assert_eq!(stats.max_pressure, 5.0);
        assert_eq!(stats.kinetic_energy, 4.0);
        assert_eq!(stats.resets, 1);
    }
}
