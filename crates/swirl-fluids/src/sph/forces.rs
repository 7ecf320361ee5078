//! The per-tick force pipeline.
//!
//! Stages write into one of two channels: the force accumulator (`surface_tension`,
//! `pressure_force`) or the velocities directly (`gravity`, `viscosity`, `repulsion`,
//! `pointer`). They accumulate additively, so their order matters.

use glam::Vec2;
use ndarray::{azip, Zip};

use crate::{kernel::{poly6, spiky_grad_mag}, pointer::PointerInput, SphParams};

use super::{neighbors::NeighborList, particles::Particles, DENSITY_EPSILON};

/// Strength of the short-range repulsion between neighbors.
const REPULSION_STRENGTH: f32 = 50.0;

/// `density[i] = Σ mass · poly6(|x_i - x_j|, r)` over the neighbors of `i`. There is no self term.
pub fn compute_densities(particles: &mut Particles, neighbors: &[NeighborList], params: &SphParams) {
    let positions = particles.positions.view();
    let r = params.interaction_radius;
    let mass = params.mass;

    Zip::indexed(&mut particles.densities).par_for_each(|i, density| {
        let p = positions[i];

        *density = neighbors[i]
            .iter()
            .map(|&j| mass * poly6(p.distance(positions[j]), r))
            .sum();
    });
}

/// Pressure from density, clipped at zero so it never pulls particles together.
pub fn compute_pressures(particles: &mut Particles, params: &SphParams) {
    let stiffness = params.stiffness;
    let rest_density = params.rest_density;

    azip!((pressure in &mut particles.pressures, &density in &particles.densities) {
        *pressure = stiffness * (density - rest_density).max(0.0);
    });
}

/// Adds gravity to every velocity. This is a per-tick increment and is not scaled by `dt`.
pub fn apply_gravity(particles: &mut Particles, gravity: Vec2) {
    particles.velocities.map_inplace(|v| *v += gravity);
}

pub fn accumulate_surface_tension(particles: &mut Particles, neighbors: &[NeighborList], params: &SphParams) {
    let positions = particles.positions.view();
    let r = params.interaction_radius;
    let tension = params.surface_tension;

    Zip::indexed(&mut particles.forces).par_for_each(|i, force| {
        let p = positions[i];

        for &j in &neighbors[i] {
            let delta = positions[j] - p;
            let d = delta.length();

            if d > 0.0 && d < r {
                *force -= delta / d * tension * poly6(d, r);
            }
        }
    });
}

pub fn accumulate_pressure_force(particles: &mut Particles, neighbors: &[NeighborList], params: &SphParams) {
    let positions = particles.positions.view();
    let pressures = particles.pressures.view();
    let densities = particles.densities.view();
    let r = params.interaction_radius;

    Zip::indexed(&mut particles.forces).par_for_each(|i, force| {
        let p = positions[i];

        for &j in &neighbors[i] {
            let delta = p - positions[j];
            let d = delta.length();

            if d > 0.0 && d < r {
                let density = densities[j].max(DENSITY_EPSILON);
                let magnitude = (pressures[i] + pressures[j]) / (2.0 * density) * spiky_grad_mag(d, r);
                *force += delta / d * magnitude;
            }
        }
    });
}

/// Pulls each velocity toward its neighbors' velocities.
///
/// The change is computed from the velocities as they were when the stage started.
pub fn apply_viscosity(particles: &mut Particles, neighbors: &[NeighborList], params: &SphParams, dt: f32) {
    let positions = particles.positions.view();
    let velocities = particles.velocities.view();
    let r = params.interaction_radius;
    let scale = params.viscosity * dt;

    Zip::indexed(&mut particles.velocity_deltas).par_for_each(|i, dv| {
        let p = positions[i];
        let v = velocities[i];
        let mut sum = Vec2::ZERO;

        for &j in &neighbors[i] {
            let d = p.distance(positions[j]);
            if d < r {
                sum += (velocities[j] - v) * (1.0 - d / r);
            }
        }

        *dv = sum * scale;
    });

    apply_velocity_deltas(particles);
}

/// Pushes neighbors apart in proportion to how deep they are inside each other's radius.
pub fn apply_repulsion(particles: &mut Particles, neighbors: &[NeighborList], params: &SphParams, dt: f32) {
    let positions = particles.positions.view();
    let r = params.interaction_radius;
    let r2 = r * r;
    let scale = dt * 0.5;

    Zip::indexed(&mut particles.velocity_deltas).par_for_each(|i, dv| {
        let p = positions[i];
        let mut sum = Vec2::ZERO;

        for &j in &neighbors[i] {
            let delta = p - positions[j];
            let d2 = delta.length_squared();

            if d2 > 0.0 && d2 < r2 {
                let d = d2.sqrt();
                sum += delta / d * (r - d) * REPULSION_STRENGTH;
            }
        }

        *dv = sum * scale;
    });

    apply_velocity_deltas(particles);
}

/// Drags particles near the pointer along with its motion since the previous tick.
pub fn apply_pointer(particles: &mut Particles, pointer: Option<PointerInput>, params: &SphParams) {
    let Some(pointer) = pointer else {
        return;
    };

    let radius = params.pointer_radius;
    if radius <= 0.0 || pointer.displacement == Vec2::ZERO {
        return;
    }

    azip!((&p in &particles.positions, v in &mut particles.velocities) {
        let d = p.distance(pointer.position);
        if d < radius {
            *v += (1.0 - d / radius) * pointer.displacement;
        }
    });
}

/// Turns the accumulated forces into a velocity change.
///
/// The accumulator carries the sign of the spiky gradient, so it is subtracted.
pub fn apply_forces(particles: &mut Particles, dt: f32) {
    azip!((v in &mut particles.velocities, &f in &particles.forces) {
        *v -= f * dt;
    });
}

fn apply_velocity_deltas(particles: &mut Particles) {
    azip!((v in &mut particles.velocities, &dv in &particles.velocity_deltas) {
        *v += dv;
    });
}
