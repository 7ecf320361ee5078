use glam::Vec2;
use ndarray::azip;

use super::particles::Particles;

/// Advances positions by `velocity * dt`, resets particles whose state went non-finite and then
/// applies the boundary. Returns the number of particles that had to be reset.
pub fn integrate(particles: &mut Particles, dt: f32, half_extent: f32, damping: f32) -> usize {
    particles.previous_positions.assign(&particles.positions);

    advance_positions(particles, dt);
    let resets = reset_non_finite(particles);
    handle_boundaries(particles, half_extent, damping);

    resets
}

pub fn advance_positions(particles: &mut Particles, dt: f32) {
    azip!((p in &mut particles.positions, &v in &particles.velocities) {
        *p += v * dt;
    });
}

/// Clamps particles into `[-half_extent, half_extent]²`, reflecting and damping the velocity
/// component of every axis that was clamped. The vertical axis loses twice as much energy.
pub fn handle_boundaries(particles: &mut Particles, half_extent: f32, damping: f32) {
    let max = half_extent;
    let min = -half_extent;
    let damping_y = damping * 0.5;

    azip!((p in &mut particles.positions, v in &mut particles.velocities) {
        if p.x < min {
            p.x = min;
            v.x *= -damping;
        } else if p.x > max {
            p.x = max;
            v.x *= -damping;
        }

        if p.y < min {
            p.y = min;
            v.y *= -damping_y;
        } else if p.y > max {
            p.y = max;
            v.y *= -damping_y;
        }
    });
}

/// Zeroes the velocity of any particle with a non-finite position or velocity and moves it back
/// to where it started this tick, or to the origin if that was not finite either.
pub fn reset_non_finite(particles: &mut Particles) -> usize {
    let mut resets = 0;

    azip!((p in &mut particles.positions, v in &mut particles.velocities, &prev in &particles.previous_positions) {
        if !p.is_finite() || !v.is_finite() {
            *v = Vec2::ZERO;
            *p = if prev.is_finite() { prev } else { Vec2::ZERO };
            resets += 1;
        }
    });

    resets
}
