//! Smoothing kernels evaluated on the distance between two particles.
//!
//! Both kernels have compact support: they are exactly `0.0` for `d > r`. Callers must never pass
//! `r == 0.0`.

use std::f32::consts::PI;

/// Poly6 kernel weight, `315 / (64π r⁹) · (r - d)³` inside the support radius.
#[inline]
pub fn poly6(d: f32, r: f32) -> f32 {
    // Also rejects NaN distances.
    if !(d <= r) {
        return 0.0;
    }

    let x = r - d;
    if x <= 0.0 {
        return 0.0;
    }

    let coeff = 315.0 / (64.0 * PI * r.powi(9));
    coeff * x * x * x
}

/// Magnitude of the spiky kernel gradient, `-45 / (π r⁶) · (r - d)²` inside the support radius.
///
/// The result is negative. It is meant to be multiplied by the unit vector pointing from the
/// neighbor to the particle.
#[inline]
pub fn spiky_grad_mag(d: f32, r: f32) -> f32 {
    if !(d <= r) {
        return 0.0;
    }

    let x = r - d;
    if x <= 0.0 {
        return 0.0;
    }

    let coeff = -45.0 / (PI * r.powi(6));
    coeff * x * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_outside_support() {
        assert_eq!(poly6(2.0001, 2.0), 0.0);
        assert_eq!(spiky_grad_mag(5.0, 2.0), 0.0);
        assert_eq!(poly6(f32::NAN, 2.0), 0.0);
    }

    #[test]
    fn zero_on_support_boundary() {
        assert_eq!(poly6(3.0, 3.0), 0.0);
        assert_eq!(spiky_grad_mag(3.0, 3.0), 0.0);
    }

    #[test]
    fn poly6_at_centre() {
        let r = 2.0_f32;
        let expected = 315.0 / (64.0 * PI * r.powi(9)) * r * r * r;
        assert!((poly6(0.0, r) - expected).abs() < 1e-7);
    }

    #[test]
    fn spiky_gradient_is_negative() {
        let r = 10.0;
        for d in [0.0, 1.0, 5.0, 9.9] {
            assert!(spiky_grad_mag(d, r) < 0.0, "d = {d}");
        }
    }

    #[test]
    fn poly6_decreases_with_distance() {
        let r = 16.0;
        let mut last = poly6(0.0, r);
        for k in 1..=64 {
            let w = poly6(r * k as f32 / 64.0, r);
            assert!(w <= last);
            last = w;
        }
        assert_eq!(last, 0.0);
    }
}
