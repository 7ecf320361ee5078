use glam::Vec2;

use super::{pointer::PointerTracker, Fluid, ParamsError, SphFluid2D, SphParams};

pub struct Scene<F> {
    /// The fluid for this scene.
    pub fluid: F,
    /// Domain size.
    size: [f32; 2],
    /// Previous pointer sample, used to derive pointer motion.
    pointer: PointerTracker,
}

impl<F: Fluid> Scene<F> {
    #[inline(always)]
    pub fn new(fluid: F, size: [f32; 2]) -> Self {
        Self {
            fluid,
            size,
            pointer: PointerTracker::default(),
        }
    }

    #[inline(always)]
    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    #[inline(always)]
    pub fn params(&self) -> &F::Params {
        self.fluid.params()
    }

    /// Advances the scene by one tick, with the pointer at `pointer` (or absent).
    ///
    /// An absent pointer forgets the previous sample, so it re-enters without a jump.
    pub fn step(&mut self, dt: f32, pointer: Option<Vec2>) {
        let input = self.pointer.update(pointer);
        self.fluid.step(dt, input);
    }

    /// Particle positions to be drawn this frame, indexed `0..N`.
    pub fn transforms(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.fluid.positions().into_iter().copied()
    }
}

impl Scene<SphFluid2D> {
    /// Builds an SPH scene whose domain is `[-half_extent, half_extent]²`.
    pub fn sph(params: SphParams) -> Result<Self, ParamsError> {
        let fluid = SphFluid2D::new(&params)?;
        let size = params.domain_size().into();

        Ok(Self::new(fluid, size))
    }

    /// Builds an SPH scene from explicit initial positions.
    pub fn sph_with_positions(params: SphParams, positions: Vec<Vec2>) -> Result<Self, ParamsError> {
        let fluid = SphFluid2D::with_positions(&params, positions)?;
        let size = params.domain_size().into();

        Ok(Self::new(fluid, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_matches_half_extent() {
        let params = SphParams { particle_count: 10, half_extent: 50.0, ..Default::default() };
        let scene = Scene::sph(params).unwrap();
        assert_eq!(scene.size(), [100.0, 100.0]);
        assert_eq!(scene.transforms().count(), 10);
        assert_eq!(scene.params().half_extent, 50.0);
    }

    #[test]
    fn pointer_motion_reaches_the_fluid() {
        let params = SphParams {
            particle_count: 1,
            gravity: Vec2::ZERO,
            pointer_radius: 20.0,
            ..Default::default()
        };
        let mut scene = Scene::sph_with_positions(params, vec![Vec2::ZERO]).unwrap();

        scene.step(0.01, Some(Vec2::new(0.0, 0.0)));
        assert_eq!(scene.fluid.velocities()[0], Vec2::ZERO);

        scene.step(0.01, Some(Vec2::new(2.0, 0.0)));
        assert!(scene.fluid.velocities()[0].x > 0.0);
    }

    #[test]
    fn pointer_reentry_does_not_jump() {
        let params = SphParams {
            particle_count: 1,
            gravity: Vec2::ZERO,
            pointer_radius: 20.0,
            ..Default::default()
        };
        let mut scene = Scene::sph_with_positions(params, vec![Vec2::ZERO]).unwrap();

        scene.step(0.01, Some(Vec2::new(-10.0, 0.0)));
        scene.step(0.01, None);
        scene.step(0.01, Some(Vec2::new(5.0, 0.0)));

        assert_eq!(scene.fluid.velocities()[0], Vec2::ZERO);
    }
}
