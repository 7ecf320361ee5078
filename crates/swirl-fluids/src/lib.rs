use glam::Vec2;
use ndarray::ArrayView1;
use pointer::PointerInput;

pub mod kernel;
pub mod params;
pub mod pointer;
pub mod scene;
pub mod sph;

pub use params::{ParamsError, SphParams};
pub use scene::Scene;
pub use sph::{sph_2d::SphFluid2D, FluidStats, Stage};

pub trait Fluid {
    type Params;

    /// Parameters the fluid was built with. They do not change afterwards.
    fn params(&self) -> &Self::Params;

    /// Advances the fluid by one tick of length `dt`.
    fn step(&mut self, dt: f32, pointer: Option<PointerInput>);

    /// Visual radius of a single particle.
    fn particle_radius(&self) -> f32;

    /// Current particle positions, indexed `0..N`.
    fn positions(&self) -> ArrayView1<'_, Vec2>;
}
