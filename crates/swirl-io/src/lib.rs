use std::io::Write;

use encode::{EncodingError, FluidFrameEncoder};
use swirl_fluids::{Fluid, SphFluid2D};

pub mod as_bytes;
pub mod decode;
pub mod encode;

/// Name of the metadata file inside a recording directory.
pub const METADATA_FILE: &str = "_meta";

pub trait EncodeFluid {
    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError>;
}

impl EncodeFluid for SphFluid2D {
    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError> {
        let positions = self.positions();
        encoder.encode_section(positions.len(), positions.iter().copied())
    }
}
