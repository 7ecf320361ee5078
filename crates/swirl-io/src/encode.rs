use std::{fs::File, io::{BufWriter, Write}, path::PathBuf};

use thiserror::Error;

use swirl_fluids::{scene::Scene, Fluid};

use crate::{EncodeFluid, METADATA_FILE};

use super::as_bytes::AsBytes;

pub struct FluidDataEncoder {
    /// The path to the directory into which the fluid data will be placed.
    path: PathBuf,
    num_frames: u64,
    fps: u32,
    current_frame: u64,
}

impl FluidDataEncoder {
    pub fn new(path: PathBuf, num_frames: u64, fps: u32) -> Result<FluidDataEncoder, EncodingError> {
        std::fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            num_frames,
            fps,
            current_frame: 0,
        })
    }

    pub fn frames_written(&self) -> u64 {
        self.current_frame
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        self.path.join(frame_file_name(frame, self.num_frames))
    }

    pub fn encode_metadata<F: Fluid>(&mut self, scene: &Scene<F>) -> Result<(), EncodingError> {
        let path = self.path.join(METADATA_FILE);
        let mut writer = BufWriter::new(File::create(path)?);

        writer.write_all(&[2u8])?;
        writer.write_all(&self.fps.to_bytes())?;
        writer.write_all(&self.num_frames.to_bytes())?;

        writer.write_all(&scene.fluid.particle_radius().to_bytes())?;
        writer.write_all(&(scene.fluid.positions().len() as u64).to_bytes())?;

        for extent in scene.size() {
            writer.write_all(&extent.to_bytes())?;
        }

        writer.flush()?;

        Ok(())
    }

    pub fn encode_frame<F>(&mut self, scene: &Scene<F>) -> Result<(), EncodingError>
    where
        F: EncodeFluid + Fluid,
    {
        if self.current_frame >= self.num_frames {
            return Err(EncodingError::TooManyFrames(self.num_frames));
        }

        let path = self.frame_path(self.current_frame);
        let writer = BufWriter::new(File::create(path)?);

        let mut frame = FluidFrameEncoder { writer };
        scene.fluid.encode_state(&mut frame)?;
        frame.writer.flush()?;

        self.current_frame += 1;

        Ok(())
    }
}

/// File name of `frame`, zero-padded so that names sort in frame order.
pub(crate) fn frame_file_name(frame: u64, num_frames: u64) -> String {
    let max_digits = num_frames.saturating_sub(1).checked_ilog10().unwrap_or(0) + 1;
    let digits = frame.checked_ilog10().unwrap_or(0) + 1;
    let zeros = max_digits.saturating_sub(digits);

    format!("{}{frame}.dat", "0".repeat(zeros as usize))
}

pub struct FluidFrameEncoder<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> FluidFrameEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: BufWriter::new(writer) }
    }

    pub fn encode_section<const N: usize, T, I>(&mut self, len: usize, values: I) -> Result<(), EncodingError>
    where
        I: Iterator<Item = T>,
        T: AsBytes<N>,
    {
        self.writer.write_all(&(len as u64).to_bytes())?;

        let bytes: Vec<_> = values.flat_map(|v| v.to_bytes()).collect();
        self.writer.write_all(&bytes)?;

        Ok(())
    }

    pub fn finish(mut self) -> Result<W, EncodingError> {
        self.writer.flush()?;
        self.writer.into_inner().map_err(|e| EncodingError::Io(e.into_error()))
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("recording only has room for {0} frames")]
    TooManyFrames(u64),
}
