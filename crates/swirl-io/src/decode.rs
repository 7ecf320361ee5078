use std::{fs::File, io::{BufReader, Read}, path::PathBuf};

use glam::Vec2;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{encode::frame_file_name, METADATA_FILE};

use super::as_bytes::AsBytes;

pub struct FluidDataDecoder {
    /// The path to the directory in which the fluid data resides.
    path: PathBuf,
    num_frames: u64,
    particle_count: u64,
    current_frame: u64,
}

impl FluidDataDecoder {
    pub fn new(path: PathBuf) -> FluidDataDecoder {
        Self {
            path,
            num_frames: 0,
            particle_count: 0,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;
        Ok(T::from_bytes(bytes))
    }

    fn read_section<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R) -> Result<Vec<T>, DecodingError> {
        let len = Self::read_value::<8, u64, _>(reader)?;

        let expected_bytes = len.saturating_mul(N as u64);

        let mut bytes = Vec::new();
        reader.take(expected_bytes).read_to_end(&mut bytes)?;
        if bytes.len() as u64 != expected_bytes {
            return Err(DecodingError::Truncated { expected: len, actual: bytes.len() as u64 / N as u64 });
        }

        Ok(bytes
            .chunks_exact(N)
            .map(|chunk| {
                let mut b = [0; N];
                b.copy_from_slice(chunk);
                T::from_bytes(b)
            })
            .collect())
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        self.path.join(frame_file_name(frame, self.num_frames))
    }

    pub fn decode_metadata(&mut self) -> Result<FluidMetadata, DecodingError> {
        let path = self.path.join(METADATA_FILE);
        let mut reader = BufReader::new(File::open(path)?);

        let dim = Self::read_value::<1, u8, _>(&mut reader)?;
        if dim != 2 {
            return Err(DecodingError::Dimension(dim));
        }

        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let particle_radius = Self::read_value::<4, f32, _>(&mut reader)?;
        let particle_count = Self::read_value::<8, u64, _>(&mut reader)?;

        let mut size: SmallVec<[_; 4]> = SmallVec::new();
        for _ in 0..dim {
            size.push(Self::read_value::<4, f32, _>(&mut reader)?);
        }

        self.num_frames = num_frames;
        self.particle_count = particle_count;
        self.current_frame = 0;

        Ok(FluidMetadata {
            dim,
            fps,
            num_frames,
            particle_radius,
            particle_count,
            size,
        })
    }

    pub fn decode_frame(&mut self) -> Result<Option<FluidFrameData>, DecodingError> {
        if self.current_frame >= self.num_frames {
            return Ok(None)
        }

        let path = self.frame_path(self.current_frame);
        let mut reader = BufReader::new(File::open(path)?);

        let positions = Self::read_section::<8, Vec2, _>(&mut reader)?;
        if positions.len() as u64 != self.particle_count {
            return Err(DecodingError::ParticleCount {
                frame: self.current_frame,
                expected: self.particle_count,
                actual: positions.len() as u64,
            });
        }

        self.current_frame += 1;

        Ok(Some(FluidFrameData { positions }))
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

pub struct FluidMetadata {
    pub dim: u8,
    pub fps: u32,
    pub num_frames: u64,
    pub particle_radius: f32,
    pub particle_count: u64,
    pub size: SmallVec<[f32; 4]>,
}

impl FluidMetadata {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size[0], self.size[1])
    }
}

pub struct FluidFrameData {
    pub positions: Vec<Vec2>,
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unsupported fluid dimension {0}")]
    Dimension(u8),
    #[error("section truncated: expected {expected} values, found {actual}")]
    Truncated { expected: u64, actual: u64 },
    #[error("frame {frame} holds {actual} particles, expected {expected}")]
    ParticleCount { frame: u64, expected: u64, actual: u64 },
}
