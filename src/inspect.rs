use std::path::PathBuf;

use glam::Vec2;
use swirl_io::decode::FluidDataDecoder;

use crate::error::AppError;

pub fn inspect(path: PathBuf) -> Result<(), AppError> {
    let mut decoder = FluidDataDecoder::new(path.clone());
    let meta = decoder.decode_metadata()?;

    println!("{}", path.display());
    println!("  frames:          {} at {} fps", meta.num_frames, meta.fps);
    println!("  particles:       {}", meta.particle_count);
    println!("  particle radius: {}", meta.particle_radius);
    println!("  domain size:     {}", meta.size());

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut frames = 0;
    let mut last_centroid = None;

    while let Some(frame) = decoder.decode_frame()? {
        let mut sum = Vec2::ZERO;
        for &p in &frame.positions {
            min = min.min(p);
            max = max.max(p);
            sum += p;
        }

        if !frame.positions.is_empty() {
            last_centroid = Some(sum / frame.positions.len() as f32);
        }
        frames += 1;
    }

    println!("  decoded frames:  {frames}");
    if frames > 0 {
        println!("  position bounds: {min} .. {max}");
    }
    if let Some(centroid) = last_centroid {
        println!("  final centroid:  {centroid}");
    }

    Ok(())
}
