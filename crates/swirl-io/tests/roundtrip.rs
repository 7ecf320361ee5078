use std::path::{Path, PathBuf};

use glam::Vec2;
use swirl_fluids::{Scene, SphFluid2D, SphParams};
use swirl_io::{
    decode::{DecodingError, FluidDataDecoder},
    encode::{EncodingError, FluidDataEncoder},
    METADATA_FILE,
};

fn scratch_dir(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("swirl-io-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&path);
    path
}

fn small_scene() -> Scene<SphFluid2D> {
    let params = SphParams { particle_count: 25, half_extent: 60.0, ..Default::default() };
    Scene::sph(params).unwrap()
}

#[test]
fn recording_round_trips() {
    let dir = scratch_dir("round-trip");
    let mut scene = small_scene();
    let frames = 3;

    let mut encoder = FluidDataEncoder::new(dir.clone(), frames, 30).unwrap();
    encoder.encode_metadata(&scene).unwrap();

    let mut expected = Vec::new();
    for _ in 0..frames {
        scene.step(1.0 / 30.0, None);
        encoder.encode_frame(&scene).unwrap();
        expected.push(scene.transforms().collect::<Vec<_>>());
    }
    assert_eq!(encoder.frames_written(), frames);

    let mut decoder = FluidDataDecoder::new(dir.clone());
    let meta = decoder.decode_metadata().unwrap();
    assert_eq!(meta.dim, 2);
    assert_eq!(meta.fps, 30);
    assert_eq!(meta.num_frames, frames);
    assert_eq!(meta.particle_count, 25);
    assert_eq!(meta.particle_radius, scene.params().particle_radius);
    assert_eq!(meta.size(), Vec2::splat(120.0));

    for positions in &expected {
        let frame = decoder.decode_frame().unwrap().unwrap();
        assert_eq!(&frame.positions, positions);
    }
    assert!(decoder.decode_frame().unwrap().is_none());

    decoder.reset();
    let first = decoder.decode_frame().unwrap().unwrap();
    assert_eq!(first.positions, expected[0]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn encoder_refuses_extra_frames() {
    let dir = scratch_dir("extra-frames");
    let scene = small_scene();

    let mut encoder = FluidDataEncoder::new(dir.clone(), 1, 60).unwrap();
    encoder.encode_frame(&scene).unwrap();
    assert!(matches!(encoder.encode_frame(&scene), Err(EncodingError::TooManyFrames(1))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_recording_is_an_io_error() {
    let mut decoder = FluidDataDecoder::new(scratch_dir("missing"));
    assert!(matches!(decoder.decode_metadata(), Err(DecodingError::Io(_))));
}

/// Writes metadata and `frames` ticks of the small scene into `dir`.
fn record(dir: &Path, frames: u64) {
    let mut scene = small_scene();
    let mut encoder = FluidDataEncoder::new(dir.to_path_buf(), frames, 30).unwrap();
    encoder.encode_metadata(&scene).unwrap();

    for _ in 0..frames {
        scene.step(1.0 / 30.0, None);
        encoder.encode_frame(&scene).unwrap();
    }
}

/// Replaces frame `name` with a section of `count` positions.
fn rewrite_frame(dir: &Path, name: &str, count: u64) {
    let mut bytes = count.to_ne_bytes().to_vec();
    for i in 0..count {
        bytes.extend_from_slice(&(i as f32).to_ne_bytes());
        bytes.extend_from_slice(&0f32.to_ne_bytes());
    }
    std::fs::write(dir.join(name), bytes).unwrap();
}

#[test]
fn wrong_dimension_is_rejected() {
    let dir = scratch_dir("dimension");
    record(&dir, 1);

    let meta_path = dir.join(METADATA_FILE);
    let mut meta = std::fs::read(&meta_path).unwrap();
    meta[0] = 3;
    std::fs::write(&meta_path, meta).unwrap();

    let mut decoder = FluidDataDecoder::new(dir.clone());
    assert!(matches!(decoder.decode_metadata(), Err(DecodingError::Dimension(3))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cut_frame_is_truncated() {
    let dir = scratch_dir("truncated");
    record(&dir, 2);

    let frame_path = dir.join("0.dat");
    let mut frame = std::fs::read(&frame_path).unwrap();
    frame.truncate(frame.len() - 3);
    std::fs::write(&frame_path, frame).unwrap();

    let mut decoder = FluidDataDecoder::new(dir.clone());
    decoder.decode_metadata().unwrap();
    assert!(matches!(
        decoder.decode_frame(),
        Err(DecodingError::Truncated { expected: 25, actual: 24 })
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn frame_particle_count_must_match_metadata() {
    let dir = scratch_dir("particle-count");
    record(&dir, 2);
    rewrite_frame(&dir, "0.dat", 26);
    rewrite_frame(&dir, "1.dat", 24);

    let mut decoder = FluidDataDecoder::new(dir.clone());
    decoder.decode_metadata().unwrap();
    assert!(matches!(
        decoder.decode_frame(),
        Err(DecodingError::ParticleCount { frame: 0, expected: 25, actual: 26 })
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rejected_frame_is_not_skipped() {
    let dir = scratch_dir("rejected-frame");
    record(&dir, 2);
    rewrite_frame(&dir, "1.dat", 24);

    let mut decoder = FluidDataDecoder::new(dir.clone());
    decoder.decode_metadata().unwrap();
    assert_eq!(decoder.decode_frame().unwrap().unwrap().positions.len(), 25);
    assert!(matches!(
        decoder.decode_frame(),
        Err(DecodingError::ParticleCount { frame: 1, expected: 25, actual: 24 })
    ));
    assert!(decoder.decode_frame().is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
