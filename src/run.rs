use std::f32::consts::TAU;

use glam::Vec2;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::info;
use swirl_fluids::{Scene, SphParams};
use swirl_io::encode::FluidDataEncoder;

use crate::{error::AppError, PointerScript, RunArgs};

pub fn run_d2(args: RunArgs) -> Result<(), AppError> {
    if args.fps == 0 || !(args.duration > 0.0) {
        return Err(AppError::Settings(format!(
            "need a positive fps and duration, got {} fps for {} s",
            args.fps, args.duration,
        )));
    }

    let params = SphParams::from(args.params);
    let half_extent = params.half_extent;
    let mut scene = Scene::sph(params)?;

    let frames = (args.duration * args.fps as f32).ceil() as u64;
    let dt = 1.0 / args.fps as f32;

    let mut encoder = FluidDataEncoder::new(args.out.clone(), frames, args.fps)?;
    encoder.encode_metadata(&scene)?;

    info!("Recording {frames} frames into {}", args.out.display());

    // Stir around a point in the lower half of the domain, where the fluid settles.
    let stir_center = Vec2::new(0.0, -0.5 * half_extent);

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template)?
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(frames).with_style(style);

    for frame in (0..frames).progress_with(progress) {
        let t = frame as f32 * dt;

        let pointer = match args.pointer {
            PointerScript::Stir if t >= args.stir_from && t < args.stir_until => {
                let theta = (t - args.stir_from) * args.stir_speed * TAU;
                Some(stir_center + args.stir_radius * Vec2::from_angle(theta))
            }
            _ => None,
        };

        scene.step(dt, pointer);
        encoder.encode_frame(&scene)?;
    }

    let stats = scene.fluid.stats();
    info!(
        "Finished after {} ticks: mean density {:.4}, kinetic energy {:.4}",
        scene.fluid.ticks(),
        stats.mean_density,
        stats.kinetic_energy,
    );

    Ok(())
}
