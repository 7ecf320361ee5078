use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use error::AppError;
use glam::Vec2;
use swirl_fluids::SphParams;

mod error;
mod inspect;
mod run;

#[derive(Parser)]
#[command(version, about = "Real-time 2D SPH fluid simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a fluid and record its particle positions every frame.
    Run(RunArgs),
    /// Print a summary of a recording.
    Inspect {
        /// Recording directory.
        path: PathBuf,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory to record frames into.
    #[arg(short, long, default_value = "output/swirl")]
    out: PathBuf,
    /// Frames per second. Each frame is one tick of `1 / fps` seconds.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Length of the recording in seconds.
    #[arg(short, long, default_value_t = 10.0)]
    duration: f32,
    /// How the pointer moves during the run.
    #[arg(long, value_enum, default_value_t = PointerScript::Stir)]
    pointer: PointerScript,
    /// Radius of the stirring circle.
    #[arg(long, default_value_t = 80.0)]
    stir_radius: f32,
    /// Revolutions per second of the stirring pointer.
    #[arg(long, default_value_t = 0.5)]
    stir_speed: f32,
    /// Time at which stirring starts, in seconds.
    #[arg(long, default_value_t = 2.0)]
    stir_from: f32,
    /// Time at which stirring stops, in seconds.
    #[arg(long, default_value_t = 5.0)]
    stir_until: f32,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PointerScript {
    /// No pointer.
    None,
    /// Pointer circles around the lower half of the domain.
    Stir,
}

#[derive(Args)]
pub struct ParamArgs {
    #[arg(short = 'n', long, default_value_t = SphParams::default().particle_count)]
    particles: usize,
    #[arg(long, default_value_t = SphParams::default().half_extent)]
    half_extent: f32,
    #[arg(long, default_value_t = SphParams::default().particle_radius)]
    particle_radius: f32,
    #[arg(long, default_value_t = SphParams::default().interaction_radius)]
    interaction_radius: f32,
    #[arg(long, default_value_t = SphParams::default().rest_density)]
    rest_density: f32,
    #[arg(long, default_value_t = SphParams::default().stiffness)]
    stiffness: f32,
    #[arg(long, default_value_t = SphParams::default().viscosity)]
    viscosity: f32,
    #[arg(long, default_value_t = SphParams::default().damping)]
    damping: f32,
    #[arg(long, default_value_t = SphParams::default().pointer_radius)]
    pointer_radius: f32,
    #[arg(long, default_value_t = SphParams::default().mass)]
    mass: f32,
    #[arg(long, default_value_t = SphParams::default().gravity.x, allow_hyphen_values = true)]
    gravity_x: f32,
    #[arg(long, default_value_t = SphParams::default().gravity.y, allow_hyphen_values = true)]
    gravity_y: f32,
    #[arg(long, default_value_t = SphParams::default().surface_tension)]
    surface_tension: f32,
}

impl From<ParamArgs> for SphParams {
    fn from(args: ParamArgs) -> Self {
        SphParams {
            particle_count: args.particles,
            half_extent: args.half_extent,
            particle_radius: args.particle_radius,
            interaction_radius: args.interaction_radius,
            rest_density: args.rest_density,
            stiffness: args.stiffness,
            viscosity: args.viscosity,
            damping: args.damping,
            pointer_radius: args.pointer_radius,
            mass: args.mass,
            gravity: Vec2::new(args.gravity_x, args.gravity_y),
            surface_tension: args.surface_tension,
        }
    }
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run::run_d2(args),
        Command::Inspect { path } => inspect::inspect(path),
    }
}
