mod sketches;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use easel_engine::core::{CanvasConfig, Sketch};
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::window::Runtime;

use sketches::{InputDemo, Shapes3d, Snow, Stars};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Which {
    /// Parallax starfield steered by the mouse.
    Stars,
    /// Falling snowflakes on the C64 blue.
    Snow,
    /// Mouse, keyboard and gamepad state.
    Input,
    /// Rotating solids in perspective.
    Shapes,
}

/// Runs one of the bundled sketches.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(value_enum, default_value = "stars")]
    sketch: Which,

    /// Start in borderless fullscreen (Alt+Enter toggles).
    #[arg(long)]
    fullscreen: bool,

    /// Target frames per second; 0 follows the display.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Sleep off the rest of each frame instead of running flat out.
    #[arg(long)]
    lock_fps: bool,

    /// Log filter, e.g. `debug` or `easel_engine=trace`.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    let config = CanvasConfig::new(960, 540)
        .with_fullscreen(args.fullscreen)
        .with_frame_rate(args.fps)
        .with_locked_frame_rate(args.lock_fps);

    log::info!("starting sketch {:?}", args.sketch);
    match args.sketch {
        Which::Stars => run(config.with_title("stars2d"), Stars::new(960, 540)),
        Which::Snow => run(config.with_title("Snowflakes"), Snow::new(960, 540)),
        Which::Input => run(config.with_title("input"), InputDemo::default()),
        Which::Shapes => run(config.with_title("3D Shapes").three_d(), Shapes3d::default()),
    }
}

fn run<S: Sketch>(config: CanvasConfig, mut sketch: S) -> ! {
    Runtime::run_or_exit(config, &mut sketch)
}
