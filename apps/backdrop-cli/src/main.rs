use anyhow::{Context, Result};
use backdrop_capture::CaptureStore;
use backdrop_common::{BackdropConfig, PointerOffset, Viewport};
use backdrop_render::{DebugTextRenderer, Renderer};
use backdrop_runtime::{DisplayCaps, evaluate_gate};
use backdrop_scene::Scene;
use backdrop_tools::SceneInspector;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backdrop-cli", about = "CLI for backdrop operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Tuning configuration file (YAML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print configuration and gate decisions for common viewports
    Info,
    /// Step the scene headless and report convergence
    Simulate {
        /// Number of frames to advance
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Normalized pointer x in [-1, 1]
        #[arg(long, default_value = "0.5", allow_hyphen_values = true)]
        pointer_x: f32,
        /// Normalized pointer y in [-1, 1]
        #[arg(long, default_value = "-0.25", allow_hyphen_values = true)]
        pointer_y: f32,
    },
    /// Validate a configuration file
    Validate {
        /// Path to the YAML file
        path: PathBuf,
    },
    /// Add an address to the capture store
    CaptureAdd {
        email: String,
        /// Directory of the capture store
        #[arg(long, default_value = "./backdrop_data")]
        data_dir: PathBuf,
    },
    /// List captured addresses
    CaptureList {
        /// Directory of the capture store
        #[arg(long, default_value = "./backdrop_data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => BackdropConfig::from_yaml_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BackdropConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("backdrop-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "mesh: {}x{} segments ({} vertices)",
                config.mesh.cols,
                config.mesh.rows,
                config.vertex_count()
            );
            println!(
                "wave: freq=({}, {}) amp=({}, {}) increment={}",
                config.wave.freq_x,
                config.wave.freq_z,
                config.wave.amp_x,
                config.wave.amp_z,
                config.wave.phase_increment
            );
            for (label, caps) in [
                (
                    "desktop 1920px",
                    DisplayCaps {
                        touch_input: false,
                        viewport_width: 1920,
                    },
                ),
                (
                    "phone 390px",
                    DisplayCaps {
                        touch_input: false,
                        viewport_width: 390,
                    },
                ),
                (
                    "tablet touch 1024px",
                    DisplayCaps {
                        touch_input: true,
                        viewport_width: 1024,
                    },
                ),
            ] {
                println!("gate {label}: {:?}", evaluate_gate(caps, &config.gate));
            }
        }
        Commands::Simulate {
            frames,
            pointer_x,
            pointer_y,
        } => {
            let viewport = Viewport::new(1280, 720);
            let mut scene = Scene::new(config.clone(), viewport)?;
            scene.set_pointer(PointerOffset::new(pointer_x, pointer_y));

            let start = SceneInspector::summary(&scene);
            for _ in 0..frames {
                scene.advance_frame();
            }
            let end = SceneInspector::summary(&scene);

            println!("{start}");
            println!("{end}");
            let target = scene.pointer_target();
            println!(
                "camera target ({:.2}, {:.2}, {:.2}), remaining distance {:.3}",
                target.x,
                target.y,
                target.z,
                (target - scene.camera().position).length()
            );

            // Run the same stepping twice; the scene is deterministic.
            let mut replay = Scene::new(config, viewport)?;
            replay.set_pointer(PointerOffset::new(pointer_x, pointer_y));
            for _ in 0..frames {
                replay.advance_frame();
            }
            let matches = replay.phase().to_bits() == scene.phase().to_bits()
                && replay.camera().position == scene.camera().position;
            println!("replay match: {}", if matches { "OK" } else { "MISMATCH" });

            print!("{}", DebugTextRenderer::new().render(&scene));
        }
        Commands::Validate { path } => {
            let config = BackdropConfig::from_yaml_path(&path)
                .with_context(|| format!("validating {}", path.display()))?;
            println!(
                "{} OK ({} vertices)",
                path.display(),
                config.vertex_count()
            );
        }
        Commands::CaptureAdd { email, data_dir } => {
            let mut store = CaptureStore::open(&data_dir)?;
            let record = store.submit(&email)?;
            println!("captured {} at ts={}", record.email, record.ts);
        }
        Commands::CaptureList { data_dir } => {
            let store = CaptureStore::open(&data_dir)?;
            println!("{} record(s)", store.len());
            for record in store.records() {
                println!("  {} ts={}", record.email, record.ts);
            }
        }
    }

    Ok(())
}
