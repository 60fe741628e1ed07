use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use voxwalk_input::KeyBindings;
use voxwalk_kernel::{
    CollisionQuery, FrameDriver, InputScript, MovementConfig, PlayerController, StepMode,
};
use voxwalk_tools::PlayerInspector;
use voxwalk_world::{CubeField, FieldSpec};

#[derive(Parser)]
#[command(name = "voxwalk-cli", about = "Headless harness for the voxwalk player simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Movement config (YAML); defaults apply to missing fields
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the player against a world, driven by an input script
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Run ticks of this many seconds instead of one tick per frame
        #[arg(long)]
        fixed_step: Option<f32>,
        /// Input script (YAML list of {tick, event})
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Key bindings (YAML map of key name to action)
        #[arg(long)]
        bindings: Option<PathBuf>,
        /// World boxes (YAML {cell_size, boxes}); overrides --cubes
        #[arg(short, long)]
        world: Option<PathBuf>,
        /// Use the default sandbox grid of cubes
        #[arg(long)]
        cubes: bool,
        /// Print a summary every N frames (0 = only at the end)
        #[arg(long, default_value = "60")]
        report_every: u64,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop the player from a height and report when it lands
    Drop {
        /// Starting height of the body center
        #[arg(long, default_value = "30.0")]
        height: f32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => MovementConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MovementConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("voxwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", voxwalk_input::crate_info());
            println!("kernel: {}", voxwalk_kernel::crate_info());
            println!("world: {}", voxwalk_world::crate_info());
            println!("tools: {}", voxwalk_tools::crate_info());
            println!(
                "defaults: gravity={} jump={} speed={} ground={}",
                config.gravity, config.jump_strength, config.speed, config.ground_level
            );
        }
        Commands::Simulate {
            frames,
            dt,
            fixed_step,
            script,
            bindings,
            world,
            cubes,
            report_every,
            json,
        } => {
            let bindings = match bindings {
                Some(path) => KeyBindings::load(&path)
                    .with_context(|| format!("loading bindings {}", path.display()))?,
                None => KeyBindings::default(),
            };
            let script = match script {
                Some(path) => InputScript::load(&path)
                    .with_context(|| format!("loading script {}", path.display()))?,
                None => InputScript::default(),
            };
            let field = match (world, cubes) {
                (Some(path), _) => Some(load_field(&path)?),
                (None, true) => Some(CubeField::grid(10, 10, 6.0, 2.0)?),
                (None, false) => None,
            };
            let query = field.as_ref().map(|f| f as &dyn CollisionQuery);

            let mut player = PlayerController::with_bindings(config, bindings);
            let mut driver = match fixed_step {
                Some(step) => FrameDriver::new(StepMode::Fixed { step }),
                None => FrameDriver::default(),
            };
            let mut cursor = script.player();
            let mut respawns = 0u32;

            tracing::info!(
                frames,
                dt,
                boxes = field.as_ref().map_or(0, |f| f.len()),
                "simulation starting"
            );
            for frame in 0..frames {
                cursor.deliver(frame, &mut player);
                let report = driver.advance(dt, &mut player, query);
                if report.outcome.respawned {
                    respawns += 1;
                }
                if report_every > 0 && (frame + 1) % report_every == 0 {
                    println!(
                        "[{:>6}] {}",
                        frame + 1,
                        PlayerInspector::summary(&player)
                    );
                }
            }

            let summary = PlayerInspector::summary(&player);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Final: {summary}");
                println!(
                    "Frames: {} avg_dt={:?} respawns={}",
                    driver.frames(),
                    driver.timer().average(),
                    respawns
                );
            }
            if !cursor.finished() {
                tracing::warn!("script has events scheduled past the last frame");
            }
        }
        Commands::Drop { height, dt } => {
            anyhow::ensure!(dt > 0.0, "dt must be positive");
            let mut player = PlayerController::new(config);
            player.body_mut().position = Vec3::new(0.0, height, 0.0);
            let mut driver = FrameDriver::default();

            // Generous cap: free fall from any sane height lands well before this.
            let limit = (120.0 / dt) as u64;
            let mut landed_at = None;
            for frame in 1..=limit {
                let report = driver.advance(dt, &mut player, None);
                if report.outcome.landed {
                    landed_at = Some(frame);
                    break;
                }
            }
            match landed_at {
                Some(frame) => println!(
                    "Landed after {frame} frames ({:.3}s): {}",
                    frame as f32 * dt,
                    PlayerInspector::summary(&player)
                ),
                None => println!(
                    "Did not land within {limit} frames: {}",
                    PlayerInspector::summary(&player)
                ),
            }
        }
    }

    Ok(())
}

fn load_field(path: &Path) -> anyhow::Result<CubeField> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading world {}", path.display()))?;
    let spec: FieldSpec = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing world {}", path.display()))?;
    Ok(CubeField::from_spec(&spec)?)
}
