use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::DVec2;
use gridcast_common::level::DEFAULT_FOV_DEGREES;
use gridcast_common::{GridMap, Level, Pose};
use gridcast_raycast::{EngineConfig, FrameTimer, RaycastEngine};
use gridcast_render::{DebugTextRenderer, RenderView, Renderer};
use tracing_subscriber::EnvFilter;

const BUILTIN_LEVEL: &str = include_str!("../../../levels/courtyard.yaml");

#[derive(Parser)]
#[command(name = "gridcast", about = "CLI tool for tile-grid raycasting")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct LevelArgs {
    /// Level file (YAML, or JSON by extension); defaults to the built-in courtyard
    #[arg(short, long)]
    level: Option<PathBuf>,
    /// Screen columns to cast; overrides the level's own setting
    #[arg(short, long)]
    columns: Option<usize>,
    /// Extra turn applied to the spawn pose, in degrees
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    turn: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Cast one frame and print every column's hit record
    Cast {
        #[command(flatten)]
        level: LevelArgs,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cast one frame and draw it as text
    Render {
        #[command(flatten)]
        level: LevelArgs,
        /// Output height in rows
        #[arg(short, long, default_value = "24")]
        rows: usize,
    },
    /// Time repeated casts while turning in place
    Bench {
        #[command(flatten)]
        level: LevelArgs,
        /// Number of frames to cast
        #[arg(short, long, default_value = "1000")]
        frames: usize,
        /// Bench a generated pillared arena of this side length instead of the level
        #[arg(short, long)]
        size: Option<usize>,
    },
}

/// A level ready to cast: the map, the pose, and an engine sized for it.
struct Scene {
    level: Level,
    engine: RaycastEngine,
}

impl Scene {
    fn load(args: &LevelArgs) -> anyhow::Result<Self> {
        let level = match &args.level {
            Some(path) => Level::load(path)
                .with_context(|| format!("loading level {}", path.display()))?,
            None => Level::from_yaml_str(BUILTIN_LEVEL).context("parsing built-in level")?,
        };
        Self::build(level, args)
    }

    /// A generated arena of side `size`, viewed from its open corner cell.
    fn arena(size: usize, args: &LevelArgs) -> anyhow::Result<Self> {
        if size < 3 {
            anyhow::bail!("--size must be at least 3");
        }
        let level = Level {
            name: format!("arena-{size}"),
            map: GridMap::arena(size),
            spawn: Pose::from_angle(
                DVec2::new(1.5, 1.5),
                std::f64::consts::FRAC_PI_4,
                DEFAULT_FOV_DEGREES.to_radians(),
            ),
            columns: None,
        };
        Self::build(level, args)
    }

    fn build(mut level: Level, args: &LevelArgs) -> anyhow::Result<Self> {
        level.spawn = level.spawn.rotated(args.turn.to_radians());

        let config = EngineConfig {
            column_count: args
                .columns
                .or(level.columns)
                .unwrap_or(EngineConfig::default().column_count),
        };
        let engine = RaycastEngine::new(&config)?;
        tracing::debug!(
            level = %level.name,
            columns = config.column_count,
            "scene ready"
        );
        Ok(Self { level, engine })
    }

    fn cast(&mut self) {
        self.engine.cast(&self.level.spawn, &self.level.map);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gridcast v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", gridcast_common::crate_info());
            println!("raycast: {}", gridcast_raycast::crate_info());
            println!("render: {}", gridcast_render::crate_info());
        }
        Commands::Cast { level, json } => {
            let mut scene = Scene::load(&level)?;
            scene.cast();

            if json {
                println!("{}", serde_json::to_string_pretty(scene.engine.records())?);
            } else {
                let pose = scene.level.spawn;
                println!(
                    "Level '{}' ({}x{}), viewer at ({:.2}, {:.2}) facing {:.1} deg, fov {:.1} deg",
                    scene.level.name,
                    scene.level.map.width(),
                    scene.level.map.height(),
                    pose.position.x,
                    pose.position.y,
                    pose.angle().to_degrees(),
                    pose.fov().to_degrees()
                );
                for (x, record) in scene.engine.records().iter().enumerate() {
                    println!("  [{x:>4}] {record}");
                }
                println!("Stats: {}", scene.engine.stats());
            }
        }
        Commands::Render { level, rows } => {
            if rows == 0 {
                anyhow::bail!("--rows must be at least 1");
            }
            let mut scene = Scene::load(&level)?;
            scene.cast();
            let view = RenderView {
                rows,
                ..RenderView::default()
            };
            print!("{}", DebugTextRenderer::new().render(scene.engine.records(), &view));
        }
        Commands::Bench {
            level,
            frames,
            size,
        } => {
            if frames == 0 {
                anyhow::bail!("--frames must be at least 1");
            }
            let mut scene = match size {
                Some(size) => Scene::arena(size, &level)?,
                None => Scene::load(&level)?,
            };
            let spawn = scene.level.spawn;
            let mut timer = FrameTimer::new(frames.min(4096));
            let mut steps = 0usize;

            for i in 0..frames {
                let turn = std::f64::consts::TAU * i as f64 / frames as f64;
                scene.engine.cast(&spawn.rotated(turn), &scene.level.map);
                timer.record(scene.engine.stats().elapsed);
                steps += scene.engine.stats().total_steps;
            }

            println!(
                "Bench: {} frames x {} columns on '{}'",
                frames,
                scene.engine.column_count(),
                scene.level.name
            );
            println!(
                "  avg {:?}  min {:?}  max {:?}  ({:.0} casts/s)",
                timer.average(),
                timer.min(),
                timer.max(),
                timer.fps()
            );
            println!(
                "  mean steps per column {:.2}",
                steps as f64 / (frames * scene.engine.column_count()) as f64
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(columns: Option<usize>) -> LevelArgs {
        LevelArgs {
            level: None,
            columns,
            turn: 0.0,
        }
    }

    #[test]
    fn builtin_level_parses() {
        let level = Level::from_yaml_str(BUILTIN_LEVEL).unwrap();
        assert_eq!(level.name, "courtyard");
        assert_eq!(level.map.width(), 13);
        assert_eq!(level.columns, Some(96));
    }

    #[test]
    fn column_flag_overrides_level() {
        assert_eq!(Scene::load(&args(None)).unwrap().engine.column_count(), 96);
        assert_eq!(Scene::load(&args(Some(12))).unwrap().engine.column_count(), 12);
        assert!(Scene::load(&args(Some(0))).is_err());
    }

    #[test]
    fn builtin_scene_casts_inside_walls() {
        let mut scene = Scene::load(&args(Some(40))).unwrap();
        scene.cast();
        assert_eq!(scene.engine.stats().out_of_bounds, 0);
        assert!(scene.engine.records().iter().all(|r| r.texture_id != 0));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["gridcast", "render", "--rows", "10", "--turn", "-45"]).unwrap();
        match cli.command {
            Commands::Render { level, rows } => {
                assert_eq!(rows, 10);
                assert_eq!(level.turn, -45.0);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn bench_size_builds_arena() {
        let cli = Cli::try_parse_from(["gridcast", "bench", "--size", "16", "--frames", "5"]).unwrap();
        let Commands::Bench { level, frames, size } = cli.command else {
            panic!("expected bench");
        };
        assert_eq!((frames, size), (5, Some(16)));

        let mut scene = Scene::arena(16, &level).unwrap();
        assert_eq!(scene.level.map.width(), 16);
        assert_eq!(scene.engine.column_count(), EngineConfig::default().column_count);
        scene.cast();
        assert_eq!(scene.engine.stats().out_of_bounds, 0);
        assert!(Scene::arena(2, &level).is_err());
    }
}
