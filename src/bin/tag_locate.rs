use std::{io, path::{Path, PathBuf}};

use anyhow::Context;
use apriltag_locate::{
    hud::{JsonLines, Renderer, TextHud},
    replay::{ReplayDetector, Scene},
    LocatorConfig, TimeProfileStatistics,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Tag registry and camera configuration (JSON). Uses the built-in setup if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Recorded scene to replay (JSON)
    #[arg(short, long)]
    scene: PathBuf,
    /// Print reports as JSON lines instead of HUD text
    #[arg(long, default_value_t=false)]
    json: bool,
    /// Fuse tracked objects in parallel
    #[arg(short, long, default_value_t=false)]
    parallel: bool,
    /// Use this many threads for parallel fusion (0 = rayon default)
    #[arg(short, long, default_value_t=0)]
    threads: usize,
    /// Print frame rate after each frame
    #[arg(long, default_value_t=false)]
    fps: bool,
    /// Repeat the scene this many times
    #[arg(short, long, default_value_t=1)]
    iters: usize,
    /// Print stage timing statistics when done
    #[arg(long, default_value_t=false)]
    profile: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LocatorConfig> {
    match path {
        Some(path) => LocatorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            tracing::info!("no config given, using built-in tags");
            Ok(LocatorConfig::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("configuring thread pool")?;
    }

    let config = load_config(args.config.as_deref())?;
    let pipeline = config.build()
        .context("invalid configuration")?
        .with_parallel(args.parallel);

    let scene = Scene::load(&args.scene)
        .with_context(|| format!("loading scene {}", args.scene.display()))?;
    let base_dir = args.scene.parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    tracing::info!(frames = scene.frames.len(), "replaying scene");

    let stdout = io::stdout().lock();
    let mut renderer: Box<dyn Renderer> = if args.json {
        Box::new(JsonLines::new(stdout))
    } else {
        let mut hud = TextHud::new(stdout);
        hud.show_fps = args.fps;
        Box::new(hud)
    };

    let mut stats = TimeProfileStatistics::default();
    let mut detector = ReplayDetector;

    for iter in 0..args.iters {
        if args.iters > 1 {
            tracing::info!("iter {} / {}", iter + 1, args.iters);
        }
        for (i, frame) in scene.frames.iter().enumerate() {
            let blobs = frame.blob_source_or_empty(&base_dir);
            let report = pipeline.process_frame(&mut detector, frame, &blobs);
            if report.unknown_markers > 0 {
                tracing::debug!(frame = i, unknown = report.unknown_markers, "frame had unregistered markers");
            }

            renderer.render(&report)
                .context("writing report")?;
            stats.add(&report.tp);
        }
    }

    if args.profile {
        eprintln!("{} frames", stats.count());
        eprint!("{stats}");
    }

    Ok(())
}
