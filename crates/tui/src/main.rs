mod renderer;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use flamegrid_core::{FlameConfig, FlameGraph, load_model};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flamegrid")]
#[command(about = "Interactive flame graph for call-tree profiles", long_about = None)]
struct Args {
    /// Call-tree model JSON.
    model: PathBuf,

    /// Flame graph config JSON; row metrics are overridden to one cell.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs here. The terminal belongs to the UI, so without this
    /// nothing is logged.
    #[arg(short, long)]
    log: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FlameConfig> {
    let mut config = match path {
        Some(path) => {
            let data =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            FlameConfig::from_json(&data).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FlameConfig::default(),
    };
    config.row_height = 1.0;
    config.header_height = 1.0;
    config.handle_grab = config.handle_grab.min(1.0);
    config.min_box_width = config.min_box_width.max(1.0);
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(log) = &args.log {
        init_logging(log)?;
    }

    let config = load_config(args.config.as_deref())?;
    let data =
        std::fs::read(&args.model).with_context(|| format!("reading {}", args.model.display()))?;
    let model =
        load_model(&data).with_context(|| format!("loading model {}", args.model.display()))?;
    info!(
        path = %args.model.display(),
        nodes = model.nodes.len(),
        samples = model.samples.len(),
        "loaded call-tree model"
    );

    let mut graph = FlameGraph::new(config);
    graph.set_model(Arc::new(model));
    renderer::run(&mut graph)
}
