//! flock — command-line front end for the vicsek flocking engine.
//!
//! Loads parameters from an optional TOML file, applies flag overrides, runs
//! the simulation and streams `positions.csv` / `steps.csv` to the output
//! directory.  A `tail.csv` with the fading-trail layers of every animation
//! frame is written afterwards for external plotting.
//!
//! ```text
//! RUST_LOG=vk_sim=debug flock --agents 300 --noise 0.3 --steps 200 --out output/flock
//! flock --config flock.toml --cell-list --tail 8
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vk_core::{
    DegeneratePolicy, InitialPlacement, PeriodicRule, Step, TAIL_LENGTH_BOUNDS, Vec2, VicsekConfig,
    VkError, VkResult,
};
use vk_output::{CsvWriter, OutputWriter, SimOutputObserver, TailPlan, write_tail_csv};
use vk_sim::{SimBuilder, SimObserver};
use vk_spatial::CellList;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_LOG_FILTER: &str = "flock=info,vk_sim=info";
const TABLE_ROWS:         usize = 8;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "flock", about = "Vicsek flocking simulation")]
struct Args {
    /// TOML file with `VicsekConfig` fields; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of agents (N).
    #[arg(long)]
    agents: Option<usize>,

    /// Side length of the periodic square domain (L).
    #[arg(long)]
    domain: Option<f64>,

    /// Interaction radius (R).
    #[arg(long)]
    radius: Option<f64>,

    /// Noise strength (eta).
    #[arg(long)]
    noise: Option<f64>,

    /// Agent speed (v).
    #[arg(long)]
    speed: Option<f64>,

    /// Time step (dt).
    #[arg(long)]
    dt: Option<f64>,

    /// Number of frames including the initial one (T).
    #[arg(long)]
    steps: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Stream a frame to positions.csv every this many steps (0 = never).
    #[arg(long)]
    output_interval: Option<u64>,

    /// Use the historical `(L/2)²` periodic correction.
    #[arg(long)]
    legacy_periodic: bool,

    /// Draw initial positions as `L · U[0, L)` instead of uniform in the domain.
    #[arg(long)]
    legacy_placement: bool,

    /// Keep the previous heading instead of failing on a zero-length mean.
    #[arg(long)]
    retain_degenerate: bool,

    /// Resolve neighbors with the cell-list grid.
    #[arg(long)]
    cell_list: bool,

    /// Output directory.
    #[arg(short, long, default_value = "output/flock")]
    out: PathBuf,

    /// Trail length of the animation, in frames.
    #[arg(long, default_value_t = 5)]
    tail: usize,

    /// Frames fed to the animation (defaults to the whole run).
    #[arg(long)]
    frames: Option<usize>,
}

impl Args {
    fn apply(&self, config: &mut VicsekConfig) {
        if let Some(v) = self.agents {
            config.agents = v;
        }
        if let Some(v) = self.domain {
            config.domain = v;
        }
        if let Some(v) = self.radius {
            config.radius = v;
        }
        if let Some(v) = self.noise {
            config.noise = v;
        }
        if let Some(v) = self.speed {
            config.speed = v;
        }
        if let Some(v) = self.dt {
            config.dt = v;
        }
        if let Some(v) = self.steps {
            config.steps = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.output_interval {
            config.output_interval = v;
        }
        if self.legacy_periodic {
            config.periodic_rule = PeriodicRule::Legacy;
        }
        if self.legacy_placement {
            config.placement = InitialPlacement::LegacyScaled;
        }
        if self.retain_degenerate {
            config.degenerate = DegeneratePolicy::RetainPrevious;
        }
    }
}

fn load_config(path: &Path) -> VkResult<VicsekConfig> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| VkError::Parse(e.to_string()))
}

// ── Observer wrapper: counts rows and logs progress ───────────────────────────

struct FlockObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    frame_rows:   usize,
    summary_rows: usize,
    report_every: u64,
}

impl<W: OutputWriter> FlockObserver<W> {
    fn new(inner: SimOutputObserver<W>, config: &VicsekConfig) -> Self {
        Self {
            inner,
            frame_rows:   0,
            summary_rows: 0,
            report_every: (config.steps as u64 / 10).max(1),
        }
    }
}

impl<W: OutputWriter> SimObserver for FlockObserver<W> {
    fn on_step_end(&mut self, step: Step, neighbor_links: usize) {
        self.summary_rows += 1;
        if step.0.is_multiple_of(self.report_every) {
            tracing::info!(%step, neighbor_links, "progress");
        }
        self.inner.on_step_end(step, neighbor_links);
    }

    fn on_frame(&mut self, step: Step, positions: &[Vec2], headings: &[Vec2]) {
        self.frame_rows += positions.len();
        self.inner.on_frame(step, positions, headings);
    }

    fn on_run_end(&mut self, final_step: Step) {
        self.inner.on_run_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // 1. Parameters: file, then flags.
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => VicsekConfig::default(),
    };
    args.apply(&mut config);

    for violation in config.check_interactive_bounds() {
        tracing::warn!(%violation, "parameter outside the interactive range");
    }
    let (tail_min, tail_max) = TAIL_LENGTH_BOUNDS;
    if !(tail_min..=tail_max).contains(&args.tail) {
        tracing::warn!(tail = args.tail, tail_min, tail_max, "tail length outside the interactive range");
    }

    println!("=== flock — vicsek flocking ===");
    println!(
        "N: {}  |  L: {}  |  R: {}  |  eta: {}  |  v: {}  |  dt: {}  |  T: {}  |  seed: {}",
        config.agents,
        config.domain,
        config.radius,
        config.noise,
        config.speed,
        config.dt,
        config.steps,
        config.seed,
    );
    println!(
        "periodic rule: {:?}  |  placement: {:?}  |  degenerate: {:?}  |  resolver: {}",
        config.periodic_rule,
        config.placement,
        config.degenerate,
        if args.cell_list { "cell list" } else { "brute force" },
    );
    println!();

    // 2. Output.
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let writer = CsvWriter::new(&args.out)?;
    let mut obs = FlockObserver::new(SimOutputObserver::new(writer, &config), &config);

    // 3. Run.
    let t0 = Instant::now();
    let builder = SimBuilder::new(config.clone());
    let output = if args.cell_list {
        builder.resolver(CellList::default()).build()?.run(&mut obs)?
    } else {
        builder.build()?.run(&mut obs)?
    };
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Animation trail.
    let available = output.frame_count();
    let plan = TailPlan::new(available, args.tail, args.frames.unwrap_or(available))?;
    write_tail_csv(&args.out, &plan, &output.positions)?;

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  positions.csv : {} rows", obs.frame_rows);
    println!("  steps.csv     : {} rows", obs.summary_rows);
    println!(
        "  tail.csv      : {} animation frames × {} layers",
        plan.animation_frames(),
        plan.tail_length()
    );
    println!();

    let (Some(positions), Some(headings)) =
        (output.positions.last_frame(), output.headings.last_frame())
    else {
        return Ok(());
    };
    println!("{:<8} {:>10} {:>10} {:>9} {:>9}", "Agent", "x", "y", "hx", "hy");
    println!("{}", "-".repeat(50));
    for (i, (p, h)) in positions.iter().zip(headings).take(TABLE_ROWS).enumerate() {
        println!("{:<8} {:>10.4} {:>10.4} {:>9.4} {:>9.4}", i, p.x, p.y, h.x, h.y);
    }
    if positions.len() > TABLE_ROWS {
        println!("... {} more", positions.len() - TABLE_ROWS);
    }

    Ok(())
}
