//! somtour CLI - approximate TSP tours with a self-organizing neuron ring.

use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somtour::{
    load_dataset, Bounds, DecaySpec, NullSnapshotter, PngSnapshotter, Result, SnapshotConfig,
    Snapshotter, SomTourError, Trainer, TrainingConfig,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "somtour")]
#[command(version)]
#[command(about = "TSP tour approximation with a ring-topology SOM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a neuron ring over a named dataset
    Solve {
        /// Dataset name (resolved under the data directory)
        #[arg(short, long, default_value = "western_sahara")]
        dataset: String,

        /// Directory holding dataset files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Number of training iterations
        #[arg(short = 'n', long, default_value = "25000")]
        iterations: usize,

        /// Output directory for snapshot frames
        #[arg(short, long, default_value = "snapshots")]
        out_dir: PathBuf,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Learning-rate schedule (constant, linear, exponential)
        #[arg(long, default_value = "exponential")]
        decay: String,

        /// Initial learning rate
        #[arg(long, default_value = "0.8")]
        rate: f64,

        /// Per-iteration decrement for the linear schedule
        #[arg(long, default_value = "0.000032")]
        step: f64,

        /// Per-iteration factor for the exponential schedule
        #[arg(long, default_value = "0.9999")]
        factor: f64,

        /// Ring neurons per city
        #[arg(long, default_value = "4")]
        ring_multiplier: usize,

        /// Divisor applied to the city count for the initial radius
        #[arg(long, default_value = "2")]
        radius_divisor: usize,

        /// Iterations between radius decrements
        #[arg(long, default_value = "2000")]
        radius_period: usize,

        /// Padding around the dataset bounds for ring initialization
        #[arg(long, default_value = "0.0")]
        padding: f64,

        /// Skip snapshot rendering
        #[arg(long)]
        no_snapshots: bool,
    },

    /// Show statistics for a named dataset
    Info {
        /// Dataset name
        dataset: String,

        /// Directory holding dataset files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Solve {
            dataset,
            data_dir,
            iterations,
            out_dir,
            seed,
            decay,
            rate,
            step,
            factor,
            ring_multiplier,
            radius_divisor,
            radius_period,
            padding,
            no_snapshots,
        } => solve(SolveArgs {
            dataset,
            data_dir,
            iterations,
            out_dir,
            seed,
            decay,
            rate,
            step,
            factor,
            ring_multiplier,
            radius_divisor,
            radius_period,
            padding,
            no_snapshots,
        }),

        Commands::Info { dataset, data_dir } => info(&dataset, &data_dir),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct SolveArgs {
    dataset: String,
    data_dir: PathBuf,
    iterations: usize,
    out_dir: PathBuf,
    seed: Option<u64>,
    decay: String,
    rate: f64,
    step: f64,
    factor: f64,
    ring_multiplier: usize,
    radius_divisor: usize,
    radius_period: usize,
    padding: f64,
    no_snapshots: bool,
}

fn decay_spec(kind: &str, rate: f64, step: f64, factor: f64) -> Result<DecaySpec> {
    match kind {
        "constant" => Ok(DecaySpec::Constant { value: rate }),
        "linear" => Ok(DecaySpec::Linear {
            initial: rate,
            step,
        }),
        "exponential" => Ok(DecaySpec::Exponential {
            initial: rate,
            factor,
        }),
        other => Err(SomTourError::Config(format!(
            "unknown decay schedule '{other}' (expected constant, linear, or exponential)"
        ))),
    }
}

fn solve(args: SolveArgs) -> Result<()> {
    let start_time = Instant::now();

    let training = TrainingConfig {
        iterations: args.iterations,
        learning_rate: decay_spec(&args.decay, args.rate, args.step, args.factor)?,
        ring_size_multiplier: args.ring_multiplier,
        initial_radius_divisor: args.radius_divisor,
        radius_decay_period: args.radius_period,
        bounds_padding: args.padding,
        seed: args.seed,
    };
    training.validate()?;

    let cities = load_dataset(&args.dataset, &args.data_dir)?;
    println!(
        "✓ Loaded dataset '{}' ({} cities)",
        args.dataset,
        cities.len()
    );

    let mut rng = match training.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let bounds = Bounds::of(&cities)?;
    let mut trainer = Trainer::new(cities, &training, &mut rng)?;
    println!(
        "✓ Initialized ring ({} neurons, initial radius {})",
        trainer.ring().len(),
        trainer.radius()
    );

    let mut snapshotter: Box<dyn Snapshotter> = if args.no_snapshots {
        Box::new(NullSnapshotter)
    } else {
        let snapshot = SnapshotConfig {
            output_dir: args.out_dir.clone(),
            ..Default::default()
        };
        Box::new(PngSnapshotter::new(snapshot, &bounds)?)
    };

    let bar_style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap()
        .progress_chars("█▓▒░  ");
    let pb = ProgressBar::new(training.iterations as u64);
    pb.set_style(bar_style);

    let cancel = AtomicBool::new(false);
    trainer.train_with_progress(snapshotter.as_mut(), &cancel, |_| pb.inc(1))?;
    pb.finish_and_clear();

    let elapsed = start_time.elapsed();
    println!("✓ Trained for {} iterations", format_number(args.iterations));
    println!();
    println!("Run complete in {}", HumanDuration(elapsed));
    println!("   Final learning rate: {:.6}", trainer.learning_rate());
    println!("   Final radius: {}", trainer.radius());
    if !args.no_snapshots {
        println!("   Snapshots: {}", args.out_dir.display());
    }

    Ok(())
}

fn info(dataset: &str, data_dir: &Path) -> Result<()> {
    let cities = load_dataset(dataset, data_dir)?;
    let bounds = Bounds::of(&cities)?;

    println!("Dataset: {}", dataset);
    println!("  Cities: {}", cities.len());
    println!("  X range: {:.3} .. {:.3}", bounds.min_x, bounds.max_x);
    println!("  Y range: {:.3} .. {:.3}", bounds.min_y, bounds.max_y);
    println!(
        "  Default ring: {} neurons, initial radius {}",
        TrainingConfig::default().ring_size(cities.len()),
        TrainingConfig::default().initial_radius(cities.len())
    );

    Ok(())
}

/// Format large numbers with commas for readability
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
