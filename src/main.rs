//! 2D Ising model of a ferromagnet: Metropolis Monte Carlo on a periodic
//! square lattice.
//!
//! Three mutually exclusive modes, selected at runtime:
//!
//!   -B <FIELD>               fixed field, temperature swept 1..2500 K
//!   -T <TEMP>                fixed temperature, field swept 0..20000 T
//!   -D <TEMP> <FIELD> <N>    domain evolution, N lattice snapshots
//!
//! Each mode writes tab-separated `.dat` files and hands them to the gnuplot
//! scripts shipped next to them (disable with `--no-plots`).

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising2d::config::Config;
use ising2d::driver::Driver;
use ising2d::lattice::Lattice;
use ising2d::output::FileSink;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ising2d", version, about)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(["field", "temperature", "domains"]),
))]
struct Cli {
    /// Fix the applied field (tesla) and sweep the temperature
    #[arg(short = 'B', long = "field", value_name = "FIELD", allow_negative_numbers = true)]
    field: Option<f64>,

    /// Fix the temperature (kelvin, > 0) and sweep the applied field
    #[arg(
        short = 'T',
        long = "temperature",
        value_name = "TEMP",
        allow_negative_numbers = true
    )]
    temperature: Option<f64>,

    /// Evolve at fixed temperature and field, emitting lattice snapshots
    #[arg(
        short = 'D',
        long = "domains",
        num_args = 3,
        value_names = ["TEMP", "FIELD", "IMAGES"],
        allow_negative_numbers = true
    )]
    domains: Option<Vec<String>>,

    /// Lattice side length N (system is N x N)
    #[arg(long, default_value_t = 30)]
    size: usize,

    /// RNG seed; a random one is drawn (and logged) if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for data files and plot scripts
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Write data files but skip the gnuplot invocations
    #[arg(long)]
    no_plots: bool,

    /// Trailing arguments are reported and ignored
    #[arg(trailing_var_arg = true, hide = true)]
    extra: Vec<String>,
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template(" {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]")
            .expect("static progress template"),
    );
    bar
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if !cli.extra.is_empty() {
        eprintln!("Error: Unrecognised arguments: {}", cli.extra.join(" "));
    }

    let config = Config {
        lattice_size: cli.size,
        ..Config::default()
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, size = config.lattice_size, "initialising lattice");
    let mut lattice = Lattice::random(config.lattice_size, ChaCha20Rng::seed_from_u64(seed));

    let mut sink = if cli.no_plots {
        FileSink::new(&cli.output_dir).without_plots()
    } else {
        FileSink::new(&cli.output_dir)
    };

    if let Some(field) = cli.field {
        let bar = progress_bar(config.n_temp_steps());
        let driver = Driver::new(config).with_progress(bar.clone());
        driver.temperature_sweep(&mut lattice, field, &mut sink)?;
        bar.finish();
        println!(
            "Temperature sweep complete → Energy.dat, Magnetisation.dat, \
             HeatCapacity.dat, Susceptibility.dat"
        );
    } else if let Some(temperature) = cli.temperature {
        let bar = progress_bar(config.n_field_steps());
        let driver = Driver::new(config).with_progress(bar.clone());
        driver.field_sweep(&mut lattice, temperature, &mut sink)?;
        bar.finish();
        println!("Field sweep complete → Brillouin.dat");
    } else if let Some(args) = cli.domains {
        let temperature: f64 = args[0]
            .parse()
            .with_context(|| format!("invalid temperature {:?}", args[0]))?;
        let field: f64 = args[1]
            .parse()
            .with_context(|| format!("invalid field {:?}", args[1]))?;
        let images: i64 = args[2]
            .parse()
            .with_context(|| format!("invalid image count {:?}", args[2]))?;
        if images <= 0 {
            bail!("image count must be positive, got {images}");
        }

        let bar = progress_bar(config.snapshot_sweeps);
        let driver = Driver::new(config).with_progress(bar.clone());
        driver.domain_evolution(&mut lattice, temperature, field, images as usize, &mut sink)?;
        bar.finish();
        println!("Domain evolution complete → Domain.dat ({images} frames)");
    }

    Ok(())
}
