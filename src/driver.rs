// driver.rs - Orchestrates the three operating modes over lattice + sink

use crate::config::Config;
use crate::lattice::Lattice;
use crate::metropolis;
use crate::observables;
use crate::output::{OutputSink, Series};
use crate::stats;
use anyhow::{ensure, Result};
use indicatif::ProgressBar;
use rand::Rng;

/// Drives a parameter sweep or an evolution run. The driver owns the
/// stepping policy and hands every computed row or frame to the sink; all
/// file and plotting concerns live behind the sink.
pub struct Driver {
    config: Config,
    progress: Option<ProgressBar>,
}

impl Driver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Attach a progress bar that ticks once per visited condition.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn tick(&self) {
        if let Some(bar) = &self.progress {
            bar.inc(1);
        }
    }

    /// Mode 1: fixed field, temperature swept. Emits four series in
    /// lock-step over the same temperature range: instantaneous energy,
    /// |instantaneous magnetization|, and the heat capacity and
    /// susceptibility derived from the sample fluctuations.
    pub fn temperature_sweep<R: Rng, S: OutputSink>(
        &self,
        lattice: &mut Lattice<R>,
        field: f64,
        sink: &mut S,
    ) -> Result<()> {
        let cfg = &self.config;
        let mut temp = cfg.temp_start;
        while temp < cfg.temp_max {
            metropolis::equilibrate(lattice, temp, field, cfg.equil_sweeps);
            let samples = stats::sample(lattice, temp, field, cfg.sample_sweeps);

            sink.record(Series::Energy, temp, observables::energy(lattice, field))?;
            sink.record(
                Series::Magnetization,
                temp,
                observables::magnetization(lattice).abs(),
            )?;
            sink.record(
                Series::HeatCapacity,
                temp,
                stats::heat_capacity(samples.energy_std_dev(), temp),
            )?;
            sink.record(
                Series::Susceptibility,
                temp,
                stats::susceptibility(samples.magnetization_std_dev(), temp),
            )?;

            self.tick();
            temp += cfg.temp_step;
        }
        sink.finish()
    }

    /// Mode 2: fixed temperature, field swept from zero upward. Emits one
    /// (B, magnetization) pair per condition. Fails before any sweep if the
    /// temperature is not strictly positive.
    pub fn field_sweep<R: Rng, S: OutputSink>(
        &self,
        lattice: &mut Lattice<R>,
        temperature: f64,
        sink: &mut S,
    ) -> Result<()> {
        ensure!(
            temperature > 0.0,
            "temperature must be strictly positive, got {temperature}"
        );

        let cfg = &self.config;
        let mut field = cfg.field_start;
        while field < cfg.field_max {
            metropolis::equilibrate(lattice, temperature, field, cfg.equil_sweeps);
            stats::sample(lattice, temperature, field, cfg.sample_sweeps);

            sink.record(
                Series::FieldResponse,
                field,
                observables::magnetization(lattice),
            )?;

            self.tick();
            field += cfg.field_step;
        }
        sink.finish()
    }

    /// Mode 3: fixed (T, B), raw domain evolution with periodic snapshots.
    /// Runs `snapshot_sweeps` sweeps and emits exactly `images` frames, the
    /// first straight after sweep 0, then every `snapshot_sweeps / images`
    /// sweeps. No equilibration or statistics here; the frames show the
    /// domains forming, not equilibrium averages.
    pub fn domain_evolution<R: Rng, S: OutputSink>(
        &self,
        lattice: &mut Lattice<R>,
        temperature: f64,
        field: f64,
        images: usize,
        sink: &mut S,
    ) -> Result<()> {
        ensure!(
            temperature > 0.0,
            "temperature must be strictly positive, got {temperature}"
        );
        ensure!(images > 0, "image count must be positive, got {images}");

        let cfg = &self.config;
        let interval = (cfg.snapshot_sweeps / images).max(1);
        let mut emitted = 0usize;
        for sweep_idx in 0..cfg.snapshot_sweeps {
            metropolis::sweep(lattice, temperature, field);
            if sweep_idx % interval == 0 && emitted < images {
                sink.snapshot(lattice.size(), lattice.spins())?;
                emitted += 1;
            }
            self.tick();
        }
        sink.finish()
    }
}
