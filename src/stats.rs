// stats.rs - Online moment accumulation and derived response functions

use crate::constants::KB;
use crate::lattice::Lattice;
use crate::metropolis;
use crate::observables;
use rand::Rng;

/// Running mean and mean-of-squares, updated one sample at a time with
/// `avg_new = (avg_old * n + x) / (n + 1)`.
///
/// This is the plain incremental-moment form, kept deliberately instead of a
/// compensated scheme: the variance estimate `<x²> - <x>²` can come out a
/// hair negative under cancellation, which callers guard where it matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    mean_sq: f64,
}

impl RunningStats {
    pub fn push(&mut self, x: f64) {
        let n = self.count as f64;
        self.mean = (self.mean * n + x) / (n + 1.0);
        self.mean_sq = (self.mean_sq * n + x * x) / (n + 1.0);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn mean_sq(&self) -> f64 {
        self.mean_sq
    }

    /// Population variance estimate `<x²> - <x>²` (may be slightly negative
    /// from floating-point cancellation).
    pub fn variance(&self) -> f64 {
        self.mean_sq - self.mean * self.mean
    }
}

/// Final accumulator state for one (T, B) condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleStats {
    pub energy: RunningStats,
    pub magnetization: RunningStats,
}

impl SampleStats {
    /// Standard deviation of the energy samples.
    pub fn energy_std_dev(&self) -> f64 {
        self.energy.variance().sqrt()
    }

    /// Standard deviation of the magnetization samples. The absolute value
    /// guards against small negative variance estimates from cancellation.
    pub fn magnetization_std_dev(&self) -> f64 {
        self.magnetization.variance().abs().sqrt()
    }
}

/// Sample `count` post-equilibration sweeps: each iteration performs one
/// sweep, measures energy and magnetization, and pushes both into the
/// accumulators. Only the final state is returned.
pub fn sample<R: Rng>(
    lattice: &mut Lattice<R>,
    temperature: f64,
    field: f64,
    count: usize,
) -> SampleStats {
    let mut stats = SampleStats::default();
    for _ in 0..count {
        metropolis::sweep(lattice, temperature, field);
        stats.energy.push(observables::energy(lattice, field));
        stats.magnetization.push(observables::magnetization(lattice));
    }
    stats
}

/// Heat capacity from energy fluctuations: σ_E² / (kB T²). Pure.
pub fn heat_capacity(stddev_energy: f64, temperature: f64) -> f64 {
    stddev_energy * stddev_energy / (KB * temperature * temperature)
}

/// Magnetic susceptibility from magnetization fluctuations: σ_M² / (kB T).
/// Pure.
pub fn susceptibility(stddev_mag: f64, temperature: f64) -> f64 {
    stddev_mag * stddev_mag / (KB * temperature)
}
