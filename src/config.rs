// config.rs - Run parameters, defaulting to the values used for the report runs

/// Run-time configuration (single source of truth).
///
/// Temperatures are in kelvin, fields in tesla. Sweep counts are fixed
/// policies, not adaptive.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lattice side length N (the system is N x N).
    pub lattice_size: usize,
    /// Unmeasured sweeps per (T, B) condition before sampling starts.
    pub equil_sweeps: usize,
    /// Measured sweeps per (T, B) condition.
    pub sample_sweeps: usize,
    /// Total sweeps for the domain-evolution mode.
    pub snapshot_sweeps: usize,
    /// Temperature sweep: start, exclusive maximum, step.
    pub temp_start: f64,
    pub temp_max: f64,
    pub temp_step: f64,
    /// Field sweep: start, exclusive maximum, step.
    pub field_start: f64,
    pub field_max: f64,
    pub field_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lattice_size: 30,
            equil_sweeps: 1_000,
            sample_sweeps: 4_000,
            snapshot_sweeps: 5_000,
            temp_start: 1.0,
            temp_max: 2_500.0,
            temp_step: 10.0,
            field_start: 0.0,
            field_max: 20_000.0,
            field_step: 100.0,
        }
    }
}

impl Config {
    /// Number of conditions a temperature sweep will visit.
    pub fn n_temp_steps(&self) -> usize {
        let mut n = 0;
        let mut t = self.temp_start;
        while t < self.temp_max {
            n += 1;
            t += self.temp_step;
        }
        n
    }

    /// Number of conditions a field sweep will visit.
    pub fn n_field_steps(&self) -> usize {
        let mut n = 0;
        let mut b = self.field_start;
        while b < self.field_max {
            n += 1;
            b += self.field_step;
        }
        n
    }
}
