// metropolis.rs - Random-site single-spin-flip Metropolis dynamics

use crate::constants::{EXCHANGE_J, KB, MU_B};
use crate::lattice::Lattice;
use rand::Rng;

/// Energy change from flipping the spin at (x, y), from the local field of
/// its four periodic neighbours plus the Zeeman term.
#[inline]
fn flip_energy<R: Rng>(lattice: &Lattice<R>, x: i64, y: i64, field: f64) -> f64 {
    let neighbours = (lattice.spin_at(x - 1, y)
        + lattice.spin_at(x, y - 1)
        + lattice.spin_at(x + 1, y)
        + lattice.spin_at(x, y + 1)) as f64;
    lattice.spin_at(x, y) as f64 * (2.0 * EXCHANGE_J * neighbours + MU_B * field)
}

/// One Monte Carlo sweep: exactly N² proposed flips at uniformly random
/// sites. Sites may repeat or be skipped within a sweep; this is random-site
/// Metropolis, not a systematic scan.
///
/// A proposal with ΔE ≤ 0 is always taken. Otherwise it is taken with
/// probability exp(-ΔE / kB T), decided by one fresh uniform draw.
/// `temperature` must be strictly positive; the driver validates it.
pub fn sweep<R: Rng>(lattice: &mut Lattice<R>, temperature: f64, field: f64) {
    for _ in 0..lattice.n_sites() {
        let (x, y) = lattice.random_site();
        let delta_e = flip_energy(lattice, x, y, field);

        if delta_e <= 0.0 {
            lattice.flip(x, y);
        } else if lattice.random_unit() < (-delta_e / (KB * temperature)).exp() {
            lattice.flip(x, y);
        }
    }
}

/// Run `sweeps` unmeasured sweeps so the chain can approach its stationary
/// distribution before sampling starts. The count is a fixed policy, not a
/// convergence test.
pub fn equilibrate<R: Rng>(lattice: &mut Lattice<R>, temperature: f64, field: f64, sweeps: usize) {
    for _ in 0..sweeps {
        sweep(lattice, temperature, field);
    }
}
