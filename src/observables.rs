// observables.rs - Instantaneous energy and magnetization of a lattice state

use crate::constants::{EXCHANGE_J, MU_B};
use crate::lattice::Lattice;
use rand::Rng;

/// Total energy of the configuration at applied field `field` (tesla).
///
/// Each site contributes its bond to the right and down neighbour only, so
/// every nearest-neighbour bond is counted exactly once, plus the Zeeman
/// term `-μ_B B s` per site.
pub fn energy<R: Rng>(lattice: &Lattice<R>, field: f64) -> f64 {
    let n = lattice.size() as i64;
    let mut total = 0.0;
    for x in 0..n {
        for y in 0..n {
            let s = lattice.spin_at(x, y) as f64;
            let forward = (lattice.spin_at(x + 1, y) + lattice.spin_at(x, y + 1)) as f64;
            total -= s * (EXCHANGE_J * forward + MU_B * field);
        }
    }
    total
}

/// Mean magnetization per site, always in [-1, 1].
pub fn magnetization<R: Rng>(lattice: &Lattice<R>) -> f64 {
    let sum: i64 = lattice.spins().iter().map(|&s| s as i64).sum();
    sum as f64 / lattice.n_sites() as f64
}
