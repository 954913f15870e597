// lattice.rs - Periodic square spin lattice with an owned RNG stream

use rand::Rng;

/// A square grid of ±1 spins with toroidal topology.
///
/// The lattice owns its random generator: one sequential stream drives the
/// initial fill and every stochastic decision afterwards, so a run is
/// reproducible bit-for-bit from the seed as long as the draw order
/// (site-x, site-y, then the acceptance draw) is preserved.
#[derive(Debug, Clone)]
pub struct Lattice<R: Rng> {
    size: usize,
    spins: Vec<i8>,
    rng: R,
}

impl<R: Rng> Lattice<R> {
    /// Build a `size` x `size` lattice with every cell set to +1 or -1
    /// independently, using the parity of a raw generator draw as the coin.
    pub fn random(size: usize, mut rng: R) -> Self {
        let spins = (0..size * size)
            .map(|_| if rng.next_u32() % 2 == 0 { 1 } else { -1 })
            .collect();
        Self { size, spins, rng }
    }

    /// Side length N.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites N².
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    /// Raw row-major spin slice, for snapshot emission.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    /// Wrap an arbitrary integer coordinate onto [0, N).
    /// `%` truncates toward zero, so negative inputs need the extra `+ n`.
    #[inline(always)]
    fn wrap(&self, coord: i64) -> usize {
        let n = self.size as i64;
        ((coord % n + n) % n) as usize
    }

    /// Spin at periodic coordinates (x, y); any integers are valid.
    #[inline(always)]
    pub fn spin_at(&self, x: i64, y: i64) -> i8 {
        self.spins[self.wrap(x) * self.size + self.wrap(y)]
    }

    /// Negate the spin at periodic coordinates (x, y) in place.
    #[inline(always)]
    pub fn flip(&mut self, x: i64, y: i64) {
        let idx = self.wrap(x) * self.size + self.wrap(y);
        self.spins[idx] = -self.spins[idx];
    }

    /// Draw a uniform random site, x coordinate first, then y.
    #[inline]
    pub fn random_site(&mut self) -> (i64, i64) {
        let x = self.rng.gen_range(0..self.size) as i64;
        let y = self.rng.gen_range(0..self.size) as i64;
        (x, y)
    }

    /// One uniform draw in [0, 1), used for the acceptance test.
    #[inline]
    pub fn random_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
