// constants.rs - Physical constants for the ferromagnet Hamiltonian

/// Boltzmann constant, J/K.
pub const KB: f64 = 1.38064852e-23;

/// Bohr magneton, J/T.
pub const MU_B: f64 = 9.27400999e-24;

/// Nearest-neighbour exchange constant, J. Value for iron;
/// cobalt = 8.24e-21, nickel = 3.24e-21.
pub const EXCHANGE_J: f64 = 6.44e-21;
