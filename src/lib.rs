pub mod config;
pub mod constants;
pub mod driver;
pub mod lattice;
pub mod metropolis;
pub mod observables;
pub mod output;
pub mod stats;
