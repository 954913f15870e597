//! Driver modes exercised end-to-end against the in-memory sink.

use ising2d::config::Config;
use ising2d::driver::Driver;
use ising2d::lattice::Lattice;
use ising2d::output::{MemorySink, Series};

use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Shrunk ranges so the full pipeline runs in milliseconds.
fn small_config() -> Config {
    Config {
        lattice_size: 8,
        equil_sweeps: 5,
        sample_sweeps: 10,
        temp_start: 1.0,
        temp_max: 41.0,
        temp_step: 10.0,
        field_start: 0.0,
        field_max: 300.0,
        field_step: 100.0,
        ..Config::default()
    }
}

#[test]
fn temperature_sweep_emits_four_series_in_lock_step() {
    let cfg = small_config();
    let driver = Driver::new(cfg.clone());
    let mut lat = Lattice::random(cfg.lattice_size, Pcg64::seed_from_u64(1));
    let mut sink = MemorySink::default();

    driver
        .temperature_sweep(&mut lat, 0.0, &mut sink)
        .expect("sweep should succeed");
    assert!(sink.finished);

    let temps: Vec<f64> = (0..4).map(|i| 1.0 + 10.0 * i as f64).collect();
    for series in [
        Series::Energy,
        Series::Magnetization,
        Series::HeatCapacity,
        Series::Susceptibility,
    ] {
        let xs: Vec<f64> = sink
            .rows
            .iter()
            .filter(|(s, _, _)| *s == series)
            .map(|&(_, x, _)| x)
            .collect();
        assert_eq!(xs, temps, "{series:?} must cover the same temperatures");
    }
    assert_eq!(sink.rows.len(), 4 * temps.len());

    for &(series, _, value) in &sink.rows {
        match series {
            // |M| is reported in this mode.
            Series::Magnetization => assert!((0.0..=1.0).contains(&value)),
            Series::HeatCapacity | Series::Susceptibility => assert!(value >= 0.0),
            Series::Energy => assert!(value.is_finite()),
            Series::FieldResponse => panic!("field series in a temperature sweep"),
        }
    }
}

#[test]
fn field_sweep_emits_one_magnetization_row_per_field() {
    let cfg = small_config();
    let driver = Driver::new(cfg.clone());
    let mut lat = Lattice::random(cfg.lattice_size, Pcg64::seed_from_u64(2));
    let mut sink = MemorySink::default();

    driver
        .field_sweep(&mut lat, 500.0, &mut sink)
        .expect("sweep should succeed");

    let rows: Vec<_> = sink.rows.iter().collect();
    assert_eq!(rows.len(), 3);
    for (i, &&(series, field, m)) in rows.iter().enumerate() {
        assert_eq!(series, Series::FieldResponse);
        assert_eq!(field, 100.0 * i as f64);
        assert!((-1.0..=1.0).contains(&m));
    }
}

#[test]
fn field_sweep_rejects_non_positive_temperature_before_any_work() {
    let cfg = small_config();
    let driver = Driver::new(cfg.clone());
    let mut sink = MemorySink::default();

    for bad_temp in [0.0, -5.0] {
        let mut lat = Lattice::random(cfg.lattice_size, Pcg64::seed_from_u64(3));
        let before = lat.spins().to_vec();
        let err = driver
            .field_sweep(&mut lat, bad_temp, &mut sink)
            .expect_err("T ≤ 0 must fail");
        assert!(err.to_string().contains("strictly positive"));
        assert_eq!(lat.spins(), before.as_slice(), "no sweep may run");
    }
    assert!(sink.rows.is_empty());
    assert!(!sink.finished);
}

#[test]
fn domain_evolution_emits_exactly_the_requested_frame_count() {
    // 5000 / 3 = 1666, so snapshots fall after sweeps 0, 1666 and 3332; the
    // spacing also divides 4998 but the count is capped at the request.
    let cfg = Config {
        lattice_size: 8,
        ..Config::default()
    };
    let driver = Driver::new(cfg.clone());
    let mut lat = Lattice::random(cfg.lattice_size, Pcg64::seed_from_u64(4));
    let mut sink = MemorySink::default();

    driver
        .domain_evolution(&mut lat, 5.0, 0.0, 3, &mut sink)
        .expect("evolution should succeed");

    assert_eq!(sink.frames.len(), 3);
    for frame in &sink.frames {
        assert_eq!(frame.len(), cfg.lattice_size * cfg.lattice_size);
        assert!(frame.iter().all(|&s| s == 1 || s == -1));
    }
    assert!(sink.finished);
}

#[test]
fn domain_evolution_validates_inputs_before_any_sweep() {
    let cfg = small_config();
    let driver = Driver::new(cfg.clone());
    let mut sink = MemorySink::default();

    let mut lat = Lattice::random(cfg.lattice_size, Pcg64::seed_from_u64(5));
    assert!(driver
        .domain_evolution(&mut lat, -1.0, 0.0, 3, &mut sink)
        .is_err());
    assert!(driver
        .domain_evolution(&mut lat, 5.0, 0.0, 0, &mut sink)
        .is_err());
    assert!(sink.frames.is_empty());
    assert!(!sink.finished);
}

#[test]
fn requesting_more_frames_than_sweeps_emits_one_per_sweep() {
    let cfg = Config {
        lattice_size: 4,
        snapshot_sweeps: 10,
        ..small_config()
    };
    let driver = Driver::new(cfg.clone());
    let mut lat = Lattice::random(cfg.lattice_size, Pcg64::seed_from_u64(6));
    let mut sink = MemorySink::default();

    driver
        .domain_evolution(&mut lat, 5.0, 0.0, 100, &mut sink)
        .expect("evolution should succeed");
    assert_eq!(sink.frames.len(), cfg.snapshot_sweeps);
}
