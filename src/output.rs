// output.rs - Output sinks: tab-separated data files plus gnuplot hand-off

use anyhow::{Context, Result};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::warn;

/// One output series of (x, value) pairs, with its data file and the gnuplot
/// script that renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Series {
    Energy,
    Magnetization,
    HeatCapacity,
    Susceptibility,
    /// Magnetization against applied field (the Brillouin-style curve).
    FieldResponse,
}

impl Series {
    pub fn data_file(self) -> &'static str {
        match self {
            Series::Energy => "Energy.dat",
            Series::Magnetization => "Magnetisation.dat",
            Series::HeatCapacity => "HeatCapacity.dat",
            Series::Susceptibility => "Susceptibility.dat",
            Series::FieldResponse => "Brillouin.dat",
        }
    }

    pub fn plot_script(self) -> &'static str {
        match self {
            Series::Energy => "EPlot.script",
            Series::Magnetization => "MPlot.script",
            Series::HeatCapacity => "CPlot.script",
            Series::Susceptibility => "ChiPlot.script",
            Series::FieldResponse => "BrillPlot.script",
        }
    }
}

/// File name for lattice snapshot frames (overwritten per frame, never
/// appended) and its plot script.
pub const SNAPSHOT_FILE: &str = "Domain.dat";
pub const SNAPSHOT_SCRIPT: &str = "DomainPlot.script";

/// Capability handed to the driver: it accepts rows of computed values and
/// lattice snapshots, and owns all file and process concerns. The driver
/// never opens files or spawns plotters itself.
pub trait OutputSink {
    /// Append one `x\tvalue` row to a series.
    fn record(&mut self, series: Series, x: f64, value: f64) -> Result<()>;

    /// Emit one full lattice frame (`x\ty\tspin` per cell, row-major).
    fn snapshot(&mut self, size: usize, spins: &[i8]) -> Result<()>;

    /// Close all open series and run their plot scripts.
    fn finish(&mut self) -> Result<()>;
}

/// Sink that writes tab-separated `.dat` files and shells out to the gnuplot
/// scripts shipped alongside them. Series files are opened lazily on first
/// record, so a run that fails validation leaves nothing behind.
pub struct FileSink {
    dir: PathBuf,
    invoke_plots: bool,
    writers: BTreeMap<Series, csv::Writer<File>>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            invoke_plots: true,
            writers: BTreeMap::new(),
        }
    }

    /// Disable the external plot-script invocations (data files only).
    pub fn without_plots(mut self) -> Self {
        self.invoke_plots = false;
        self
    }

    fn tsv_writer(path: &Path) -> Result<csv::Writer<File>> {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        Ok(csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(file))
    }

    /// Run one plot script from the output directory. A missing or failing
    /// script is reported but never aborts the simulation output.
    fn run_plot_script(&self, script: &str) {
        if !self.invoke_plots {
            return;
        }
        let path = self.dir.join(script);
        match Command::new(&path).current_dir(&self.dir).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(script, %status, "plot script exited abnormally"),
            Err(err) => warn!(script, %err, "could not invoke plot script"),
        }
    }
}

impl OutputSink for FileSink {
    fn record(&mut self, series: Series, x: f64, value: f64) -> Result<()> {
        let writer = match self.writers.entry(series) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(Self::tsv_writer(&self.dir.join(series.data_file()))?)
            }
        };
        writer
            .write_record([format!("{x:.6}"), format!("{value:e}")])
            .with_context(|| format!("cannot write to {}", series.data_file()))?;
        Ok(())
    }

    fn snapshot(&mut self, size: usize, spins: &[i8]) -> Result<()> {
        let path = self.dir.join(SNAPSHOT_FILE);
        let mut writer = Self::tsv_writer(&path)?;
        for x in 0..size {
            for y in 0..size {
                writer
                    .write_record([
                        x.to_string(),
                        y.to_string(),
                        spins[x * size + y].to_string(),
                    ])
                    .with_context(|| format!("cannot write to {SNAPSHOT_FILE}"))?;
            }
        }
        writer.flush().context("cannot flush snapshot file")?;
        drop(writer);
        self.run_plot_script(SNAPSHOT_SCRIPT);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let writers = std::mem::take(&mut self.writers);
        let mut finished = Vec::with_capacity(writers.len());
        for (series, mut writer) in writers {
            writer
                .flush()
                .with_context(|| format!("cannot flush {}", series.data_file()))?;
            finished.push(series);
        }
        // Plot only after every file is closed, in series order.
        for series in finished {
            self.run_plot_script(series.plot_script());
        }
        Ok(())
    }
}

/// In-memory sink for tests and programmatic use.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<(Series, f64, f64)>,
    pub frames: Vec<Vec<i8>>,
    pub finished: bool,
}

impl OutputSink for MemorySink {
    fn record(&mut self, series: Series, x: f64, value: f64) -> Result<()> {
        self.rows.push((series, x, value));
        Ok(())
    }

    fn snapshot(&mut self, _size: usize, spins: &[i8]) -> Result<()> {
        self.frames.push(spins.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
