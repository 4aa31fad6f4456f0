//! Linux `/proc/stat` fallback sampler.
//!
//! see `proc_stat(5)`: the first line is the aggregate `cpu` entry followed by
//! one `cpuN` line per online logical core, each a list of cumulative time
//! counters in USER_HZ.

use graph_core::{CpuData, CpuSource, GraphError, Result};
use std::{fs, io, num::ParseIntError};
use thiserror::Error;
use tracing::debug;

/// Minimum counter fields on a cpu line (user, nice, system, idle).
pub const MIN_CPU_FIELDS: usize = 4;

/// Failures reading or parsing the kernel statistics table.
#[derive(Debug, Error)]
pub enum StatError {
    #[error("failed to read {path}: {source}", path = ProcStatFile::PATH)]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("{path} is empty", path = ProcStatFile::PATH)]
    Empty,

    #[error("unexpected {path} format: {0}...", path = ProcStatFile::PATH)]
    UnexpectedFormat(String),

    #[error(
        "insufficient CPU fields in {path}: found {found}, need at least {min}",
        path = ProcStatFile::PATH,
        min = MIN_CPU_FIELDS
    )]
    TooFewFields { found: usize },

    #[error("CPU time counters overflow in {path}", path = ProcStatFile::PATH)]
    CounterOverflow,

    #[error("invalid CPU time value '{value}': {source}")]
    InvalidValue {
        value: String,
        source: ParseIntError,
    },
}

impl From<StatError> for GraphError {
    fn from(e: StatError) -> Self {
        GraphError::Sampler(e.to_string())
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// A source of kernel statistics text.
pub trait StatSource {
    /// Read the whole table.
    fn read(&self) -> io::Result<String>;
}

/// Stats backed by `/proc/stat`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcStatFile;

impl ProcStatFile {
    pub const PATH: &'static str = "/proc/stat";
}

impl StatSource for ProcStatFile {
    fn read(&self) -> io::Result<String> {
        fs::read_to_string(Self::PATH)
    }
}

// ── Counters ──────────────────────────────────────────────────────────────────

/// Cumulative idle and total time for one cpu line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuCounters {
    /// idle + iowait.
    pub idle: u64,
    /// Sum of every field.
    pub total: u64,
}

impl CpuCounters {
    pub fn new(idle: u64, total: u64) -> Self {
        Self { idle, total }
    }

    /// Fold parsed fields: idle is field 3 plus field 4 (iowait) when present.
    ///
    /// Callers guarantee at least [`MIN_CPU_FIELDS`] fields.
    fn from_fields(fields: &[u64]) -> Result<Self, StatError> {
        let idle = fields[3]
            .checked_add(fields.get(4).copied().unwrap_or(0))
            .ok_or(StatError::CounterOverflow)?;
        let total = fields
            .iter()
            .try_fold(0u64, |acc, &v| acc.checked_add(v))
            .ok_or(StatError::CounterOverflow)?;
        Ok(Self { idle, total })
    }
}

/// The cpu lines of one read of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTable {
    pub overall: CpuCounters,
    /// One entry per `cpuN` line, in file order.
    pub cores: Vec<CpuCounters>,
}

/// Parse the aggregate and per-core cpu lines.
///
/// The first line must be the aggregate `cpu ` entry.
pub fn parse(text: &str) -> Result<StatTable, StatError> {
    let mut lines = text.lines();
    let first = lines.next().ok_or(StatError::Empty)?;

    if !first.starts_with("cpu ") {
        let head: String = first.chars().take(20).collect();
        return Err(StatError::UnexpectedFormat(head));
    }
    let overall = parse_cpu_line(first)?;

    let cores = lines
        .filter(|line| is_core_line(line))
        .map(parse_cpu_line)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StatTable { overall, cores })
}

/// Parse the counters of a single `cpu`/`cpuN` line.
pub fn parse_cpu_line(line: &str) -> Result<CpuCounters, StatError> {
    let fields = line
        .split_whitespace()
        .skip(1) // label
        .map(|token| {
            token.parse::<u64>().map_err(|source| StatError::InvalidValue {
                value: token.to_owned(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if fields.len() < MIN_CPU_FIELDS {
        return Err(StatError::TooFewFields { found: fields.len() });
    }

    CpuCounters::from_fields(&fields)
}

/// Number of `cpuN` lines in the table.
pub fn count_cores(text: &str) -> usize {
    text.lines().filter(|line| is_core_line(line)).count()
}

fn is_core_line(line: &str) -> bool {
    line.strip_prefix("cpu")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

// ── Delta computation ─────────────────────────────────────────────────────────

/// Usage between two readings: `100 * (1 - Δidle / Δtotal)`, clamped to
/// `[0, 100]`.  A non-positive `Δtotal` yields `0.0`.
pub fn usage_percent(prev: CpuCounters, now: CpuCounters) -> f32 {
    let d_total = now.total as f64 - prev.total as f64;
    if d_total <= 0.0 {
        return 0.0;
    }
    let d_idle = now.idle as f64 - prev.idle as f64;
    let usage = (1.0 - d_idle / d_total) * 100.0;
    usage.clamp(0.0, 100.0) as f32
}

/// Tracks the previous reading of one cpu line.
#[derive(Debug, Clone, Default)]
pub struct DeltaTracker {
    baseline: Option<CpuCounters>,
}

impl DeltaTracker {
    /// Record `now` as the new baseline and return usage since the old one.
    ///
    /// The first observation has nothing to compare against and returns `0.0`.
    pub fn observe(&mut self, now: CpuCounters) -> f32 {
        match self.baseline.replace(now) {
            Some(prev) => usage_percent(prev, now),
            None => 0.0,
        }
    }

    pub fn baseline(&self) -> Option<CpuCounters> {
        self.baseline
    }
}

// ── Reader ────────────────────────────────────────────────────────────────────

/// Delta-based sampler over a [`StatSource`].
pub struct ProcStatReader<S = ProcStatFile> {
    source:  S,
    overall: DeltaTracker,
    cores:   Vec<DeltaTracker>,
}

impl ProcStatReader<ProcStatFile> {
    /// Open `/proc/stat` and prime the baseline.
    pub fn open() -> Result<Self, StatError> {
        Self::new(ProcStatFile)
    }
}

impl<S: StatSource> ProcStatReader<S> {
    /// Prime the baseline from `source`; fails if it cannot be read or parsed.
    pub fn new(source: S) -> Result<Self, StatError> {
        let mut reader = Self {
            source,
            overall: DeltaTracker::default(),
            cores:   Vec::new(),
        };
        reader.observe()?;
        Ok(reader)
    }

    /// Read the table once and advance every tracker.
    fn observe(&mut self) -> Result<(f32, Vec<f32>), StatError> {
        let table = parse(&self.source.read()?)?;

        // Core hotplug: restart per-core baselines together.
        if self.cores.len() != table.cores.len() {
            debug!(
                "core count changed {} -> {}; resetting per-core baselines",
                self.cores.len(),
                table.cores.len()
            );
            self.cores = vec![DeltaTracker::default(); table.cores.len()];
        }

        let overall = self.overall.observe(table.overall);
        let per_core = self
            .cores
            .iter_mut()
            .zip(table.cores)
            .map(|(tracker, counters)| tracker.observe(counters))
            .collect();

        Ok((overall, per_core))
    }
}

impl<S: StatSource> CpuSource for ProcStatReader<S> {
    fn sample_overall(&mut self) -> Result<f32> {
        Ok(self.observe()?.0)
    }

    fn sample_all(&mut self, core_limit: usize) -> Result<CpuData> {
        let (overall, per_core) = self.observe()?;
        Ok(crate::limit_cores(overall, per_core, core_limit))
    }

    fn core_count(&self) -> usize {
        match self.source.read() {
            Ok(text) => count_cores(&text),
            Err(e) => {
                debug!("cannot count cores: {e}");
                0
            }
        }
    }
}
