use chrono::NaiveTime;

/// One reading of CPU utilization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuData {
    /// Aggregate usage across all logical cores (0.0 – 100.0).
    pub overall: f32,
    /// Per-core usage (0.0 – 100.0), in core order.  May be empty.
    pub per_core: Vec<f32>,
    /// Number of per-core values carried in `per_core`.
    pub core_count: usize,
}

impl CpuData {
    /// Overall-only reading with no per-core breakdown.
    pub fn overall_only(overall: f32) -> Self {
        Self {
            overall,
            per_core: Vec::new(),
            core_count: 0,
        }
    }

    /// `true` when the reading carries usable per-core values.
    #[must_use]
    pub fn has_per_core(&self) -> bool {
        !self.per_core.is_empty() && self.core_count > 0
    }
}

/// Current / average / maximum usage over the overall history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub current: f32,
    pub average: f32,
    pub maximum: f32,
}

impl Statistics {
    /// Compute statistics from samples ordered oldest → newest.
    ///
    /// An empty slice yields all zeros.
    pub fn from_samples(samples: &[f32]) -> Self {
        let Some(&current) = samples.last() else {
            return Self::default();
        };
        let average = samples.iter().sum::<f32>() / samples.len() as f32;
        let maximum = samples.iter().copied().fold(f32::MIN, f32::max);

        Self {
            current,
            average,
            maximum,
        }
    }

    /// Render the status-line text, e.g.
    /// `12:00:00  |  Current:  45.0%   Avg:  35.0%   Max:  45.0% | Cores: 8`.
    ///
    /// The core suffix is omitted when `cores` is zero.
    pub fn status_line(&self, at: NaiveTime, cores: usize) -> String {
        let mut line = format!(
            "{}  |  Current: {:5.1}%   Avg: {:5.1}%   Max: {:5.1}%",
            at.format("%H:%M:%S"),
            self.current,
            self.average,
            self.maximum,
        );
        if cores > 0 {
            line.push_str(&format!(" | Cores: {cores}"));
        }
        line
    }
}

/// Whether the update loop samples on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused  => RunState::Running,
        }
    }
}

/// Which series the chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Overall,
    PerCore,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Overall => ViewMode::PerCore,
            ViewMode::PerCore => ViewMode::Overall,
        }
    }
}
