//! Sampling controller: owns the histories and the Running/Paused state machine.
//!
//! Everything here is synchronous and UI-agnostic; the Iced application calls
//! into it from `update()`, one message at a time.

use chrono::NaiveTime;
use graph_config::MonitorConfig;
use graph_core::{
    CpuSource, GraphError, Result, RollingHistory, RunState, Statistics, ViewMode,
};
use graph_renderer::ChartInput;
use tracing::{debug, info, warn};

/// Status text shown before the first sample arrives.
pub const INITIAL_STATUS: &str = "Initializing CPU monitor...";

/// Owned copy of everything the chart needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub overall:     Vec<f32>,
    pub per_core:    Vec<Vec<f32>>,
    pub view:        ViewMode,
    pub interval_ms: u64,
    pub max_cores:   usize,
}

impl ChartData {
    pub fn as_input(&self) -> ChartInput<'_> {
        ChartInput {
            overall:     &self.overall,
            per_core:    &self.per_core,
            view:        self.view,
            interval_ms: self.interval_ms,
            max_cores:   self.max_cores,
        }
    }
}

pub struct Monitor<S> {
    source:      S,
    interval_ms: u64,
    overall:     RollingHistory,
    /// Per-core histories; empty until per-core view is first requested.
    cores:       Vec<RollingHistory>,
    /// Configured display limit (`0` = every detected core).
    max_cores:   usize,
    run_state:   RunState,
    view:        ViewMode,
    status:      String,
}

impl<S: CpuSource> Monitor<S> {
    pub fn new(source: S, settings: &MonitorConfig) -> Self {
        let mut monitor = Self {
            source,
            interval_ms: settings.interval_ms,
            overall:     RollingHistory::with_window(settings.interval_ms, settings.history_secs),
            cores:       Vec::new(),
            max_cores:   settings.max_cores,
            run_state:   RunState::Running,
            view:        ViewMode::Overall,
            status:      INITIAL_STATUS.to_string(),
        };
        if settings.per_core {
            monitor.toggle_view();
        }
        monitor
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Sample once and fold the reading into every history.
    ///
    /// Returns `Ok(None)` without sampling while paused.
    pub fn tick(&mut self, now: NaiveTime) -> Result<Option<Statistics>> {
        if self.run_state == RunState::Paused {
            return Ok(None);
        }

        let data = self.source.sample_all(self.max_cores)?;
        self.overall.append(data.overall);

        if data.has_per_core() {
            let wants_cores = !self.cores.is_empty() || self.view == ViewMode::PerCore;
            if wants_cores && self.cores.len() != data.core_count {
                debug!(
                    "per-core histories resized {} -> {}",
                    self.cores.len(),
                    data.core_count
                );
                self.reset_core_histories(data.core_count);
            }
            for (history, &value) in self.cores.iter_mut().zip(&data.per_core) {
                history.append(value);
            }
        }

        let stats = self.statistics();
        self.status = stats.status_line(now, self.source.core_count());
        Ok(Some(stats))
    }

    /// Run a tick, turning any failure into the status line.
    ///
    /// A failed tick never stops monitoring; the next one is attempted as usual.
    pub fn on_tick(&mut self, now: NaiveTime) {
        if let Err(e) = self.tick(now) {
            self.record_error(&e);
        }
    }

    pub fn record_error(&mut self, err: &GraphError) {
        warn!("CPU sample failed: {err}");
        self.status = format!("Error: {err}");
    }

    // ── User actions ──────────────────────────────────────────────────────────

    pub fn toggle_pause(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        info!("monitoring {:?}", self.run_state);
        self.run_state
    }

    /// Zero every history, overall and per-core.
    pub fn clear(&mut self) {
        self.overall.clear();
        for history in &mut self.cores {
            history.clear();
        }
        info!("history cleared");
    }

    /// Switch between overall and per-core view, allocating per-core
    /// histories the first time per-core view is shown.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        if self.view == ViewMode::PerCore && self.cores.is_empty() {
            let detected = self.source.core_count();
            let count = if self.max_cores == 0 {
                detected
            } else {
                detected.min(self.max_cores)
            };
            self.reset_core_histories(count);
            info!("tracking {count} of {detected} cores");
        }
        self.view
    }

    fn reset_core_histories(&mut self, count: usize) {
        let capacity = self.overall.capacity();
        self.cores = vec![RollingHistory::new(capacity); count];
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Current / average / maximum over the recorded overall samples.
    pub fn statistics(&self) -> Statistics {
        Statistics::from_samples(&self.overall.recorded())
    }

    pub fn chart_data(&self) -> ChartData {
        let per_core = if self.view == ViewMode::PerCore {
            self.cores.iter().map(RollingHistory::snapshot).collect()
        } else {
            Vec::new()
        };
        ChartData {
            overall: self.overall.snapshot(),
            per_core,
            view: self.view,
            interval_ms: self.interval_ms,
            max_cores: self.max_cores,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn overall(&self) -> &RollingHistory {
        &self.overall
    }

    pub fn core_histories(&self) -> &[RollingHistory] {
        &self.cores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::CpuData;
    use std::collections::VecDeque;

    /// Replays scripted readings; `None` entries fail the tick.
    struct Scripted {
        readings: VecDeque<Option<CpuData>>,
        cores: usize,
        calls: usize,
    }

    impl Scripted {
        fn new(cores: usize, readings: impl IntoIterator<Item = Option<CpuData>>) -> Self {
            Self {
                readings: readings.into_iter().collect(),
                cores,
                calls: 0,
            }
        }

        fn overall(values: &[f32]) -> Self {
            Self::new(0, values.iter().map(|&v| Some(CpuData::overall_only(v))))
        }
    }

    impl CpuSource for Scripted {
        fn sample_overall(&mut self) -> Result<f32> {
            self.sample_all(0).map(|d| d.overall)
        }

        fn sample_all(&mut self, core_limit: usize) -> Result<CpuData> {
            self.calls += 1;
            let mut data = self
                .readings
                .pop_front()
                .flatten()
                .ok_or_else(|| GraphError::Sampler("scripted failure".into()))?;
            if core_limit > 0 {
                data.per_core.truncate(core_limit);
                data.core_count = data.per_core.len();
            }
            Ok(data)
        }

        fn core_count(&self) -> usize {
            self.cores
        }
    }

    fn settings(interval_ms: u64, history_secs: u64, max_cores: usize) -> MonitorConfig {
        MonitorConfig {
            interval_ms,
            history_secs,
            max_cores,
            ..MonitorConfig::default()
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn cores(overall: f32, per_core: &[f32]) -> Option<CpuData> {
        Some(CpuData {
            overall,
            per_core: per_core.to_vec(),
            core_count: per_core.len(),
        })
    }

    #[test]
    fn end_to_end_statistics() {
        let source = Scripted::overall(&[25.0, 30.0, 35.0, 40.0, 45.0]);
        let mut monitor = Monitor::new(source, &settings(500, 60, 0));
        assert_eq!(monitor.overall().capacity(), 120);

        for _ in 0..5 {
            monitor.tick(noon()).unwrap();
        }

        let stats = monitor.statistics();
        assert_eq!(stats.current, 45.0);
        assert_eq!(stats.average, 35.0);
        assert_eq!(stats.maximum, 45.0);
        assert!(monitor.status().starts_with("12:00:00  |  Current:  45.0%"));
        assert_eq!(monitor.chart_data().overall.len(), 120);
    }

    #[test]
    fn paused_ticks_do_not_sample() {
        let mut monitor = Monitor::new(Scripted::overall(&[10.0, 20.0]), &settings(500, 60, 0));
        assert_eq!(monitor.toggle_pause(), RunState::Paused);

        assert_eq!(monitor.tick(noon()).unwrap(), None);
        assert_eq!(monitor.source.calls, 0);
        assert!(monitor.overall().is_empty());
        assert_eq!(monitor.status(), INITIAL_STATUS);

        monitor.toggle_pause();
        monitor.tick(noon()).unwrap();
        assert_eq!(monitor.overall().latest(), Some(10.0));
    }

    #[test]
    fn failed_tick_reports_and_next_tick_recovers() {
        let source = Scripted::new(0, [None, Some(CpuData::overall_only(42.0))]);
        let mut monitor = Monitor::new(source, &settings(500, 60, 0));

        monitor.on_tick(noon());
        assert_eq!(monitor.status(), "Error: sampler error: scripted failure");
        assert_eq!(monitor.run_state(), RunState::Running);

        monitor.on_tick(noon());
        assert_eq!(monitor.overall().latest(), Some(42.0));
        assert!(monitor.status().contains("Current:  42.0%"));
    }

    #[test]
    fn toggle_view_allocates_capped_core_histories() {
        let mut monitor = Monitor::new(Scripted::new(8, []), &settings(500, 60, 4));
        assert!(monitor.core_histories().is_empty());

        assert_eq!(monitor.toggle_view(), ViewMode::PerCore);
        assert_eq!(monitor.core_histories().len(), 4);
        for history in monitor.core_histories() {
            assert_eq!(history.capacity(), 120);
            assert_eq!(history.snapshot(), vec![0.0; 120]);
        }

        // Switching back and forth does not reallocate.
        monitor.toggle_view();
        monitor.toggle_view();
        assert_eq!(monitor.core_histories().len(), 4);
    }

    #[test]
    fn unlimited_max_cores_tracks_every_core() {
        let mut monitor = Monitor::new(Scripted::new(6, []), &settings(1000, 30, 0));
        monitor.toggle_view();
        assert_eq!(monitor.core_histories().len(), 6);
        assert_eq!(monitor.core_histories()[0].capacity(), 30);
    }

    #[test]
    fn per_core_start_flag_allocates_up_front() {
        let cfg = MonitorConfig { per_core: true, ..settings(500, 60, 0) };
        let monitor = Monitor::new(Scripted::new(2, []), &cfg);
        assert_eq!(monitor.view(), ViewMode::PerCore);
        assert_eq!(monitor.core_histories().len(), 2);
    }

    #[test]
    fn per_core_samples_fill_core_histories() {
        let source = Scripted::new(
            2,
            [cores(30.0, &[20.0, 40.0]), cores(50.0, &[60.0, 40.0])],
        );
        let mut monitor = Monitor::new(source, &settings(500, 10, 0));
        monitor.toggle_view();
        monitor.tick(noon()).unwrap();
        monitor.tick(noon()).unwrap();

        let h = monitor.core_histories();
        assert_eq!(h[0].recorded(), vec![20.0, 60.0]);
        assert_eq!(h[1].recorded(), vec![40.0, 40.0]);
        assert!(monitor.status().ends_with("| Cores: 2"));

        let chart = monitor.chart_data();
        assert_eq!(chart.per_core.len(), 2);
        assert_eq!(chart.per_core[0].len(), 20);
    }

    #[test]
    fn changed_core_count_reinitializes_all_histories_together() {
        let source = Scripted::new(
            2,
            [cores(10.0, &[10.0, 10.0]), cores(10.0, &[1.0, 2.0, 3.0])],
        );
        let mut monitor = Monitor::new(source, &settings(500, 10, 0));
        monitor.toggle_view();
        monitor.tick(noon()).unwrap();
        monitor.tick(noon()).unwrap();

        let h = monitor.core_histories();
        assert_eq!(h.len(), 3);
        assert!(h.iter().all(|c| c.capacity() == 20 && c.len() == 1));
        assert_eq!(h[2].latest(), Some(3.0));
    }

    #[test]
    fn clear_zeroes_every_history() {
        let source = Scripted::new(1, [cores(70.0, &[80.0])]);
        let mut monitor = Monitor::new(source, &settings(500, 10, 0));
        monitor.toggle_view();
        monitor.tick(noon()).unwrap();

        monitor.clear();
        assert_eq!(monitor.overall().snapshot(), vec![0.0; 20]);
        assert_eq!(monitor.core_histories()[0].snapshot(), vec![0.0; 20]);
        assert_eq!(monitor.statistics(), Statistics::default());
    }

    #[test]
    fn overall_view_hides_core_series() {
        let mut monitor = Monitor::new(Scripted::new(4, []), &settings(500, 10, 0));
        monitor.toggle_view();
        monitor.toggle_view();
        let chart = monitor.chart_data();
        assert_eq!(chart.view, ViewMode::Overall);
        assert!(chart.per_core.is_empty());
    }
}
