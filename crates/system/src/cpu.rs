use graph_core::{CpuData, CpuSource, Result};
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// CPU usage through `sysinfo`.
///
/// `sysinfo` computes usage from the difference between consecutive
/// refreshes, so the sampler is primed once at construction and every call
/// afterwards reports usage since the previous call.
pub struct SysinfoCpu {
    sys: System,
}

impl SysinfoCpu {
    pub fn new() -> Self {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        // Prime the non-blocking sampler.
        sys.refresh_cpu_usage();
        Self { sys }
    }

    fn refresh(&mut self) -> (f32, Vec<f32>) {
        self.sys.refresh_cpu_usage();
        let overall = sanitize(self.sys.global_cpu_usage());
        let per_core = self.sys.cpus().iter().map(|c| sanitize(c.cpu_usage())).collect();
        (overall, per_core)
    }
}

impl Default for SysinfoCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSource for SysinfoCpu {
    fn sample_overall(&mut self) -> Result<f32> {
        Ok(self.refresh().0)
    }

    fn sample_all(&mut self, core_limit: usize) -> Result<CpuData> {
        let (overall, per_core) = self.refresh();
        Ok(crate::limit_cores(overall, per_core, core_limit))
    }

    fn core_count(&self) -> usize {
        self.sys.cpus().len()
    }
}

/// Clamp into `[0, 100]`; non-finite readings become `0.0`.
fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_bounds_readings() {
        assert_eq!(sanitize(42.5), 42.5);
        assert_eq!(sanitize(-3.0), 0.0);
        assert_eq!(sanitize(130.0), 100.0);
        assert_eq!(sanitize(f32::NAN), 0.0);
    }

    #[test]
    fn live_sample_is_in_range() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let mut cpu = SysinfoCpu::new();
        let data = cpu.sample_all(0).unwrap();
        assert!((0.0..=100.0).contains(&data.overall));
        assert_eq!(data.core_count, data.per_core.len());
        assert!(data.per_core.iter().all(|v| (0.0..=100.0).contains(v)));
    }
}
