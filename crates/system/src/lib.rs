pub mod cpu;
pub mod stat;

pub use cpu::SysinfoCpu;
pub use stat::{CpuCounters, DeltaTracker, ProcStatFile, ProcStatReader, StatError, StatSource};

use graph_config::SamplerPreference;
use graph_core::{CpuData, CpuSource, GraphError, Result};
use std::fmt;
use tracing::info;

/// The sampling backend chosen at construction.  Never re-checked per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerMode {
    /// Cross-platform `sysinfo` backend.
    Sysinfo,
    /// Linux `/proc/stat` delta reader.
    ProcStat,
}

impl fmt::Display for SamplerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SamplerMode::Sysinfo  => "sysinfo",
            SamplerMode::ProcStat => "/proc/stat",
        })
    }
}

/// Resolve the backend from the user's preference and platform capabilities.
pub fn select_mode(
    preference: SamplerPreference,
    sysinfo_supported: bool,
    is_linux: bool,
) -> Result<SamplerMode> {
    match preference {
        SamplerPreference::Auto if sysinfo_supported => Ok(SamplerMode::Sysinfo),
        SamplerPreference::Auto if is_linux => Ok(SamplerMode::ProcStat),
        SamplerPreference::Auto => Err(GraphError::Sampler(
            "sysinfo does not support this platform and the /proc/stat fallback only \
             works on Linux; no CPU sampling method is available"
                .into(),
        )),
        SamplerPreference::Sysinfo if sysinfo_supported => Ok(SamplerMode::Sysinfo),
        SamplerPreference::Sysinfo => Err(GraphError::Sampler(
            "sysinfo does not support this platform; try --sampler auto".into(),
        )),
        SamplerPreference::ProcStat if is_linux => Ok(SamplerMode::ProcStat),
        SamplerPreference::ProcStat => Err(GraphError::Sampler(
            "the /proc/stat sampler only works on Linux; try --sampler auto".into(),
        )),
    }
}

enum Backend {
    Sysinfo(SysinfoCpu),
    ProcStat(ProcStatReader),
}

/// Cross-platform CPU utilization sampler.
pub struct CpuSampler {
    backend: Backend,
}

impl CpuSampler {
    /// Pick and prime a backend.  Fails if no sampling method is available.
    pub fn new(preference: SamplerPreference) -> Result<Self> {
        let mode = select_mode(
            preference,
            sysinfo::IS_SUPPORTED_SYSTEM,
            cfg!(target_os = "linux"),
        )?;

        let backend = match mode {
            SamplerMode::Sysinfo => Backend::Sysinfo(SysinfoCpu::new()),
            SamplerMode::ProcStat => Backend::ProcStat(ProcStatReader::open().map_err(|e| {
                GraphError::Sampler(format!("failed to initialize /proc/stat reader: {e}"))
            })?),
        };

        info!("CPU sampler using {mode}");
        Ok(Self { backend })
    }

    pub fn mode(&self) -> SamplerMode {
        match self.backend {
            Backend::Sysinfo(_)  => SamplerMode::Sysinfo,
            Backend::ProcStat(_) => SamplerMode::ProcStat,
        }
    }

    fn source(&mut self) -> &mut dyn CpuSource {
        match &mut self.backend {
            Backend::Sysinfo(s)  => s,
            Backend::ProcStat(p) => p,
        }
    }
}

impl CpuSource for CpuSampler {
    fn sample_overall(&mut self) -> Result<f32> {
        self.source().sample_overall()
    }

    fn sample_all(&mut self, core_limit: usize) -> Result<CpuData> {
        self.source().sample_all(core_limit)
    }

    fn core_count(&self) -> usize {
        match &self.backend {
            Backend::Sysinfo(s)  => s.core_count(),
            Backend::ProcStat(p) => p.core_count(),
        }
    }
}

/// Build a [`CpuData`], keeping at most `core_limit` per-core values (`0` = all).
pub(crate) fn limit_cores(overall: f32, mut per_core: Vec<f32>, core_limit: usize) -> CpuData {
    if core_limit > 0 {
        per_core.truncate(core_limit);
    }
    CpuData {
        overall,
        core_count: per_core.len(),
        per_core,
    }
}
