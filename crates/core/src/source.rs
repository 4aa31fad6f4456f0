use crate::{error::Result, state::CpuData};

/// A provider of CPU utilization samples.
///
/// Implemented by the real sampler in `graph-system`; tests substitute a
/// scripted source.  Every sampling call reports failure through
/// [`GraphError::Sampler`](crate::GraphError::Sampler) rather than panicking.
pub trait CpuSource {
    /// Overall utilization since the previous sample, in `[0, 100]`.
    fn sample_overall(&mut self) -> Result<f32>;

    /// Overall plus per-core utilization.
    ///
    /// `core_limit` caps the number of per-core values returned; `0` means all.
    fn sample_all(&mut self, core_limit: usize) -> Result<CpuData>;

    /// Number of logical cores, or `0` if it cannot be determined.
    fn core_count(&self) -> usize;
}

impl<S: CpuSource + ?Sized> CpuSource for Box<S> {
    fn sample_overall(&mut self) -> Result<f32> {
        (**self).sample_overall()
    }

    fn sample_all(&mut self, core_limit: usize) -> Result<CpuData> {
        (**self).sample_all(core_limit)
    }

    fn core_count(&self) -> usize {
        (**self).core_count()
    }
}
