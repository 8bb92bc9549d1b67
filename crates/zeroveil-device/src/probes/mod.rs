//! Hardware probes.
//!
//! Each probe answers one question about the machine and may fail; the
//! detector treats a failure the same as "nothing found".

pub mod drm;
pub mod nvidia_smi;
pub mod procfs;

pub use drm::DrmSysfsProbe;
pub use nvidia_smi::NvidiaSmiProbe;
pub use procfs::ProcfsProbe;

use crate::error::ProbeResult;
use crate::types::GpuInfo;

/// Enumerates GPUs.
pub trait GpuProbe: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// List the GPUs this probe can see. An empty list means "none found".
    fn detect(&self) -> ProbeResult<Vec<GpuInfo>>;
}

/// Measured host metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemMetrics {
    /// Physical core count, when the backend knows it
    pub physical_cores: Option<usize>,
    /// Total RAM in GB
    pub ram_total_gb: f64,
    /// Available RAM in GB
    pub ram_available_gb: f64,
}

/// Reads CPU and memory metrics from the host.
pub trait SystemMetricsProbe: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Collect current metrics.
    fn collect(&self) -> ProbeResult<SystemMetrics>;
}
