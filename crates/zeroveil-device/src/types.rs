//! Detection result types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Device capability tier, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceCapability {
    /// GPU with 8 GB+ VRAM
    HighPowerGpu,
    /// GPU with 4-8 GB VRAM
    MediumPowerGpu,
    /// GPU with less than 4 GB VRAM
    LowPowerGpu,
    /// No GPU; 8+ physical cores and 16 GB+ RAM
    CpuCapable,
    /// No GPU; 4+ physical cores and 8 GB+ RAM
    CpuLimited,
    /// Anything weaker
    Minimal,
}

impl DeviceCapability {
    /// All tiers, strongest first.
    pub const ALL: [Self; 6] = [
        Self::HighPowerGpu,
        Self::MediumPowerGpu,
        Self::LowPowerGpu,
        Self::CpuCapable,
        Self::CpuLimited,
        Self::Minimal,
    ];

    /// Strength rank; higher is stronger.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::HighPowerGpu => 5,
            Self::MediumPowerGpu => 4,
            Self::LowPowerGpu => 3,
            Self::CpuCapable => 2,
            Self::CpuLimited => 1,
            Self::Minimal => 0,
        }
    }

    /// Upper-case name, e.g. `HIGH_POWER_GPU`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighPowerGpu => "HIGH_POWER_GPU",
            Self::MediumPowerGpu => "MEDIUM_POWER_GPU",
            Self::LowPowerGpu => "LOW_POWER_GPU",
            Self::CpuCapable => "CPU_CAPABLE",
            Self::CpuLimited => "CPU_LIMITED",
            Self::Minimal => "MINIMAL",
        }
    }

    /// Whether this tier implies a usable GPU.
    #[must_use]
    pub fn is_gpu(self) -> bool {
        matches!(
            self,
            Self::HighPowerGpu | Self::MediumPowerGpu | Self::LowPowerGpu
        )
    }
}

impl PartialOrd for DeviceCapability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeviceCapability {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for DeviceCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected GPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    /// Device index as reported by the probe
    pub id: u32,
    /// Marketing name
    pub name: String,
    /// Total VRAM in MB
    pub memory_total_mb: f64,
    /// Free VRAM in MB
    pub memory_free_mb: f64,
    /// Utilization, 0-100
    pub load_percent: f64,
}

impl GpuInfo {
    /// Total VRAM in GB.
    #[must_use]
    pub fn memory_total_gb(&self) -> f64 {
        self.memory_total_mb / 1024.0
    }

    /// Free VRAM in GB.
    #[must_use]
    pub fn memory_free_gb(&self) -> f64 {
        self.memory_free_mb / 1024.0
    }
}

/// Host CPU and memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Logical CPUs, at least 1
    pub cpu_count: usize,
    /// Physical cores, at least 1
    pub cpu_physical_cores: usize,
    /// Total RAM in GB
    pub ram_total_gb: f64,
    /// Available RAM in GB
    pub ram_available_gb: f64,
    /// OS name: `Linux`, `Darwin`, `Windows`, or the raw target OS
    pub platform: String,
    /// False when the RAM figures are placeholders
    pub ram_is_measured: bool,
}

/// Outcome of a detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetectionResult {
    /// Classified tier
    pub capability: DeviceCapability,
    /// GPUs found, in probe order
    #[serde(default)]
    pub gpus: Vec<GpuInfo>,
    /// Host information
    pub system: Option<SystemInfo>,
}

impl DeviceDetectionResult {
    /// Whether any GPU was found.
    #[must_use]
    pub fn has_gpu(&self) -> bool {
        !self.gpus.is_empty()
    }

    /// Sum of VRAM over all GPUs, in GB.
    #[must_use]
    pub fn total_vram_gb(&self) -> f64 {
        self.gpus.iter().map(GpuInfo::memory_total_gb).sum()
    }

    /// GPU with the most VRAM; the first one wins ties.
    #[must_use]
    pub fn best_gpu(&self) -> Option<&GpuInfo> {
        best_gpu(&self.gpus)
    }
}

pub(crate) fn best_gpu(gpus: &[GpuInfo]) -> Option<&GpuInfo> {
    gpus.iter().fold(None, |best: Option<&GpuInfo>, gpu| match best {
        Some(current) if current.memory_total_mb >= gpu.memory_total_mb => Some(current),
        _ => Some(gpu),
    })
}
