//! Capability classification.

use crate::types::{best_gpu, DeviceCapability, GpuInfo, SystemInfo};

/// VRAM (GB) needed for [`DeviceCapability::HighPowerGpu`].
pub const HIGH_POWER_VRAM_GB: f64 = 8.0;

/// VRAM (GB) needed for [`DeviceCapability::MediumPowerGpu`].
pub const MEDIUM_POWER_VRAM_GB: f64 = 4.0;

/// Physical cores needed for [`DeviceCapability::CpuCapable`].
pub const CPU_CAPABLE_CORES: usize = 8;

/// RAM (GB) needed for [`DeviceCapability::CpuCapable`].
pub const CPU_CAPABLE_RAM_GB: f64 = 16.0;

/// Physical cores needed for [`DeviceCapability::CpuLimited`].
pub const CPU_LIMITED_CORES: usize = 4;

/// RAM (GB) needed for [`DeviceCapability::CpuLimited`].
pub const CPU_LIMITED_RAM_GB: f64 = 8.0;

/// Classify hardware into a capability tier.
///
/// Any GPU puts the device in a GPU tier chosen by the best GPU's VRAM.
/// Otherwise physical cores and total RAM decide.
#[must_use]
pub fn classify(gpus: &[GpuInfo], system: &SystemInfo) -> DeviceCapability {
    if let Some(best) = best_gpu(gpus) {
        let vram = best.memory_total_gb();
        return if vram >= HIGH_POWER_VRAM_GB {
            DeviceCapability::HighPowerGpu
        } else if vram >= MEDIUM_POWER_VRAM_GB {
            DeviceCapability::MediumPowerGpu
        } else {
            DeviceCapability::LowPowerGpu
        };
    }

    if system.cpu_physical_cores >= CPU_CAPABLE_CORES && system.ram_total_gb >= CPU_CAPABLE_RAM_GB
    {
        DeviceCapability::CpuCapable
    } else if system.cpu_physical_cores >= CPU_LIMITED_CORES
        && system.ram_total_gb >= CPU_LIMITED_RAM_GB
    {
        DeviceCapability::CpuLimited
    } else {
        DeviceCapability::Minimal
    }
}
