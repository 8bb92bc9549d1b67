//! Probe orchestration.

use crate::classify::classify;
use crate::probes::{DrmSysfsProbe, GpuProbe, NvidiaSmiProbe, SystemMetricsProbe};
use crate::types::{DeviceDetectionResult, GpuInfo, SystemInfo};
use std::fmt;
use std::num::NonZeroUsize;
use std::thread;

/// Total RAM assumed when no metrics backend is available.
pub const PLACEHOLDER_RAM_TOTAL_GB: f64 = 8.0;

/// Available RAM assumed when no metrics backend is available.
pub const PLACEHOLDER_RAM_AVAILABLE_GB: f64 = 4.0;

/// Runs GPU and system probes and classifies the result.
pub struct DeviceDetector {
    gpu_probes: Vec<Box<dyn GpuProbe>>,
    system_probe: Option<Box<dyn SystemMetricsProbe>>,
    logical_cpus: Option<usize>,
}

impl fmt::Debug for DeviceDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDetector")
            .field(
                "gpu_probes",
                &self.gpu_probes.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("system_probe", &self.system_probe.as_ref().map(|p| p.name()))
            .field("logical_cpus", &self.logical_cpus)
            .finish()
    }
}

impl Default for DeviceDetector {
    /// `nvidia-smi`, then sysfs DRM; procfs metrics on Linux.
    fn default() -> Self {
        let nvidia: Box<dyn GpuProbe> = Box::new(NvidiaSmiProbe::new());
        let drm: Box<dyn GpuProbe> = Box::new(DrmSysfsProbe::new());
        Self::new(vec![nvidia, drm], default_system_probe())
    }
}

impl DeviceDetector {
    /// Build a detector from explicit probes. GPU probes are tried in order.
    #[must_use]
    pub fn new(
        gpu_probes: Vec<Box<dyn GpuProbe>>,
        system_probe: Option<Box<dyn SystemMetricsProbe>>,
    ) -> Self {
        Self {
            gpu_probes,
            system_probe,
            logical_cpus: None,
        }
    }

    /// Use a fixed logical CPU count instead of asking the OS.
    #[must_use]
    pub fn with_logical_cpus(mut self, logical_cpus: usize) -> Self {
        self.logical_cpus = Some(logical_cpus.max(1));
        self
    }

    /// Detect hardware and classify it. Never fails.
    #[must_use]
    pub fn detect(&self) -> DeviceDetectionResult {
        let gpus = self.detect_gpus();
        let system = self.detect_system();
        let capability = classify(&gpus, &system);

        tracing::debug!(
            "Device capability {} ({} GPUs, {} physical cores, {:.1}GB RAM)",
            capability,
            gpus.len(),
            system.cpu_physical_cores,
            system.ram_total_gb
        );

        DeviceDetectionResult {
            capability,
            gpus,
            system: Some(system),
        }
    }

    fn detect_gpus(&self) -> Vec<GpuInfo> {
        for probe in &self.gpu_probes {
            match probe.detect() {
                Ok(gpus) if !gpus.is_empty() => {
                    tracing::debug!("GPU probe {} found {} GPUs", probe.name(), gpus.len());
                    return gpus;
                }
                Ok(_) => tracing::debug!("GPU probe {} found no GPUs", probe.name()),
                Err(e) => tracing::debug!("GPU probe {} unavailable: {}", probe.name(), e),
            }
        }

        Vec::new()
    }

    fn detect_system(&self) -> SystemInfo {
        let cpu_count = self
            .logical_cpus
            .unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get));

        let mut system = SystemInfo {
            cpu_count,
            cpu_physical_cores: cpu_count,
            ram_total_gb: PLACEHOLDER_RAM_TOTAL_GB,
            ram_available_gb: PLACEHOLDER_RAM_AVAILABLE_GB,
            platform: platform_name().to_string(),
            ram_is_measured: false,
        };

        let Some(probe) = &self.system_probe else {
            tracing::debug!("No system metrics probe; using placeholder RAM figures");
            return system;
        };

        match probe.collect() {
            Ok(metrics) => {
                // Host-wide topology can exceed the CPUs this process may use
                if let Some(cores) = metrics.physical_cores.filter(|&c| c > 0) {
                    system.cpu_physical_cores = cores.min(cpu_count);
                }
                system.ram_total_gb = metrics.ram_total_gb;
                system.ram_available_gb = metrics.ram_available_gb;
                system.ram_is_measured = true;
            }
            Err(e) => {
                tracing::debug!(
                    "System metrics probe {} unavailable: {}; using placeholder RAM figures",
                    probe.name(),
                    e
                );
            }
        }

        system
    }
}

/// Detect capabilities with the default probes.
#[must_use]
pub fn detect_device_capabilities() -> DeviceDetectionResult {
    DeviceDetector::default().detect()
}

/// Host OS as `Linux`, `Darwin`, `Windows`, or the raw target OS name.
#[must_use]
pub fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        other => other,
    }
}

#[cfg(target_os = "linux")]
fn default_system_probe() -> Option<Box<dyn SystemMetricsProbe>> {
    Some(Box::new(crate::probes::ProcfsProbe::new()))
}

#[cfg(not(target_os = "linux"))]
fn default_system_probe() -> Option<Box<dyn SystemMetricsProbe>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_name() {
        let name = platform_name();
        assert!(!name.is_empty());
        #[cfg(target_os = "linux")]
        assert_eq!(name, "Linux");
    }

    #[test]
    fn test_no_probes_uses_placeholders() {
        let result = DeviceDetector::new(Vec::new(), None).detect();
        let system = result.system.as_ref().expect("system info always present");

        assert!(!result.has_gpu());
        assert!(system.cpu_count >= 1);
        assert_eq!(system.cpu_physical_cores, system.cpu_count);
        assert!((system.ram_total_gb - PLACEHOLDER_RAM_TOTAL_GB).abs() < f64::EPSILON);
        assert!((system.ram_available_gb - PLACEHOLDER_RAM_AVAILABLE_GB).abs() < f64::EPSILON);
        assert!(!system.ram_is_measured);
    }

    #[test]
    fn test_debug_lists_probe_names() {
        let detector = DeviceDetector::default();
        let debug = format!("{detector:?}");
        assert!(debug.contains("nvidia-smi"));
        assert!(debug.contains("drm-sysfs"));
    }
}
