//! ZeroVeil Device - report local hardware so clients can decide between
//! running a model locally and going through the relay.
//!
//! Detection never fails. GPUs are enumerated through an ordered list of
//! [`GpuProbe`]s (first non-empty answer wins), system metrics through an
//! optional [`SystemMetricsProbe`], and the result is classified into a
//! [`DeviceCapability`] tier.
//!
//! # Modules
//!
//! - [`types`] - Detection result types
//! - [`classify`] - Capability tiers and thresholds
//! - [`probes`] - `nvidia-smi`, sysfs DRM and procfs probes
//! - [`detector`] - Probe orchestration
//! - [`report`] - Human-readable report
//!
//! # Example
//!
//! ```rust,no_run
//! let result = zeroveil_device::detect_device_capabilities();
//! println!("Capability: {}", result.capability);
//! if let Some(gpu) = result.best_gpu() {
//!     println!("GPU: {} ({:.1}GB)", gpu.name, gpu.memory_total_gb());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classify;
pub mod detector;
pub mod error;
pub mod probes;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use classify::classify;
pub use detector::{detect_device_capabilities, platform_name, DeviceDetector};
pub use error::{ProbeError, ProbeResult};
pub use probes::{
    DrmSysfsProbe, GpuProbe, NvidiaSmiProbe, ProcfsProbe, SystemMetrics, SystemMetricsProbe,
};
pub use report::print_device_info;
pub use types::{DeviceCapability, DeviceDetectionResult, GpuInfo, SystemInfo};
