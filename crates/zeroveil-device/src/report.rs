//! Human-readable device report.

use crate::detector::detect_device_capabilities;
use crate::types::DeviceDetectionResult;
use std::fmt;

impl fmt::Display for DeviceDetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Device Detection ===")?;
        writeln!(f, "Capability: {}", self.capability)?;

        if !self.gpus.is_empty() {
            writeln!(f)?;
            writeln!(f, "GPUs ({}):", self.gpus.len())?;
            for gpu in &self.gpus {
                writeln!(f, "  [{}] {}", gpu.id, gpu.name)?;
                writeln!(
                    f,
                    "      VRAM: {:.1}GB ({:.1}GB free)",
                    gpu.memory_total_gb(),
                    gpu.memory_free_gb()
                )?;
            }
        }

        if let Some(system) = &self.system {
            writeln!(f)?;
            writeln!(f, "System:")?;
            writeln!(f, "  Platform: {}", system.platform)?;
            writeln!(f, "  CPU: {} cores", system.cpu_physical_cores)?;
            writeln!(
                f,
                "  RAM: {:.1}GB ({:.1}GB free)",
                system.ram_total_gb, system.ram_available_gb
            )?;
        }

        Ok(())
    }
}

/// Detect capabilities and print the report to stdout.
pub fn print_device_info() {
    let result = detect_device_capabilities();
    println!("\n{result}");
}
