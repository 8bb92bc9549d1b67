//! Linux memory and core counts from procfs.

use super::{SystemMetrics, SystemMetricsProbe};
use crate::error::{ProbeError, ProbeResult};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Reads `meminfo` and `cpuinfo` under a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcfsProbe {
    root: PathBuf,
}

impl Default for ProcfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcfsProbe {
    /// Probe `/proc`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Probe a different procfs root.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SystemMetricsProbe for ProcfsProbe {
    fn name(&self) -> &'static str {
        "procfs"
    }

    #[allow(clippy::cast_precision_loss)]
    fn collect(&self) -> ProbeResult<SystemMetrics> {
        let meminfo = fs::read_to_string(self.root.join("meminfo"))?;
        let (total_kb, available_kb) = parse_meminfo(&meminfo)?;

        // cpuinfo is best effort; ARM kernels often omit topology fields
        let physical_cores = fs::read_to_string(self.root.join("cpuinfo"))
            .ok()
            .and_then(|cpuinfo| count_physical_cores(&cpuinfo));

        Ok(SystemMetrics {
            physical_cores,
            ram_total_gb: total_kb as f64 / KB_PER_GB,
            ram_available_gb: available_kb as f64 / KB_PER_GB,
        })
    }
}

/// Extract `(MemTotal, MemAvailable)` in kB from `/proc/meminfo`.
///
/// Kernels older than 3.14 lack `MemAvailable`; `MemFree + Buffers + Cached`
/// stands in for it there.
pub fn parse_meminfo(meminfo: &str) -> ProbeResult<(u64, u64)> {
    let field = |key: &str| -> Option<u64> {
        meminfo.lines().find_map(|line| {
            let (name, rest) = line.split_once(':')?;
            if name.trim() != key {
                return None;
            }
            rest.split_whitespace().next()?.parse().ok()
        })
    };

    let total = field("MemTotal").ok_or_else(|| ProbeError::parse("meminfo", "missing MemTotal"))?;

    let available = field("MemAvailable")
        .or_else(|| {
            let free = field("MemFree")?;
            Some(free + field("Buffers").unwrap_or(0) + field("Cached").unwrap_or(0))
        })
        .ok_or_else(|| ProbeError::parse("meminfo", "missing MemAvailable and MemFree"))?;

    Ok((total, available.min(total)))
}

/// Count distinct `(physical id, core id)` pairs in `/proc/cpuinfo`.
///
/// Returns `None` when the topology fields are absent.
#[must_use]
pub fn count_physical_cores(cpuinfo: &str) -> Option<usize> {
    let mut cores: HashSet<(String, String)> = HashSet::new();

    for block in cpuinfo.split("\n\n") {
        let mut physical_id = None;
        let mut core_id = None;

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim() {
                "physical id" => physical_id = Some(value.trim().to_string()),
                "core id" => core_id = Some(value.trim().to_string()),
                _ => {}
            }
        }

        if let Some(core) = core_id {
            cores.insert((physical_id.unwrap_or_default(), core));
        }
    }

    if cores.is_empty() {
        None
    } else {
        Some(cores.len())
    }
}
