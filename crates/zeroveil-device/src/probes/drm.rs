//! GPUs exposing VRAM counters through sysfs DRM (amdgpu and friends).

use super::GpuProbe;
use crate::error::{ProbeError, ProbeResult};
use crate::types::GpuInfo;
use std::fs;
use std::path::{Path, PathBuf};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reads `card*/device/mem_info_vram_*` under a DRM class directory.
#[derive(Debug, Clone)]
pub struct DrmSysfsProbe {
    root: PathBuf,
}

impl Default for DrmSysfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DrmSysfsProbe {
    /// Probe `/sys/class/drm`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("/sys/class/drm")
    }

    /// Probe a different DRM class directory.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[allow(clippy::cast_precision_loss)]
    fn read_card(index: u32, device: &Path) -> Option<GpuInfo> {
        let total = read_u64(&device.join("mem_info_vram_total"))?;
        let used = read_u64(&device.join("mem_info_vram_used")).unwrap_or(0);
        let load_percent = read_u64(&device.join("gpu_busy_percent"))
            .map_or(0.0, |busy| (busy as f64).min(100.0));

        let name = fs::read_to_string(device.join("product_name"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{} GPU (card{index})", vendor_label(device)));

        Some(GpuInfo {
            id: index,
            name,
            memory_total_mb: total as f64 / BYTES_PER_MB,
            memory_free_mb: total.saturating_sub(used) as f64 / BYTES_PER_MB,
            load_percent,
        })
    }
}

impl GpuProbe for DrmSysfsProbe {
    fn name(&self) -> &'static str {
        "drm-sysfs"
    }

    fn detect(&self) -> ProbeResult<Vec<GpuInfo>> {
        let entries = fs::read_dir(&self.root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ProbeError::NotInstalled(self.root.display().to_string())
            }
            _ => ProbeError::Io(e),
        })?;

        let mut cards: Vec<(u32, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let index = card_index(name.to_str()?)?;
                Some((index, entry.path().join("device")))
            })
            .collect();
        cards.sort_by_key(|(index, _)| *index);

        Ok(cards
            .iter()
            .filter_map(|(index, device)| Self::read_card(*index, device))
            .collect())
    }
}

/// `card0` -> 0; connector entries such as `card0-HDMI-A-1` are skipped.
fn card_index(name: &str) -> Option<u32> {
    name.strip_prefix("card")?.parse().ok()
}

fn read_u64(path: &Path) -> Option<u64> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

fn vendor_label(device: &Path) -> &'static str {
    match fs::read_to_string(device.join("vendor"))
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        Ok("0x1002") => "AMD",
        Ok("0x8086") => "Intel",
        Ok("0x10de") => "NVIDIA",
        _ => "DRM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_card(root: &Path, card: &str, files: &[(&str, &str)]) {
        let device = root.join(card).join("device");
        fs::create_dir_all(&device).expect("create card dir");
        for (name, content) in files {
            fs::write(device.join(name), content).expect("write sysfs file");
        }
    }

    #[test]
    fn test_reads_vram_counters() {
        let dir = TempDir::new().expect("create temp dir");
        add_card(
            dir.path(),
            "card0",
            &[
                ("mem_info_vram_total", "8589934592\n"),
                ("mem_info_vram_used", "1073741824\n"),
                ("gpu_busy_percent", "12\n"),
                ("product_name", "Radeon RX 6600\n"),
            ],
        );

        let gpus = DrmSysfsProbe::with_root(dir.path()).detect().expect("detect");

        assert_eq!(gpus.len(), 1);
        assert_eq!(gpus[0].name, "Radeon RX 6600");
        assert!((gpus[0].memory_total_mb - 8192.0).abs() < f64::EPSILON);
        assert!((gpus[0].memory_free_mb - 7168.0).abs() < f64::EPSILON);
        assert!((gpus[0].load_percent - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skips_cards_without_vram_and_connectors() {
        let dir = TempDir::new().expect("create temp dir");
        // Integrated GPU without VRAM counters
        add_card(dir.path(), "card0", &[("vendor", "0x8086\n")]);
        add_card(
            dir.path(),
            "card1",
            &[("mem_info_vram_total", "4294967296"), ("vendor", "0x1002")],
        );
        add_card(
            dir.path(),
            "card1-DP-1",
            &[("mem_info_vram_total", "4294967296")],
        );

        let gpus = DrmSysfsProbe::with_root(dir.path()).detect().expect("detect");

        assert_eq!(gpus.len(), 1);
        assert_eq!(gpus[0].id, 1);
        assert_eq!(gpus[0].name, "AMD GPU (card1)");
        assert!((gpus[0].memory_free_gb() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_root() {
        let probe = DrmSysfsProbe::with_root("/nonexistent/drm");
        assert!(matches!(probe.detect(), Err(ProbeError::NotInstalled(_))));
    }

    #[test]
    fn test_card_index() {
        assert_eq!(card_index("card0"), Some(0));
        assert_eq!(card_index("card12"), Some(12));
        assert_eq!(card_index("card0-HDMI-A-1"), None);
        assert_eq!(card_index("renderD128"), None);
    }
}
