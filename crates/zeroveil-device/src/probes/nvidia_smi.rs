//! NVIDIA GPUs via `nvidia-smi`.

use super::GpuProbe;
use crate::error::{ProbeError, ProbeResult};
use crate::types::GpuInfo;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const QUERY_ARG: &str = "--query-gpu=index,name,memory.total,memory.free,utilization.gpu";
const FORMAT_ARG: &str = "--format=csv,noheader,nounits";

/// How long `nvidia-smi` may run before the probe gives up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Queries `nvidia-smi` for every visible NVIDIA GPU.
#[derive(Debug, Clone)]
pub struct NvidiaSmiProbe {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for NvidiaSmiProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl NvidiaSmiProbe {
    /// Probe using `nvidia-smi` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("nvidia-smi")
    }

    /// Probe using a specific `nvidia-smi` binary.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![QUERY_ARG.to_string(), FORMAT_ARG.to_string()],
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the arguments passed to the program.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Bound how long the program may run.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Run the program, killing it once the timeout passes.
    fn run(&self) -> ProbeResult<Output> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ProbeError::NotInstalled(self.command_name()),
                _ => ProbeError::Io(e),
            })?;

        // Drain stdout while polling; a full pipe would stall the child
        let reader = child.stdout.take().map(|mut stdout| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                stdout.read_to_end(&mut buf).map(|_| buf)
            })
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProbeError::TimedOut {
                    command: self.command_name(),
                    after: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stdout = match reader {
            Some(handle) => handle
                .join()
                .map_err(|_| std::io::Error::other("stdout reader panicked"))??,
            None => Vec::new(),
        };

        Ok(Output {
            status,
            stdout,
            stderr: Vec::new(),
        })
    }
}

impl GpuProbe for NvidiaSmiProbe {
    fn name(&self) -> &'static str {
        "nvidia-smi"
    }

    fn detect(&self) -> ProbeResult<Vec<GpuInfo>> {
        let output = self.run()?;

        if !output.status.success() {
            return Err(ProbeError::CommandFailed {
                command: self.command_name(),
                status: output.status.to_string(),
            });
        }

        parse_gpu_csv(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `nvidia-smi` CSV output (no header, no units).
///
/// Each line is `index, name, memory.total, memory.free, utilization.gpu`.
/// Utilization reported as `[N/A]` or similar is treated as 0.
pub fn parse_gpu_csv(output: &str) -> ProbeResult<Vec<GpuInfo>> {
    let mut gpus = Vec::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [index, name, total, free, utilization] = fields.as_slice() else {
            return Err(ProbeError::parse(
                "nvidia-smi output",
                format!("expected 5 fields, got {}: {line:?}", fields.len()),
            ));
        };

        let id = index
            .parse::<u32>()
            .map_err(|e| ProbeError::parse("nvidia-smi index", format!("{index:?}: {e}")))?;
        let memory_total_mb = parse_mb(total)?;
        let memory_free_mb = parse_mb(free)?;
        let load_percent = utilization
            .parse::<f64>()
            .map_or(0.0, |load| load.clamp(0.0, 100.0));

        gpus.push(GpuInfo {
            id,
            name: (*name).to_string(),
            memory_total_mb,
            memory_free_mb,
            load_percent,
        });
    }

    Ok(gpus)
}

fn parse_mb(value: &str) -> ProbeResult<f64> {
    value
        .parse::<f64>()
        .map_err(|e| ProbeError::parse("nvidia-smi memory", format!("{value:?}: {e}")))
}
