use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default subscription port when the node address does not carry one.
pub const DEFAULT_PORT: u16 = 50006;

/// Capture geometry and pipeline tuning.
///
/// The geometry fields describe the acquisition hardware and must match
/// what the node publishes; they are configurable rather than baked in
/// so the same pipeline works against different front-end builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Parallel sample-storage units multiplexed into the wire payload
    pub units: usize,

    /// Physical measurement channels, each sampled by every unit
    pub channels: usize,

    /// Samples per channel in one sweep
    pub samples_per_channel: usize,

    /// Reconstruction cadence in milliseconds
    pub tick_period_ms: u64,

    /// Capture queue capacity; the oldest queued frame is dropped when
    /// a push finds the queue full
    pub queue_capacity: usize,

    /// Receiver backoff when no message is available, in microseconds
    pub poll_backoff_us: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            units: 4,
            channels: 76,
            samples_per_channel: 511,
            tick_period_ms: 100,
            queue_capacity: 64,
            poll_backoff_us: 500,
        }
    }
}

impl CaptureConfig {
    /// Required length of every frame's flat waveform payload.
    pub fn expected_waveform_len(&self) -> usize {
        self.units * self.channels * self.samples_per_channel
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.units == 0 || self.channels == 0 || self.samples_per_channel == 0 {
            bail!(
                "capture geometry must be non-zero (units={}, channels={}, samples_per_channel={})",
                self.units,
                self.channels,
                self.samples_per_channel
            );
        }
        if self.tick_period_ms == 0 {
            bail!("tick_period_ms must be non-zero");
        }
        if self.queue_capacity == 0 {
            bail!("queue_capacity must be non-zero");
        }
        Ok(())
    }
}

/// Turn a `host[:port]` node address into a ZeroMQ TCP endpoint,
/// filling in the default data port when none is given.
pub fn parse_endpoint(address: &str) -> String {
    match address.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            format!("tcp://{}:{}", host, port)
        }
        _ => format!("tcp://{}:{}", address, DEFAULT_PORT),
    }
}
