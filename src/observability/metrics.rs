use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared across the receiver thread and the tick task.
pub struct CaptureMetrics {
    frames_received: AtomicU64,
    decode_failures: AtomicU64,
    frames_dropped: AtomicU64,
    frames_reconstructed: AtomicU64,
    length_violations: AtomicU64,
    ticks: AtomicU64,
    sink_updates: AtomicU64,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub frames_received: u64,
    pub decode_failures: u64,
    pub frames_dropped: u64,
    pub frames_reconstructed: u64,
    pub length_violations: u64,
    pub ticks: u64,
    pub sink_updates: u64,
}

impl CaptureMetrics {
    pub fn new() -> Self {
        Self {
            frames_received: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            frames_reconstructed: AtomicU64::new(0),
            length_violations: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
            sink_updates: AtomicU64::new(0),
        }
    }

    pub fn record_frame_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_frames_dropped(&self, count: u64) {
        self.frames_dropped.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_frame_reconstructed(&self) {
        self.frames_reconstructed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_length_violation(&self) {
        self.length_violations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sink_update(&self) {
        self.sink_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received.load(Ordering::Relaxed)
    }

    pub fn decode_failures(&self) -> u64 {
        self.decode_failures.load(Ordering::Relaxed)
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    pub fn frames_reconstructed(&self) -> u64 {
        self.frames_reconstructed.load(Ordering::Relaxed)
    }

    pub fn length_violations(&self) -> u64 {
        self.length_violations.load(Ordering::Relaxed)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn sink_updates(&self) -> u64 {
        self.sink_updates.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_received: self.frames_received(),
            decode_failures: self.decode_failures(),
            frames_dropped: self.frames_dropped(),
            frames_reconstructed: self.frames_reconstructed(),
            length_violations: self.length_violations(),
            ticks: self.ticks(),
            sink_updates: self.sink_updates(),
        }
    }
}

impl Default for CaptureMetrics {
    fn default() -> Self {
        Self::new()
    }
}
