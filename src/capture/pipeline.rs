use crate::capture::deinterleaver::deinterleave;
use crate::capture::queue::CaptureQueue;
use crate::capture::receiver::Receiver;
use crate::capture::state::PipelineState;
use crate::codec::FrameDecoder;
use crate::config::CaptureConfig;
use crate::core::ChannelBufferBank;
use crate::observability::CaptureMetrics;
use crate::sinks::VisualizationSink;
use crate::transport::Subscription;
use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns the whole capture path: receiver thread, capture queue, tick
/// task, buffer bank, and the visualization sink.
///
/// The receiver runs on its own OS thread (the subscription socket is
/// blocking-style and must not touch the async runtime). The tick task
/// runs on the Tokio runtime at a fixed period: each tick drains the
/// queue, deinterleaves every drained frame in arrival order into the
/// bank (so the newest frame wins), and notifies the sink once. Empty
/// ticks notify nothing.
pub struct CapturePipeline {
    config: CaptureConfig,
    queue: Arc<CaptureQueue>,
    metrics: Arc<CaptureMetrics>,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    state: Arc<Mutex<PipelineState>>,
    subscription: Option<Box<dyn Subscription>>,
    sink: Option<Box<dyn VisualizationSink>>,
    receiver_handle: Option<thread::JoinHandle<Result<()>>>,
    tick_handle: Option<JoinHandle<()>>,
}

impl CapturePipeline {
    pub fn new(
        config: CaptureConfig,
        subscription: Box<dyn Subscription>,
        sink: Box<dyn VisualizationSink>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            queue: Arc::new(CaptureQueue::new(config.queue_capacity)),
            metrics: Arc::new(CaptureMetrics::new()),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
            state: Arc::new(Mutex::new(PipelineState::Idle)),
            subscription: Some(subscription),
            sink: Some(sink),
            receiver_handle: None,
            tick_handle: None,
            config,
        })
    }

    pub fn state(&self) -> PipelineState {
        self.state
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn metrics(&self) -> Arc<CaptureMetrics> {
        self.metrics.clone()
    }

    /// Total frames discarded by queue overflow since start.
    pub fn dropped_frames(&self) -> u64 {
        self.queue.dropped_frames()
    }

    /// Spawn the receiver thread and the tick task. Must be called from
    /// within a Tokio runtime.
    pub async fn start(&mut self) -> Result<()> {
        self.transition_to(PipelineState::Running)?;

        let subscription = self
            .subscription
            .take()
            .ok_or_else(|| anyhow!("pipeline cannot be restarted"))?;
        let sink = self
            .sink
            .take()
            .ok_or_else(|| anyhow!("pipeline cannot be restarted"))?;

        self.running.store(true, Ordering::Relaxed);

        let decoder = FrameDecoder::new(self.config.expected_waveform_len());
        let mut receiver = Receiver::new(
            subscription,
            decoder,
            self.queue.clone(),
            self.metrics.clone(),
            Duration::from_micros(self.config.poll_backoff_us),
        );

        // Receiver thread: a fatal transport error flips the shared
        // state so callers see the stall instead of a silent freeze.
        let running = self.running.clone();
        let state = self.state.clone();
        self.receiver_handle = Some(thread::spawn(move || {
            let result = receiver.run(&running);
            if let Err(e) = &result {
                if let Ok(mut guard) = state.lock() {
                    *guard = PipelineState::Failed {
                        message: e.to_string(),
                    };
                }
            }
            result
        }));

        self.tick_handle = Some(self.spawn_tick_loop(sink));
        Ok(())
    }

    fn spawn_tick_loop(&self, mut sink: Box<dyn VisualizationSink>) -> JoinHandle<()> {
        let mut bank = ChannelBufferBank::new(
            self.config.units,
            self.config.channels,
            self.config.samples_per_channel,
        );
        let queue = self.queue.clone();
        let metrics = self.metrics.clone();
        let shutdown = self.shutdown.clone();
        let period = self.config.tick_period();

        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            // A stalled consumer must not be followed by a tick burst
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.notified() => break,
                    _ = interval.tick() => {}
                }
                metrics.record_tick();

                let frames = queue.drain();
                if frames.is_empty() {
                    // Nothing new arrived; skip the redraw
                    continue;
                }

                for frame in &frames {
                    match deinterleave(frame, &mut bank) {
                        Ok(()) => metrics.record_frame_reconstructed(),
                        Err(e) => {
                            metrics.record_length_violation();
                            eprintln!("wavescope: skipping mismatched frame: {}", e);
                        }
                    }
                }

                sink.update(&bank);
                metrics.record_sink_update();
            }
        })
    }

    /// Stop both loops and release the subscription endpoint. The queue
    /// need not be empty; leftover frames are discarded with it.
    ///
    /// Returns the receiver's fatal transport error if it died before
    /// the stop was requested.
    pub async fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::Relaxed);
        // notify_one leaves a permit behind, so the tick task wakes
        // even if it was not parked in select yet
        self.shutdown.notify_one();

        if let Some(handle) = self.tick_handle.take() {
            handle.await?;
        }

        let mut receiver_result = Ok(());
        if let Some(handle) = self.receiver_handle.take() {
            // The receiver polls its cancellation flag at least once per
            // backoff interval, so this join is prompt.
            receiver_result = match handle.join() {
                Ok(result) => result,
                Err(_) => Err(anyhow!("receiver thread panicked")),
            };
        }

        // A Failed state set by the receiver thread is preserved here;
        // only a healthy Running pipeline becomes Stopped.
        let _ = self.transition_to(PipelineState::Stopped);

        receiver_result
    }

    fn transition_to(&self, next: PipelineState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| anyhow!("pipeline state lock poisoned"))?;
        if !guard.can_transition_to(&next) {
            return Err(anyhow!(
                "invalid state transition: {} -> {}",
                guard.name(),
                next.name()
            ));
        }
        *guard = next;
        Ok(())
    }
}
