use crate::capture::queue::CaptureQueue;
use crate::codec::FrameDecoder;
use crate::observability::CaptureMetrics;
use crate::transport::Subscription;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Background receive loop.
///
/// Polls the subscription without blocking and pushes every decodable
/// frame onto the capture queue. Runs independently of the tick loop
/// and never waits for the consumer.
///
/// Failure handling follows three tiers:
/// - no data buffered: benign, back off briefly and poll again
/// - undecodable message: drop it, warn, keep capturing
/// - any other transport error: fatal, the loop ends and the error is
///   returned to the owning pipeline
pub struct Receiver {
    subscription: Box<dyn Subscription>,
    decoder: FrameDecoder,
    queue: Arc<CaptureQueue>,
    metrics: Arc<CaptureMetrics>,
    poll_backoff: Duration,
}

impl Receiver {
    pub fn new(
        subscription: Box<dyn Subscription>,
        decoder: FrameDecoder,
        queue: Arc<CaptureQueue>,
        metrics: Arc<CaptureMetrics>,
        poll_backoff: Duration,
    ) -> Self {
        Self {
            subscription,
            decoder,
            queue,
            metrics,
            poll_backoff,
        }
    }

    /// Run until `running` is cleared or a fatal transport error hits.
    /// The subscription endpoint is released when this returns.
    pub fn run(&mut self, running: &AtomicBool) -> Result<()> {
        while running.load(Ordering::Relaxed) {
            match self.subscription.try_receive() {
                Ok(Some(raw)) => match self.decoder.decode(&raw) {
                    Ok(frame) => {
                        self.metrics.record_frame_received();
                        let discarded = self.queue.push(frame);
                        if discarded > 0 {
                            self.metrics.record_frames_dropped(discarded);
                        }
                    }
                    Err(e) => {
                        // One malformed message must never halt capture
                        self.metrics.record_decode_failure();
                        eprintln!("wavescope: dropping undecodable frame: {}", e);
                    }
                },
                Ok(None) => thread::sleep(self.poll_backoff),
                Err(e) => {
                    eprintln!("wavescope: subscription failed, receiver stopping: {}", e);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }
}
