use crate::core::WaveformFrame;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};

/// Bounded FIFO handoff between the receive loop and the tick loop.
///
/// Single producer, single consumer. `push` never blocks: when the
/// queue is full the oldest queued frame is discarded to make room and
/// the drop counter is incremented. `drain` removes and returns every
/// queued frame, oldest first, and returns an empty batch when nothing
/// is waiting.
pub struct CaptureQueue {
    tx: Sender<WaveformFrame>,
    rx: Receiver<WaveformFrame>,
    dropped: AtomicU64,
}

impl CaptureQueue {
    pub fn new(capacity: usize) -> Self {
        // A zero-capacity channel is a rendezvous and can hold nothing;
        // the queue needs at least one slot to decouple the two loops.
        let (tx, rx) = bounded(capacity.max(1));
        Self {
            tx,
            rx,
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueue a frame, discarding the oldest queued frame on overflow.
    /// Returns the number of frames discarded to make room.
    pub fn push(&self, frame: WaveformFrame) -> u64 {
        let mut frame = frame;
        let mut discarded = 0;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return discarded,
                Err(TrySendError::Full(rejected)) => {
                    if self.rx.try_recv().is_ok() {
                        discarded += 1;
                        self.dropped.fetch_add(1, Ordering::Relaxed);
                    }
                    frame = rejected;
                }
                // Unreachable: this struct owns both channel ends
                Err(TrySendError::Disconnected(_)) => return discarded,
            }
        }
    }

    /// Atomically take everything queued, oldest first.
    pub fn drain(&self) -> Vec<WaveformFrame> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Total frames discarded by overflow since creation.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
