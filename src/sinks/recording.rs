use super::VisualizationSink;
use crate::core::ChannelBufferBank;
use std::sync::{Arc, Mutex};

/// Copies every bank update it receives; used by tests to observe what
/// the tick loop published.
///
/// Clones share the same recording, so a test can keep one handle while
/// the pipeline owns the other.
#[derive(Clone, Default)]
pub struct RecordingSink {
    // Each update: samples indexed [unit][channel][sample]
    updates: Arc<Mutex<Vec<Vec<Vec<Vec<i16>>>>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().map(|u| u.len()).unwrap_or(0)
    }

    /// The most recent bank snapshot, if any update happened.
    pub fn last_update(&self) -> Option<Vec<Vec<Vec<i16>>>> {
        self.updates
            .lock()
            .ok()
            .and_then(|u| u.last().cloned())
    }
}

impl VisualizationSink for RecordingSink {
    fn update(&mut self, bank: &ChannelBufferBank) {
        let snapshot: Vec<Vec<Vec<i16>>> = (0..bank.units())
            .map(|unit| {
                (0..bank.channels())
                    .map(|channel| bank.channel(unit, channel).to_vec())
                    .collect()
            })
            .collect();

        if let Ok(mut updates) = self.updates.lock() {
            updates.push(snapshot);
        }
    }
}
