use super::VisualizationSink;
use crate::core::ChannelBufferBank;

/// Prints a one-line summary per refresh. Stands in for a plot widget
/// when running headless.
pub struct ConsoleSink {
    refreshes: u64,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { refreshes: 0 }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualizationSink for ConsoleSink {
    fn update(&mut self, bank: &ChannelBufferBank) {
        self.refreshes += 1;

        let first = bank.channel(0, 0);
        let min = first.iter().copied().min().unwrap_or(0);
        let max = first.iter().copied().max().unwrap_or(0);

        println!(
            "refresh {}: {} units x {} channels x {} samples, unit 0 channel 0 range [{}, {}]",
            self.refreshes,
            bank.units(),
            bank.channels(),
            bank.samples_per_channel(),
            min,
            max
        );
    }
}
