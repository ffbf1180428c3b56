pub mod console;
pub mod recording;

pub use console::ConsoleSink;
pub use recording::RecordingSink;

use crate::core::ChannelBufferBank;

/// Consumer of reconstructed waveform banks.
///
/// Called from the tick task at most once per tick, so `update` must
/// not block significantly. The borrow is only valid for the duration
/// of the call: the bank is overwritten in place on the next processed
/// frame, so implementations copy out anything they keep.
pub trait VisualizationSink: Send {
    fn update(&mut self, bank: &ChannelBufferBank);
}
