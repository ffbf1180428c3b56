pub mod bank;
pub mod frame;

pub use bank::ChannelBufferBank;
pub use frame::WaveformFrame;
