use serde::Deserialize;

/// One decoded capture message: a full waveform sweep across every
/// storage unit and channel.
///
/// The wire encoding is a MessagePack map. `waveform` holds the flat
/// multiplexed samples; its length must equal
/// `units * channels * samples_per_channel` for the active geometry.
/// The remaining fields are trigger bookkeeping from the acquisition
/// hardware, carried through without interpretation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaveformFrame {
    pub waveform: Vec<i16>,

    #[serde(default)]
    pub sample_count: u64,

    #[serde(default)]
    pub trigger_start: u64,

    #[serde(default)]
    pub trigger_delay: u64,
}
