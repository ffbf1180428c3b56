use crate::core::{ChannelBufferBank, WaveformFrame};
use anyhow::{bail, Result};

/// Redistribute one frame's flat multiplexed payload into the bank.
///
/// The wire layout nests the sample index slowest, the channel index
/// next, and the unit index fastest:
///
/// ```text
/// flat = sample * (channels * units) + channel * units + unit
/// ```
///
/// so consecutive wire values are the same (channel, sample) seen by
/// each unit in turn. The frame length is re-checked against the bank
/// geometry; a mismatched frame leaves the bank untouched. The decoder
/// already rejects such frames, so hitting that path means a config
/// and wire-geometry disagreement worth surfacing.
pub fn deinterleave(frame: &WaveformFrame, bank: &mut ChannelBufferBank) -> Result<()> {
    let units = bank.units();
    let channels = bank.channels();
    let samples = bank.samples_per_channel();
    let expected = units * channels * samples;
    if frame.waveform.len() != expected {
        bail!(
            "waveform length mismatch: expected {}, got {}",
            expected,
            frame.waveform.len()
        );
    }

    for sample in 0..samples {
        let sample_offset = sample * channels * units;
        for channel in 0..channels {
            let channel_offset = channel * units;
            for unit in 0..units {
                bank.channel_mut(unit, channel)[sample] =
                    frame.waveform[sample_offset + channel_offset + unit];
            }
        }
    }

    Ok(())
}
