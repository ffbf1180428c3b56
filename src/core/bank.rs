/// Fixed bank of per-(unit, channel) sample buffers.
///
/// Exactly one bank exists per pipeline. It is overwritten in place on
/// every reconstructed frame; no history is kept. The reconstruction
/// task owns the bank exclusively and hands sinks a shared borrow that
/// is only valid for the duration of one `update` call.
#[derive(Debug, Clone)]
pub struct ChannelBufferBank {
    units: usize,
    channels: usize,
    samples_per_channel: usize,
    // Indexed [unit * channels + channel]
    buffers: Vec<Vec<i16>>,
}

impl ChannelBufferBank {
    pub fn new(units: usize, channels: usize, samples_per_channel: usize) -> Self {
        Self {
            units,
            channels,
            samples_per_channel,
            buffers: vec![vec![0i16; samples_per_channel]; units * channels],
        }
    }

    pub fn units(&self) -> usize {
        self.units
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples_per_channel(&self) -> usize {
        self.samples_per_channel
    }

    /// Samples for one (unit, channel) pair.
    ///
    /// Panics when either index is out of range.
    pub fn channel(&self, unit: usize, channel: usize) -> &[i16] {
        assert!(unit < self.units && channel < self.channels);
        &self.buffers[unit * self.channels + channel]
    }

    pub(crate) fn channel_mut(&mut self, unit: usize, channel: usize) -> &mut [i16] {
        assert!(unit < self.units && channel < self.channels);
        &mut self.buffers[unit * self.channels + channel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bank_is_zeroed() {
        let bank = ChannelBufferBank::new(2, 3, 4);
        for u in 0..2 {
            for c in 0..3 {
                assert_eq!(bank.channel(u, c), &[0i16; 4]);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_channel_index_out_of_range() {
        let bank = ChannelBufferBank::new(2, 3, 4);
        bank.channel(2, 0);
    }
}
