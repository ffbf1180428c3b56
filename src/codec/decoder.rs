use crate::core::WaveformFrame;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload is not the expected MessagePack map, or the `waveform`
    /// field is absent or not a sequence of 16-bit samples
    #[error("malformed frame payload: {0}")]
    Malformed(#[from] rmp_serde::decode::Error),

    #[error("waveform length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Stateless decoder for one subscription message.
///
/// A frame that fails to decode has no effect on anything downstream;
/// the caller is expected to drop the message and keep receiving.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    expected_len: usize,
}

impl FrameDecoder {
    /// `expected_len` is `units * channels * samples_per_channel` for
    /// the configured geometry. Frames of any other length are invalid
    /// and never reach the reconstruction step.
    pub fn new(expected_len: usize) -> Self {
        Self { expected_len }
    }

    pub fn decode(&self, raw: &[u8]) -> Result<WaveformFrame, DecodeError> {
        let frame: WaveformFrame = rmp_serde::from_slice(raw)?;
        if frame.waveform.len() != self.expected_len {
            return Err(DecodeError::LengthMismatch {
                expected: self.expected_len,
                actual: frame.waveform.len(),
            });
        }
        Ok(frame)
    }
}
