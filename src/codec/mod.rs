pub mod decoder;

pub use decoder::{DecodeError, FrameDecoder};
