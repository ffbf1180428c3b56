pub mod deinterleaver;
pub mod pipeline;
pub mod queue;
pub mod receiver;
pub mod state;

pub use deinterleaver::deinterleave;
pub use pipeline::CapturePipeline;
pub use queue::CaptureQueue;
pub use receiver::Receiver;
pub use state::PipelineState;
