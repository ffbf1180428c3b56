pub mod mock;
pub mod zmq_sub;

pub use mock::{MockStep, MockSubscription};
pub use zmq_sub::ZmqSubscription;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("subscription socket error: {0}")]
    Socket(#[from] zmq::Error),

    #[error("subscription closed: {0}")]
    Closed(String),
}

/// Non-blocking message source for the capture receiver.
///
/// `try_receive` returns `Ok(None)` when no message is currently
/// buffered; that is a benign condition, not an error. Any `Err` is
/// fatal to the receive loop.
pub trait Subscription: Send {
    fn try_receive(&mut self) -> Result<Option<Vec<u8>>, TransportError>;
}
