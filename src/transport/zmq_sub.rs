use super::{Subscription, TransportError};

/// ZeroMQ SUB endpoint for the measurement stream.
///
/// Connect-only, subscribed to all topics. Receives never block: the
/// socket is polled with `DONTWAIT` and `EAGAIN` maps to "no data yet".
pub struct ZmqSubscription {
    socket: zmq::Socket,
    endpoint: String,
}

impl ZmqSubscription {
    pub fn connect(endpoint: &str) -> Result<Self, TransportError> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::SUB)?;
        socket.set_subscribe(b"")?;
        socket.connect(endpoint)?;
        Ok(Self {
            socket,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Subscription for ZmqSubscription {
    fn try_receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        match self.socket.recv_bytes(zmq::DONTWAIT) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(zmq::Error::EAGAIN) => Ok(None),
            Err(e) => Err(TransportError::Socket(e)),
        }
    }
}
