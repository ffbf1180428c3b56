use super::{Subscription, TransportError};
use std::collections::VecDeque;

/// One scripted receive outcome for [`MockSubscription`].
#[derive(Debug, Clone)]
pub enum MockStep {
    Message(Vec<u8>),
    NoData,
    Failure(String),
}

/// Scripted subscription for tests.
///
/// Yields its steps in order; once exhausted it reports "no data"
/// forever, like a quiet socket.
pub struct MockSubscription {
    steps: VecDeque<MockStep>,
}

impl MockSubscription {
    pub fn new(steps: Vec<MockStep>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl Subscription for MockSubscription {
    fn try_receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        match self.steps.pop_front() {
            Some(MockStep::Message(raw)) => Ok(Some(raw)),
            Some(MockStep::NoData) | None => Ok(None),
            Some(MockStep::Failure(reason)) => Err(TransportError::Closed(reason)),
        }
    }
}
