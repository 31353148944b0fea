//! # Mock Transport
//!
//! An in-memory [`Transport`] for tests: records everything the driver
//! sends, serves scripted response bytes, and can be switched to fail on
//! send or receive to exercise the error paths.

use std::collections::VecDeque;

use crate::error::ReciboError;
use crate::transport::Transport;

/// Scripted transport for driver and protocol tests.
///
/// ## Example
///
/// ```
/// use recibo::transport::{MockTransport, Transport};
///
/// let mut mock = MockTransport::new();
/// mock.queue_response(0x12);
///
/// mock.send(&[0x10, 0x04, 0x01]).unwrap();
/// assert_eq!(mock.receive_byte().unwrap(), 0x12);
/// assert_eq!(mock.sent(), &[vec![0x10, 0x04, 0x01]]);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<u8>,
    fail_send: bool,
    fail_receive: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one response byte for a later `receive_byte` call.
    pub fn queue_response(&mut self, byte: u8) {
        self.responses.push_back(byte);
    }

    /// Make every subsequent `send` fail with `WriteFailed`.
    pub fn fail_send(&mut self) {
        self.fail_send = true;
    }

    /// Make every subsequent `receive_byte` fail with `ReadFailed`.
    pub fn fail_receive(&mut self) {
        self.fail_receive = true;
    }

    /// Everything sent so far, one entry per `send` call.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// The last write, if any.
    pub fn last_sent(&self) -> Option<&[u8]> {
        self.sent.last().map(Vec::as_slice)
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        if self.fail_send {
            return Err(ReciboError::WriteFailed("mock send failure".to_string()));
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive_byte(&mut self) -> Result<u8, ReciboError> {
        if self.fail_receive {
            return Err(ReciboError::ReadFailed("mock receive failure".to_string()));
        }
        self.responses
            .pop_front()
            .ok_or_else(|| ReciboError::ReadFailed("no scripted response".to_string()))
    }
}
