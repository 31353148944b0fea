//! # Printer Transport Layer
//!
//! This module provides communication backends for exchanging bytes with
//! printers.
//!
//! ## Available Transports
//!
//! - [`serial`]: Serial/TTY devices (USB-serial adapters, RS-232)
//! - [`mock`]: Scripted in-memory transport for tests
//!
//! ## Contract
//!
//! A [`Transport`] is one bidirectional byte pipe to one physical printer.
//! The driver performs a single synchronous round-trip per status query
//! (request, then one response byte) and never pipelines; callers issuing
//! concurrent queries over one connection must serialize them externally.

use crate::error::ReciboError;

pub mod mock;
pub mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// A byte pipe to a printer.
pub trait Transport {
    /// Write raw bytes to the printer.
    ///
    /// A command is never "half-sent" from the protocol layer's perspective:
    /// implementations must either write all of `data` or fail with
    /// [`ReciboError::WriteFailed`].
    fn send(&mut self, data: &[u8]) -> Result<(), ReciboError>;

    /// Read exactly one response byte.
    ///
    /// Fails with [`ReciboError::ReadFailed`] when no byte arrives (timeout,
    /// disconnect, empty read); from the protocol layer's view this is
    /// indistinguishable from "no connection".
    fn receive_byte(&mut self) -> Result<u8, ReciboError>;
}
