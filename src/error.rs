//! # Error Types
//!
//! This module defines error types used throughout the recibo library.
//!
//! Every failure of a status query is distinguishable: a query that was never
//! attempted ([`ReciboError::TransportUnavailable`]), a command that could not
//! be fully written ([`ReciboError::WriteFailed`]), a missing response byte
//! ([`ReciboError::ReadFailed`]), and a response byte that fails the protocol's
//! fixed-bit framing check ([`ReciboError::MalformedResponse`]). The driver
//! never collapses any of these into an empty flag set.

use thiserror::Error;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum ReciboError {
    /// No transport is attached; the operation was never attempted
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Command bytes could not be fully written to the printer
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// No response byte obtained (timeout, disconnect, empty read)
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// A response byte was received but its fixed framing bits are wrong.
    ///
    /// Status response bytes must satisfy `byte & 0b1001_0011 == 0b0001_0010`;
    /// anything else is a framing error, a wrong device state, or a garbled
    /// transport read, and is never decoded into flags.
    #[error("Malformed status response: {0:#010b} (fixed bits 0,1,4,7 must be 0b00010010)")]
    MalformedResponse(u8),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
