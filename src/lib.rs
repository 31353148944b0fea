//! # Recibo - Thermal Receipt Printer Driver
//!
//! Recibo is a Rust driver for Epson ESC/POS thermal receipt printers
//! (TM-T20II and compatible) over a serial link. It provides:
//!
//! - **Protocol implementation**: ESC/POS command builders and the
//!   real-time status codec (`DLE EOT`)
//! - **Transport**: raw-mode serial communication, plus a mock for tests
//! - **Driver**: a [`Printer`] session tying protocol to transport
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{
//!     printer::Printer,
//!     protocol::commands::CutMode,
//!     protocol::status::{StatusFlag, StatusKind},
//! };
//!
//! // Open connection to printer
//! let mut printer = Printer::open("/dev/ttyUSB0", 38400)?;
//!
//! // Check the paper before printing
//! let paper = printer.realtime_status(StatusKind::RollPaperSensor)?;
//! if paper.contains(StatusFlag::RollPaperEnd) {
//!     eprintln!("load a new roll first");
//!     return Ok(());
//! }
//!
//! // Print a receipt
//! printer.init()?;
//! printer.print("Hello, world!")?;
//! printer.feed_lines(3)?;
//! printer.feed_and_cut(CutMode::Partial, 0)?;
//!
//! # Ok::<(), recibo::ReciboError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders and status codec |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Driver session and hardware configurations |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Currently tested with:
//! - Epson TM-T20II (80mm paper, 203 DPI, serial)
//!
//! Other Epson printers speaking ESC/POS should work; the real-time status
//! catalog follows the TM-T20II command reference.

pub mod error;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use error::ReciboError;
pub use printer::{Printer, PrinterConfig};
pub use transport::{SerialTransport, Transport};
