//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level byte-sequence builders and decoders for the
//! ESC/POS protocol used by Epson thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Fixed control commands (init, feed, cut, pulse, power-off)
//! - [`status`]: Real-time status queries and response decoding (`DLE EOT`)
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::{commands, status};
//! use recibo::protocol::commands::CutMode;
//! use recibo::protocol::status::StatusKind;
//!
//! // Build a small print job
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(b"TOTAL: $4.20\n");
//! data.extend(commands::feed_lines(3));
//! data.extend(commands::feed_and_cut(CutMode::Partial, 0));
//!
//! // Ask whether the roll is running out
//! let query = status::build_query(StatusKind::RollPaperSensor);
//! assert_eq!(query, vec![0x10, 0x04, 0x04]);
//! // Send `data` / `query` to the printer via a transport...
//! ```
//!
//! ## Protocol Reference
//!
//! This implementation is based on the "ESC/POS Command Reference for TM
//! Printers" by Seiko Epson Corp. (TM-T20II profile).

pub mod commands;
pub mod status;
