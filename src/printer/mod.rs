//! # Printer Module
//!
//! This module provides the driver session and printer-specific
//! configurations.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications
//! - [`driver`]: The [`Printer`] session type

pub mod config;
pub mod driver;

pub use config::PrinterConfig;
pub use driver::Printer;
