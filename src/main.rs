//! # Recibo CLI
//!
//! Command-line interface for driving an ESC/POS receipt printer.
//!
//! ## Usage
//!
//! ```bash
//! # Query every status category
//! recibo status
//!
//! # Query one category
//! recibo status roll-paper-sensor
//!
//! # Print a line of text and cut
//! recibo print "Hello, world!" --cut
//!
//! # Feed three lines
//! recibo feed 3
//!
//! # Partial cut after feeding to the cut position
//! recibo cut --partial
//!
//! # Kick the cash drawer on pin 2
//! recibo pulse
//!
//! # Power the printer off
//! recibo power-off
//! ```
//!
//! All subcommands accept `--device` (default `/dev/ttyUSB0`) and `--baud`
//! (default 38400).

use clap::{Args, Parser, Subcommand};

use recibo::{
    ReciboError,
    printer::{Printer, PrinterConfig},
    protocol::commands::{CutMode, DrawerPin},
    protocol::status::StatusKind,
    transport::SerialTransport,
    transport::serial::DEFAULT_DEVICE,
};

/// Recibo - ESC/POS receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Connection {
    /// Printer serial device path
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Serial baud rate (must match the printer's setting)
    #[arg(long, default_value_t = PrinterConfig::TM_T20II.default_baud)]
    baud: u32,
}

impl Connection {
    fn open(&self) -> Result<Printer<SerialTransport>, ReciboError> {
        Printer::open(&self.device, self.baud)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query real-time printer status
    Status {
        /// Status category (omit to query all of them)
        category: Option<String>,

        #[command(flatten)]
        connection: Connection,
    },

    /// Print a line of ASCII text
    Print {
        /// Text to print
        text: String,

        /// Lines to feed after the text
        #[arg(long, default_value_t = 3)]
        feed: u8,

        /// Cut the paper afterwards
        #[arg(long)]
        cut: bool,

        #[command(flatten)]
        connection: Connection,
    },

    /// Feed paper by whole lines
    Feed {
        /// Number of lines
        #[arg(default_value_t = 1)]
        lines: u8,

        #[command(flatten)]
        connection: Connection,
    },

    /// Feed to the cut position and cut the paper
    Cut {
        /// Leave a small uncut hinge instead of cutting through
        #[arg(long)]
        partial: bool,

        #[command(flatten)]
        connection: Connection,
    },

    /// Pulse the cash drawer kick-out connector
    Pulse {
        /// Use connector pin 5 instead of pin 2
        #[arg(long)]
        pin5: bool,

        /// Pulse ON time in milliseconds
        #[arg(long, default_value_t = 100)]
        on: u16,

        /// Pulse OFF time in milliseconds
        #[arg(long, default_value_t = 200)]
        off: u16,

        #[command(flatten)]
        connection: Connection,
    },

    /// Execute the printer's power-off sequence
    PowerOff {
        #[command(flatten)]
        connection: Connection,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ReciboError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status {
            category,
            connection,
        } => {
            let kinds: Vec<StatusKind> = match category {
                Some(name) => vec![StatusKind::parse(&name).map_err(ReciboError::InvalidCommand)?],
                None => StatusKind::ALL.to_vec(),
            };

            let mut printer = connection.open()?;
            for kind in kinds {
                let status = printer.realtime_status(kind)?;
                if status.is_clear() {
                    println!("{}: OK", kind.name());
                } else {
                    println!("{}:", kind.name());
                    for flag in status.flags() {
                        println!("  - {}", flag.label());
                    }
                }
            }
        }

        Commands::Print {
            text,
            feed,
            cut,
            connection,
        } => {
            let mut printer = connection.open()?;
            printer.init()?;
            printer.print(&text)?;
            printer.line_feed()?;
            if feed > 0 {
                printer.feed_lines(feed)?;
            }
            if cut {
                printer.feed_and_cut(CutMode::Partial, 0)?;
            }
            println!("Printed successfully!");
        }

        Commands::Feed { lines, connection } => {
            connection.open()?.feed_lines(lines)?;
        }

        Commands::Cut {
            partial,
            connection,
        } => {
            let mode = if partial {
                CutMode::Partial
            } else {
                CutMode::Full
            };
            connection.open()?.feed_and_cut(mode, 0)?;
        }

        Commands::Pulse {
            pin5,
            on,
            off,
            connection,
        } => {
            let pin = if pin5 { DrawerPin::Pin5 } else { DrawerPin::Pin2 };
            connection.open()?.pulse(pin, on, off)?;
        }

        Commands::PowerOff { connection } => {
            connection.open()?.power_off()?;
            println!("Power-off sequence sent.");
        }
    }

    Ok(())
}
