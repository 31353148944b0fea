//! # Serial Transport
//!
//! This module provides communication with ESC/POS printers over a serial
//! link (USB-serial adapter or RS-232), e.g. `/dev/ttyUSB0`.
//!
//! ## TTY Configuration
//!
//! The device is opened read-write and put in raw mode so binary data passes
//! through unmodified in both directions:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//! - **Baud rate**: applied to both directions (default 38400, the TM-T20II
//!   factory setting)
//!
//! Disabling IXON/IXOFF/IXANY software flow control is critical: 0x11
//! (XON/DC1) and 0x13 (XOFF/DC3) are ordinary bytes in command data.
//!
//! Reads use VMIN=0/VTIME so a status read returns promptly instead of
//! blocking forever on a silent printer; [`SerialTransport::receive_byte`]
//! polls until one byte arrives or its deadline passes.
//!
//! ## Chunked Writes
//!
//! Large blocks are written in chunks with a small delay between them to
//! avoid overrunning the printer's receive buffer. The default chunk size is
//! 4096 bytes.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ReciboError;
use crate::transport::Transport;

/// Default serial device path
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";

/// Default baud rate (TM-T20II factory setting)
pub const DEFAULT_BAUD: u32 = 38400;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// Default deadline for a single status-response byte (milliseconds)
const READ_TIMEOUT_MS: u64 = 1000;

/// VTIME per read attempt, in tenths of a second
#[cfg(unix)]
const READ_POLL_DECISECONDS: u8 = 2;

/// # Serial Printer Transport
///
/// Manages a raw-mode serial connection to an ESC/POS printer.
///
/// ## Example
///
/// ```no_run
/// use recibo::transport::{SerialTransport, Transport};
/// use recibo::protocol::commands;
///
/// let mut transport = SerialTransport::open("/dev/ttyUSB0", 38400)?;
///
/// // Send initialization
/// transport.send(&commands::init())?;
///
/// # Ok::<(), recibo::ReciboError>(())
/// ```
pub struct SerialTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
    read_timeout: Duration,
}

impl SerialTransport {
    /// Open a serial connection to the printer.
    ///
    /// ## Parameters
    ///
    /// - `device`: Path to the serial device (e.g., "/dev/ttyUSB0")
    /// - `baud`: Line speed; must match the printer's DIP-switch/NV setting.
    ///   Supported rates: 9600, 19200, 38400, 57600, 115200.
    ///
    /// ## Errors
    ///
    /// Returns [`ReciboError::TransportUnavailable`] if:
    /// - The device doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - The baud rate is unsupported or TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P, baud: u32) -> Result<Self, ReciboError> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                ReciboError::TransportUnavailable(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                ))
            })?;

        // Configure TTY for raw mode at the requested speed
        #[cfg(unix)]
        {
            use std::os::unix::io::AsRawFd;
            configure_tty_raw(file.as_raw_fd(), baud)?;
        }
        #[cfg(not(unix))]
        let _ = baud;

        eprintln!(
            "Serial connection established: {} @ {} baud",
            path.display(),
            baud
        );

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
            read_timeout: Duration::from_millis(READ_TIMEOUT_MS),
        })
    }

    /// Open with the default device path and baud rate (/dev/ttyUSB0, 38400).
    pub fn open_default() -> Result<Self, ReciboError> {
        Self::open(DEFAULT_DEVICE, DEFAULT_BAUD)
    }

    /// Set the chunk size for large writes.
    ///
    /// Larger chunks are faster but may overflow the printer's receive
    /// buffer. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size;
    }

    /// Set the delay between chunks.
    ///
    /// Longer delays give the printer more time to drain its buffer.
    /// Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// Set the deadline for a single response byte. Default is 1 second.
    pub fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = timeout;
    }
}

impl Transport for SerialTransport {
    /// Write data to the printer.
    ///
    /// Small writes are sent directly. Large writes are chunked with a short
    /// pause between chunks, then flushed.
    fn send(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        if data.len() <= self.chunk_size {
            self.file
                .write_all(data)
                .map_err(|e| ReciboError::WriteFailed(format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.file
                    .write_all(chunk)
                    .map_err(|e| ReciboError::WriteFailed(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.file
            .flush()
            .map_err(|e| ReciboError::WriteFailed(format!("Flush failed: {}", e)))
    }

    /// Read one response byte, polling until data arrives or the read
    /// timeout elapses.
    fn receive_byte(&mut self) -> Result<u8, ReciboError> {
        let deadline = Instant::now() + self.read_timeout;
        let mut buf = [0u8; 1];

        loop {
            match self.file.read(&mut buf) {
                // VTIME expired with no data
                Ok(0) => {
                    if Instant::now() >= deadline {
                        return Err(ReciboError::ReadFailed(format!(
                            "No response within {:?}",
                            self.read_timeout
                        )));
                    }
                }
                Ok(_) => return Ok(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(ReciboError::ReadFailed(format!("Read failed: {}", e)));
                }
            }
        }
    }
}

/// Map a numeric baud rate to its termios speed constant.
///
/// Only rates the TM-T20II serial interface can be configured for are
/// supported.
#[cfg(unix)]
fn baud_to_speed(baud: u32) -> Option<libc::speed_t> {
    match baud {
        9600 => Some(libc::B9600),
        19200 => Some(libc::B19200),
        38400 => Some(libc::B38400),
        57600 => Some(libc::B57600),
        115200 => Some(libc::B115200),
        _ => None,
    }
}

/// Configure a file descriptor for raw serial communication.
///
/// This disables all input/output processing so binary data passes through
/// unmodified, applies the line speed, and sets VMIN=0/VTIME so reads time
/// out instead of blocking indefinitely.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB (then CS8, CREAD, CLOCAL are set)
#[cfg(unix)]
fn configure_tty_raw(fd: i32, baud: u32) -> Result<(), ReciboError> {
    use std::mem::MaybeUninit;

    let speed = baud_to_speed(baud).ok_or_else(|| {
        ReciboError::TransportUnavailable(format!("Unsupported baud rate: {}", baud))
    })?;

    // Get current terminal attributes
    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(ReciboError::TransportUnavailable(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    // Input flags: disable all processing
    // IXON/IXOFF/IXANY: disable XON/XOFF flow control (0x11/0x13 are ordinary
    // bytes in command data)
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    // Output flags: disable post-processing
    termios.c_oflag &= !libc::OPOST;

    // Local flags: disable echo, canonical mode, signals
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // Control flags: 8-bit characters, no parity, receiver on, no modem lines
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8 | libc::CREAD | libc::CLOCAL;

    // Reads return after VTIME tenths of a second even with no data
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = READ_POLL_DECISECONDS;

    // Line speed, both directions
    unsafe {
        libc::cfsetispeed(&mut termios, speed);
        libc::cfsetospeed(&mut termios, speed);
    }

    // Apply settings immediately
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(ReciboError::TransportUnavailable(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device_path() {
        assert_eq!(DEFAULT_DEVICE, "/dev/ttyUSB0");
        assert_eq!(DEFAULT_BAUD, 38400);
    }

    #[cfg(unix)]
    #[test]
    fn test_supported_baud_rates() {
        assert_eq!(baud_to_speed(9600), Some(libc::B9600));
        assert_eq!(baud_to_speed(38400), Some(libc::B38400));
        assert_eq!(baud_to_speed(115200), Some(libc::B115200));
    }

    #[cfg(unix)]
    #[test]
    fn test_unsupported_baud_rates() {
        assert_eq!(baud_to_speed(0), None);
        assert_eq!(baud_to_speed(300), None);
        assert_eq!(baud_to_speed(1_000_000), None);
    }

    #[test]
    fn test_open_missing_device() {
        let result = SerialTransport::open("/dev/definitely-not-a-printer", DEFAULT_BAUD);
        assert!(matches!(
            result,
            Err(ReciboError::TransportUnavailable(_))
        ));
    }

    // Note: transport tests against a real port require hardware.
    // Protocol-level behavior is covered with MockTransport in tests/.
}
