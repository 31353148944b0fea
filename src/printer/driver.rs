//! # Printer Driver
//!
//! A [`Printer`] is one session with one physical printer, generic over the
//! [`Transport`] carrying its bytes. It glues the protocol builders in
//! [`crate::protocol`] to the transport and exposes the driver surface:
//! plain-text printing, paper control, peripherals, and real-time status
//! queries.
//!
//! The driver is synchronous and stateless between calls. A status query is
//! one request/response round-trip; callers sharing a connection across
//! threads must serialize queries themselves.

use crate::error::ReciboError;
use crate::printer::PrinterConfig;
use crate::protocol::commands::{self, CutMode, DrawerPin};
use crate::protocol::status::{self, StatusKind, StatusResponse};
use crate::transport::{SerialTransport, Transport};

/// # Printer Session
///
/// Owns an optional transport; while detached, every operation fails with
/// [`ReciboError::TransportUnavailable`] before any I/O is attempted.
///
/// ## Example
///
/// ```no_run
/// use recibo::printer::Printer;
/// use recibo::protocol::commands::CutMode;
/// use recibo::protocol::status::StatusKind;
///
/// let mut printer = Printer::open("/dev/ttyUSB0", 38400)?;
///
/// printer.print("Hello, world!")?;
/// printer.line_feed()?;
/// printer.feed_and_cut(CutMode::Partial, 0)?;
///
/// let status = printer.realtime_status(StatusKind::RollPaperSensor)?;
/// if !status.is_clear() {
///     eprintln!("paper trouble: {:?}", status.flags());
/// }
/// # Ok::<(), recibo::ReciboError>(())
/// ```
pub struct Printer<T: Transport> {
    transport: Option<T>,
    config: PrinterConfig,
}

impl Printer<SerialTransport> {
    /// Open a printer on a serial device.
    pub fn open(device: &str, baud: u32) -> Result<Self, ReciboError> {
        Ok(Self::new(SerialTransport::open(device, baud)?))
    }
}

impl<T: Transport> Printer<T> {
    /// Create a session over an already-open transport, using the default
    /// hardware profile ([`PrinterConfig::TM_T20II`]).
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, PrinterConfig::default())
    }

    /// Create a session with an explicit hardware profile.
    pub fn with_config(transport: T, config: PrinterConfig) -> Self {
        Self {
            transport: Some(transport),
            config,
        }
    }

    /// Create a detached session; attach a transport later with
    /// [`Printer::attach`].
    pub fn disconnected() -> Self {
        Self {
            transport: None,
            config: PrinterConfig::default(),
        }
    }

    /// The hardware profile this session converts units with.
    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Whether a transport is attached.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Attach a transport, returning the previous one if there was any.
    pub fn attach(&mut self, transport: T) -> Option<T> {
        self.transport.replace(transport)
    }

    /// Detach and return the transport, leaving the session disconnected.
    pub fn detach(&mut self) -> Option<T> {
        self.transport.take()
    }

    fn transport_mut(&mut self) -> Result<&mut T, ReciboError> {
        self.transport.as_mut().ok_or_else(|| {
            ReciboError::TransportUnavailable("no transport attached".to_string())
        })
    }

    /// Write raw bytes to the printer.
    pub fn write(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        self.transport_mut()?.send(data)
    }

    /// Print plain text.
    ///
    /// The TM-T20II's default code page only overlaps UTF-8 on ASCII, so
    /// non-ASCII input is rejected with [`ReciboError::InvalidCommand`]
    /// rather than printed as mojibake.
    pub fn print(&mut self, text: &str) -> Result<(), ReciboError> {
        if !text.is_ascii() {
            return Err(ReciboError::InvalidCommand(
                "print text must be ASCII".to_string(),
            ));
        }
        self.write(text.as_bytes())
    }

    /// Reset the printer to its power-on defaults (`ESC @`).
    pub fn init(&mut self) -> Result<(), ReciboError> {
        self.write(&commands::init())
    }

    /// HT: advance to the next horizontal tab position.
    pub fn horizontal_tab(&mut self) -> Result<(), ReciboError> {
        self.write(&[commands::HT])
    }

    /// LF: print the line buffer and feed one line.
    pub fn line_feed(&mut self) -> Result<(), ReciboError> {
        self.write(&[commands::LF])
    }

    /// FF: print and return to Standard mode (in Page mode).
    pub fn form_feed(&mut self) -> Result<(), ReciboError> {
        self.write(&[commands::FF])
    }

    /// CR: print and carriage return.
    pub fn carriage_return(&mut self) -> Result<(), ReciboError> {
        self.write(&[commands::CR])
    }

    /// Print and feed `n` lines.
    pub fn feed_lines(&mut self, n: u8) -> Result<(), ReciboError> {
        self.write(&commands::feed_lines(n))
    }

    /// Print and feed by millimeters, converted through the hardware
    /// profile's motion-unit pitch.
    pub fn feed_mm(&mut self, mm: f32) -> Result<(), ReciboError> {
        let units = self.config.mm_to_motion_units(mm);
        self.write(&commands::feed_units(units))
    }

    /// Cut the paper at the current position.
    pub fn cut(&mut self, mode: CutMode) -> Result<(), ReciboError> {
        self.write(&commands::cut(mode))
    }

    /// Feed `n` motion units to the cut position, then cut.
    pub fn feed_and_cut(&mut self, mode: CutMode, n: u8) -> Result<(), ReciboError> {
        self.write(&commands::feed_and_cut(mode, n))
    }

    /// Pulse the drawer kick-out connector.
    pub fn pulse(&mut self, pin: DrawerPin, on_ms: u16, off_ms: u16) -> Result<(), ReciboError> {
        self.write(&commands::pulse(pin, on_ms, off_ms))
    }

    /// Sound the external buzzer `repeats` times, if one is installed.
    pub fn buzzer(&mut self, repeats: u8) -> Result<(), ReciboError> {
        self.write(&commands::buzzer(repeats))
    }

    /// Execute the printer's power-off sequence.
    pub fn power_off(&mut self) -> Result<(), ReciboError> {
        self.write(&commands::power_off())
    }

    /// # Query Real-Time Status (DLE EOT)
    ///
    /// Sends the query for `kind`, reads exactly one response byte, and
    /// decodes it into the category's flag set.
    ///
    /// ## Errors
    ///
    /// Each failure mode is distinguishable; none is ever reported as an
    /// empty flag set:
    ///
    /// - [`ReciboError::TransportUnavailable`]: detached session, nothing sent
    /// - [`ReciboError::WriteFailed`]: query bytes could not be written
    /// - [`ReciboError::ReadFailed`]: no response byte arrived
    /// - [`ReciboError::MalformedResponse`]: a byte arrived but fails the
    ///   fixed-bit framing check
    ///
    /// All are terminal for this query only; nothing is retried here and the
    /// connection is assumed still usable.
    pub fn realtime_status(&mut self, kind: StatusKind) -> Result<StatusResponse, ReciboError> {
        let transport = self.transport_mut()?;
        transport.send(&status::build_query(kind))?;
        let byte = transport.receive_byte()?;
        status::decode_response(kind, byte)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::status::StatusFlag;
    use crate::transport::MockTransport;

    #[test]
    fn test_detached_printer_refuses_everything() {
        let mut printer: Printer<MockTransport> = Printer::disconnected();
        assert!(!printer.is_connected());

        assert!(matches!(
            printer.print("hi"),
            Err(ReciboError::TransportUnavailable(_))
        ));
        assert!(matches!(
            printer.realtime_status(StatusKind::Printer),
            Err(ReciboError::TransportUnavailable(_))
        ));
    }

    #[test]
    fn test_attach_detach() {
        let mut printer = Printer::new(MockTransport::new());
        assert!(printer.is_connected());

        let transport = printer.detach().unwrap();
        assert!(!printer.is_connected());

        assert!(printer.attach(transport).is_none());
        assert!(printer.is_connected());
    }

    #[test]
    fn test_print_rejects_non_ascii() {
        let mut printer = Printer::new(MockTransport::new());
        assert!(matches!(
            printer.print("café"),
            Err(ReciboError::InvalidCommand(_))
        ));
        // Nothing reached the transport
        assert!(printer.detach().unwrap().sent().is_empty());
    }

    #[test]
    fn test_print_writes_ascii_bytes() {
        let mut printer = Printer::new(MockTransport::new());
        printer.print("TOTAL: $4.20").unwrap();
        printer.line_feed().unwrap();

        let mock = printer.detach().unwrap();
        assert_eq!(mock.sent()[0], b"TOTAL: $4.20");
        assert_eq!(mock.sent()[1], [0x0A]);
    }

    #[test]
    fn test_feed_mm_converts_through_profile() {
        let mut printer = Printer::new(MockTransport::new());
        printer.feed_mm(10.0).unwrap();

        let units = PrinterConfig::TM_T20II.mm_to_motion_units(10.0);
        let mock = printer.detach().unwrap();
        assert_eq!(mock.last_sent(), Some(&[0x1B, 0x4A, units][..]));
    }

    #[test]
    fn test_buzzer_sends_realtime_command() {
        let mut printer = Printer::new(MockTransport::new());
        printer.buzzer(2).unwrap();

        let mock = printer.detach().unwrap();
        assert_eq!(
            mock.last_sent(),
            Some(&[0x10, 0x14, 0x03, 0, 0, 2, 0, 0][..])
        );
    }

    #[test]
    fn test_realtime_status_round_trip() {
        let mut mock = MockTransport::new();
        // Framing pattern with bit 5 set: printing stopped, paper end
        mock.queue_response(0b0011_0010);

        let mut printer = Printer::new(mock);
        let status = printer.realtime_status(StatusKind::OfflineCause).unwrap();

        assert_eq!(status.flags(), &[StatusFlag::PrintingStopPaperEnd]);

        let mock = printer.detach().unwrap();
        assert_eq!(mock.last_sent(), Some(&[16u8, 4, 2][..]));
    }

    #[test]
    fn test_realtime_status_surfaces_write_failure() {
        let mut mock = MockTransport::new();
        mock.fail_send();

        let mut printer = Printer::new(mock);
        assert!(matches!(
            printer.realtime_status(StatusKind::Printer),
            Err(ReciboError::WriteFailed(_))
        ));
    }

    #[test]
    fn test_realtime_status_surfaces_read_failure() {
        let mut mock = MockTransport::new();
        mock.fail_receive();

        let mut printer = Printer::new(mock);
        assert!(matches!(
            printer.realtime_status(StatusKind::Printer),
            Err(ReciboError::ReadFailed(_))
        ));
    }

    #[test]
    fn test_realtime_status_surfaces_malformed_byte() {
        let mut mock = MockTransport::new();
        mock.queue_response(0xFF);

        let mut printer = Printer::new(mock);
        assert!(matches!(
            printer.realtime_status(StatusKind::Printer),
            Err(ReciboError::MalformedResponse(0xFF))
        ));
    }
}
