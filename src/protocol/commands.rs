//! # ESC/POS Control Commands
//!
//! This module implements the fixed control sequences of the ESC/POS protocol
//! used by Epson thermal receipt printers (TM-T20II and friends).
//!
//! ## Protocol Overview
//!
//! ESC/POS commands are byte sequences, most of which start with an escape
//! character. This module covers the mechanical control surface:
//!
//! - **Print position**: line feed, form feed, carriage return, tab
//! - **Paper control**: feeding by lines or motion units, cutting
//! - **Peripherals**: cash drawer pulse, buzzer
//! - **Power**: real-time power-off
//!
//! Real-time status queries (`DLE EOT`) live in [`super::status`].
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `FF`, `CR`, `HT`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V m`, `ESC p m t1 t2`
//!
//! ## Reference
//!
//! Based on the "ESC/POS Command Reference for TM Printers" by
//! Seiko Epson Corp., TM-T20II profile.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Prefix for extended commands such as paper cutting (`GS V`):
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// DLE (Data Link Escape) - Real-time command prefix
///
/// Real-time commands (`DLE EOT`, `DLE DC4`) are processed by the printer as
/// soon as they are received, even while it is busy printing:
/// - Hex: 0x10, Decimal: 16
pub const DLE: u8 = 0x10;

/// DC4 (Device Control 4) - Real-time function selector
///
/// Used after DLE for real-time peripheral functions (drawer pulse,
/// power-off):
/// - Hex: 0x14, Decimal: 20
pub const DC4: u8 = 0x14;

/// HT (Horizontal Tab) - Advance to next tab position
pub const HT: u8 = 0x09;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Print and return to Standard mode (in Page mode)
pub const FF: u8 = 0x0C;

/// CR (Carriage Return) - Print and carriage return
pub const CR: u8 = 0x0D;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Call at the start of
/// each print job for consistent behavior.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Text formatting returns to power-on defaults
/// - Page mode is exited
///
/// Settings stored in NV memory (user characters, NV graphics, serial
/// configuration) are not affected.
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints any data in the line buffer, then feeds `n` lines at the current
/// line spacing.
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC d n   |
/// | Hex     | 1B 64 n   |
/// | Decimal | 27 100 n  |
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Print and Feed Paper (ESC J n)
///
/// Prints the line buffer, then feeds `n` vertical motion units.
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC J n   |
/// | Hex     | 1B 4A n   |
/// | Decimal | 27 74 n   |
///
/// ## Resolution Note
///
/// On the TM-T20II the vertical motion unit is 1/180 inch (~0.141mm), so
/// n=255 feeds about 36mm.
#[inline]
pub fn feed_units(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// Autocutter cut type for `GS V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMode {
    /// Cut the paper completely
    Full,
    /// Leave a small uncut hinge so the receipt doesn't fall
    Partial,
}

/// # Cut at Current Position (GS V m)
///
/// Cuts the paper at the current position without feeding first. Note the
/// cutter sits above the print head, so the last printed line is still
/// inside the mechanism; use [`feed_and_cut`] for receipts.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V m   |
/// | Hex     | 1D 56 m  |
/// | Decimal | 29 86 m  |
///
/// `m` = 0 for a full cut, 1 for a partial cut.
#[inline]
pub fn cut(mode: CutMode) -> Vec<u8> {
    let m = match mode {
        CutMode::Full => 0,
        CutMode::Partial => 1,
    };
    vec![GS, b'V', m]
}

/// # Feed to Cut Position, Then Cut (GS V m n)
///
/// Feeds the paper `n` motion units past the last printed line to the cutter
/// position, then cuts. This is the usual end-of-receipt command.
///
/// ## Protocol Details
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V m n   |
/// | Hex     | 1D 56 m n  |
/// | Decimal | 29 86 m n  |
///
/// `m` = 65 ('A') for a full cut, 66 ('B') for a partial cut.
#[inline]
pub fn feed_and_cut(mode: CutMode, n: u8) -> Vec<u8> {
    let m = match mode {
        CutMode::Full => b'A',
        CutMode::Partial => b'B',
    };
    vec![GS, b'V', m, n]
}

// ============================================================================
// PERIPHERAL COMMANDS
// ============================================================================

/// Cash drawer kick-out connector pin for pulse commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerPin {
    /// Connector pin 2 (m = 0)
    Pin2,
    /// Connector pin 5 (m = 1)
    Pin5,
}

impl DrawerPin {
    #[inline]
    const fn selector(self) -> u8 {
        match self {
            DrawerPin::Pin2 => 0,
            DrawerPin::Pin5 => 1,
        }
    }
}

/// # Generate Pulse (ESC p m t1 t2)
///
/// Sends a pulse to the drawer kick-out connector, opening a connected cash
/// drawer. Pulse ON and OFF times are given in milliseconds and encoded in
/// the command's 2ms units (clamped to the 0-510ms range).
///
/// ## Protocol Details
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC p m t1 t2  |
/// | Hex     | 1B 70 m t1 t2  |
/// | Decimal | 27 112 m t1 t2 |
///
/// The drawer is driven for `t1 * 2` ms and then released for `t2 * 2` ms.
#[inline]
pub fn pulse(pin: DrawerPin, on_ms: u16, off_ms: u16) -> Vec<u8> {
    let t1 = (on_ms / 2).min(255) as u8;
    let t2 = (off_ms / 2).min(255) as u8;
    vec![ESC, b'p', pin.selector(), t1, t2]
}

/// # Real-Time Pulse (DLE DC4 fn=1)
///
/// Like [`pulse`], but processed immediately even while the printer is busy.
/// `t` selects the pulse width: ON for `t * 100` ms, OFF for `t * 100` ms
/// (clamped to 1-8).
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | DLE DC4 1 m t  |
/// | Hex     | 10 14 01 m t   |
/// | Decimal | 16 20 1 m t    |
#[inline]
pub fn realtime_pulse(pin: DrawerPin, t: u8) -> Vec<u8> {
    vec![DLE, DC4, 0x01, pin.selector(), t.clamp(1, 8)]
}

/// # Sound Buzzer (DLE DC4 fn=3)
///
/// Sounds the optional buzzer unit `repeats` times, in real time like the
/// other `DLE DC4` commands. Ignored by printers without the buzzer
/// installed.
///
/// ## Protocol Details
///
/// | Format  | Bytes                   |
/// |---------|-------------------------|
/// | ASCII   | DLE DC4 3 a n r t1 t2   |
/// | Hex     | 10 14 03 00 00 r 00 00  |
/// | Decimal | 16 20 3 0 0 r 0 0       |
///
/// The sound pattern `a`, cycle selector `n`, and the `t1 t2` timing bytes
/// are fixed at 0 for the TM-T20II profile (default pattern, default cycle);
/// only the repeat count `r` varies.
#[inline]
pub fn buzzer(repeats: u8) -> Vec<u8> {
    vec![DLE, DC4, 0x03, 0x00, 0x00, repeats, 0x00, 0x00]
}

// ============================================================================
// POWER COMMANDS
// ============================================================================

/// # Power Off (DLE DC4 fn=2)
///
/// Executes the printer's power-off sequence in real time: the print head is
/// parked, NV state is saved, and the printer notifies the host before
/// shutting down.
///
/// ## Protocol Details
///
/// | Format  | Bytes         |
/// |---------|---------------|
/// | ASCII   | DLE DC4 2 1 8 |
/// | Hex     | 10 14 02 01 08|
/// | Decimal | 16 20 2 1 8   |
///
/// The trailing `1 8` bytes are fixed by the protocol.
#[inline]
pub fn power_off() -> Vec<u8> {
    vec![DLE, DC4, 0x02, 0x01, 0x08]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(0), vec![0x1B, 0x64, 0x00]);
        assert_eq!(feed_lines(3), vec![0x1B, 0x64, 0x03]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_feed_units() {
        assert_eq!(feed_units(12), vec![0x1B, 0x4A, 0x0C]);
    }

    #[test]
    fn test_cut() {
        assert_eq!(cut(CutMode::Full), vec![0x1D, 0x56, 0x00]);
        assert_eq!(cut(CutMode::Partial), vec![0x1D, 0x56, 0x01]);
    }

    #[test]
    fn test_feed_and_cut() {
        assert_eq!(feed_and_cut(CutMode::Full, 0), vec![0x1D, 0x56, 0x41, 0x00]);
        assert_eq!(
            feed_and_cut(CutMode::Partial, 16),
            vec![0x1D, 0x56, 0x42, 0x10]
        );
    }

    #[test]
    fn test_pulse() {
        // 100ms on / 200ms off = 50 / 100 in 2ms units
        assert_eq!(pulse(DrawerPin::Pin2, 100, 200), vec![0x1B, 0x70, 0, 50, 100]);
        assert_eq!(pulse(DrawerPin::Pin5, 100, 200), vec![0x1B, 0x70, 1, 50, 100]);
    }

    #[test]
    fn test_pulse_clamps() {
        // 2000ms would be 1000 units; clamps at 255
        assert_eq!(
            pulse(DrawerPin::Pin2, 2000, 2000),
            vec![0x1B, 0x70, 0, 255, 255]
        );
    }

    #[test]
    fn test_realtime_pulse() {
        assert_eq!(realtime_pulse(DrawerPin::Pin2, 2), vec![0x10, 0x14, 1, 0, 2]);
        // t clamps to 1-8
        assert_eq!(realtime_pulse(DrawerPin::Pin5, 0), vec![0x10, 0x14, 1, 1, 1]);
        assert_eq!(realtime_pulse(DrawerPin::Pin5, 99), vec![0x10, 0x14, 1, 1, 8]);
    }

    #[test]
    fn test_buzzer() {
        assert_eq!(buzzer(2), vec![0x10, 0x14, 0x03, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn test_buzzer_is_a_realtime_command() {
        // Buzzer belongs to the DLE DC4 real-time family, same prefix as
        // the pulse and power-off commands
        assert_eq!(&buzzer(1)[..2], &[DLE, DC4]);
        assert_eq!(buzzer(1)[2], 0x03);
    }

    #[test]
    fn test_power_off() {
        assert_eq!(power_off(), vec![0x10, 0x14, 0x02, 0x01, 0x08]);
    }
}
