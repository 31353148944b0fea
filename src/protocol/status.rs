//! # Real-Time Status Protocol (DLE EOT)
//!
//! This module implements the ESC/POS real-time status protocol: a catalog of
//! status query definitions plus the codec that encodes queries and decodes
//! the printer's one-byte responses into typed flag sets.
//!
//! ## Protocol Overview
//!
//! A status query is `DLE EOT n [a]`: the fixed two-byte real-time prefix,
//! a function selector `n`, and for multiplexed categories a sub-parameter
//! `a`. The printer answers with exactly one byte.
//!
//! | Category | n | a | Flags (bit position) |
//! |----------|---|---|----------------------|
//! | Printer | 1 | — | drawer pin 3 (2), offline (3), online recovery (5), feed button (6) |
//! | Offline cause | 2 | — | cover open (2), button feed (3), paper-end stop (5), error (6) |
//! | Error cause | 3 | — | recoverable (2), autocutter (3), unrecoverable (5), auto-recoverable (6) |
//! | Roll paper sensor | 4 | — | near-end (2), end (5) |
//! | Ink A | 7 | 1 | near-end (2), end (3), not detected (5), cleaning (6) |
//! | Ink B | 7 | 2 | same layout as Ink A |
//! | Peeler | 8 | 3 | waiting for label removal (2), no paper (5) |
//! | Interface | 18 | 1 | multiple-interface printing enabled (2) |
//! | DM-D | 18 | 2 | customer display transmission busy (2) |
//!
//! ## Response Framing
//!
//! Only bits 2, 3, 5 and 6 of a response byte carry status data. Bits 0, 1,
//! 4 and 7 are fixed by the protocol to `0`, `1`, `1`, `0` respectively, so
//! every valid response satisfies:
//!
//! ```text
//! byte & 0b1001_0011 == 0b0001_0010
//! ```
//!
//! Any other byte is not a status response (framing error, wrong device
//! state, or a garbled read) and decoding fails with
//! [`ReciboError::MalformedResponse`] rather than guessing at a flag set.
//! In particular, a timed-out or empty read is never mistaken for
//! "no flags set": the all-clear response is the distinct byte `0x12`.
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::status::{self, StatusFlag, StatusKind};
//!
//! // Encode a query for the roll paper sensor
//! let query = status::build_query(StatusKind::RollPaperSensor);
//! assert_eq!(query, vec![0x10, 0x04, 4]);
//!
//! // Decode a response with bit 2 set: paper is near the end
//! let response = status::decode_response(StatusKind::RollPaperSensor, 0b0001_0110)?;
//! assert!(response.contains(StatusFlag::RollPaperNearEnd));
//! assert!(!response.contains(StatusFlag::RollPaperEnd));
//! # Ok::<(), recibo::ReciboError>(())
//! ```
//!
//! ## Reference
//!
//! "ESC/POS Command Reference for TM Printers", DLE EOT, TM-T20II profile.

use crate::error::ReciboError;

use super::commands::DLE;

// ============================================================================
// PROTOCOL CONSTANTS
// ============================================================================

/// EOT (End of Transmission) - second byte of the status query prefix
///
/// `DLE EOT` (0x10 0x04) selects "transmit real-time status".
pub const EOT: u8 = 0x04;

/// Mask selecting the fixed framing bits (0, 1, 4, 7) of a response byte
pub const RESPONSE_FIXED_MASK: u8 = 0b1001_0011;

/// Required value of the framing bits: bit 1 and bit 4 set, the rest clear
pub const RESPONSE_FIXED_PATTERN: u8 = 0b0001_0010;

/// The four data-bearing bit positions of a status response byte.
///
/// Every flag layout in the catalog draws its positions from this set;
/// categories with fewer flags use a subset (e.g. the roll paper sensor
/// reports only on bits 2 and 5).
pub const FLAG_BIT_POSITIONS: [u8; 4] = [2, 3, 5, 6];

// ============================================================================
// STATUS CATEGORIES
// ============================================================================

/// # Status Category
///
/// Identifies what a real-time status query asks about. This is a closed
/// enumeration: every category has exactly one entry in the catalog, so
/// [`StatusKind::query`] is a total function with no failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Overall printer state (drawer pin, offline, feed button)
    Printer,
    /// Why the printer is offline
    OfflineCause,
    /// Which class of error occurred
    ErrorCause,
    /// Roll paper near-end / end sensors
    RollPaperSensor,
    /// Ink cartridge A
    InkA,
    /// Ink cartridge B
    InkB,
    /// Label peeler
    Peeler,
    /// Multi-interface printing state
    Interface,
    /// DM-D customer display transmission state
    DmD,
}

impl StatusKind {
    /// All categories, in catalog order.
    pub const ALL: [StatusKind; 9] = [
        StatusKind::Printer,
        StatusKind::OfflineCause,
        StatusKind::ErrorCause,
        StatusKind::RollPaperSensor,
        StatusKind::InkA,
        StatusKind::InkB,
        StatusKind::Peeler,
        StatusKind::Interface,
        StatusKind::DmD,
    ];

    /// Look up this category's query definition in the catalog.
    pub const fn query(self) -> StatusQuery {
        match self {
            StatusKind::Printer => StatusQuery {
                number: 1,
                parameter: None,
                layout: PRINTER_LAYOUT,
            },
            StatusKind::OfflineCause => StatusQuery {
                number: 2,
                parameter: None,
                layout: OFFLINE_CAUSE_LAYOUT,
            },
            StatusKind::ErrorCause => StatusQuery {
                number: 3,
                parameter: None,
                layout: ERROR_CAUSE_LAYOUT,
            },
            StatusKind::RollPaperSensor => StatusQuery {
                number: 4,
                parameter: None,
                layout: ROLL_PAPER_SENSOR_LAYOUT,
            },
            StatusKind::InkA => StatusQuery {
                number: 7,
                parameter: Some(1),
                layout: INK_LAYOUT,
            },
            StatusKind::InkB => StatusQuery {
                number: 7,
                parameter: Some(2),
                layout: INK_LAYOUT,
            },
            StatusKind::Peeler => StatusQuery {
                number: 8,
                parameter: Some(3),
                layout: PEELER_LAYOUT,
            },
            StatusKind::Interface => StatusQuery {
                number: 18,
                parameter: Some(1),
                layout: INTERFACE_LAYOUT,
            },
            StatusKind::DmD => StatusQuery {
                number: 18,
                parameter: Some(2),
                layout: DM_D_LAYOUT,
            },
        }
    }

    /// Human-readable category name.
    pub const fn name(self) -> &'static str {
        match self {
            StatusKind::Printer => "printer",
            StatusKind::OfflineCause => "offline-cause",
            StatusKind::ErrorCause => "error-cause",
            StatusKind::RollPaperSensor => "roll-paper-sensor",
            StatusKind::InkA => "ink-a",
            StatusKind::InkB => "ink-b",
            StatusKind::Peeler => "peeler",
            StatusKind::Interface => "interface",
            StatusKind::DmD => "dm-d",
        }
    }

    /// Parse a category from its CLI name (as printed by [`StatusKind::name`]).
    pub fn parse(s: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown status category '{}'. Known categories: {}",
                    s,
                    Self::ALL.map(StatusKind::name).join(", ")
                )
            })
    }
}

// ============================================================================
// STATUS FLAGS
// ============================================================================

/// # Status Flag
///
/// One named boolean condition reported by a status response. Each category's
/// layout maps a subset of these flags to response bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFlag {
    // Printer (n = 1)
    DrawerKickOutPin3,
    Offline,
    WaitingOnlineRecovery,
    PaperFeedButtonPressed,

    // Offline cause (n = 2)
    CoverOpen,
    PaperFedByButton,
    PrintingStopPaperEnd,
    Error,

    // Error cause (n = 3)
    RecoverableError,
    AutocutterError,
    UnrecoverableError,
    AutoRecoverableError,

    // Roll paper sensor (n = 4)
    RollPaperNearEnd,
    RollPaperEnd,

    // Ink A / Ink B (n = 7)
    InkNearEndDetected,
    InkEndDetected,
    InkNotDetected,
    CleaningBeingPerformed,

    // Peeler (n = 8)
    WaitingForLabelRemoval,
    NoPaperInLabelPeeler,

    // Interface (n = 18, a = 1)
    PrintingUsingMultipleIfacesEnabled,

    // DM-D (n = 18, a = 2)
    DmDTxStatusBusy,
}

impl StatusFlag {
    /// Human-readable description for status reports.
    pub const fn label(self) -> &'static str {
        match self {
            StatusFlag::DrawerKickOutPin3 => "Drawer kick-out connector pin 3 high",
            StatusFlag::Offline => "Printer offline",
            StatusFlag::WaitingOnlineRecovery => "Waiting for online recovery",
            StatusFlag::PaperFeedButtonPressed => "Paper feed button pressed",
            StatusFlag::CoverOpen => "Cover open",
            StatusFlag::PaperFedByButton => "Paper fed by the feed button",
            StatusFlag::PrintingStopPaperEnd => "Printing stopped due to paper end",
            StatusFlag::Error => "Error occurred",
            StatusFlag::RecoverableError => "Recoverable error",
            StatusFlag::AutocutterError => "Autocutter error",
            StatusFlag::UnrecoverableError => "Unrecoverable error",
            StatusFlag::AutoRecoverableError => "Automatically recoverable error",
            StatusFlag::RollPaperNearEnd => "Roll paper near end",
            StatusFlag::RollPaperEnd => "Roll paper end",
            StatusFlag::InkNearEndDetected => "Ink near-end detected",
            StatusFlag::InkEndDetected => "Ink end detected",
            StatusFlag::InkNotDetected => "Ink cartridge not detected",
            StatusFlag::CleaningBeingPerformed => "Head cleaning in progress",
            StatusFlag::WaitingForLabelRemoval => "Waiting for label removal",
            StatusFlag::NoPaperInLabelPeeler => "No paper in label peeler",
            StatusFlag::PrintingUsingMultipleIfacesEnabled => {
                "Printing over multiple interfaces enabled"
            }
            StatusFlag::DmDTxStatusBusy => "DM-D transmission busy",
        }
    }
}

// ============================================================================
// FLAG LAYOUTS
// ============================================================================
//
// Each layout maps flags to explicit bit positions. The positions are spelled
// out rather than derived from declaration order; positions come only from
// FLAG_BIT_POSITIONS, and a category may use a subset of them.

const PRINTER_LAYOUT: &[(StatusFlag, u8)] = &[
    (StatusFlag::DrawerKickOutPin3, 2),
    (StatusFlag::Offline, 3),
    (StatusFlag::WaitingOnlineRecovery, 5),
    (StatusFlag::PaperFeedButtonPressed, 6),
];

const OFFLINE_CAUSE_LAYOUT: &[(StatusFlag, u8)] = &[
    (StatusFlag::CoverOpen, 2),
    (StatusFlag::PaperFedByButton, 3),
    (StatusFlag::PrintingStopPaperEnd, 5),
    (StatusFlag::Error, 6),
];

const ERROR_CAUSE_LAYOUT: &[(StatusFlag, u8)] = &[
    (StatusFlag::RecoverableError, 2),
    (StatusFlag::AutocutterError, 3),
    (StatusFlag::UnrecoverableError, 5),
    (StatusFlag::AutoRecoverableError, 6),
];

// Bits 3 and 6 repeat the paper sensors and are ignored.
const ROLL_PAPER_SENSOR_LAYOUT: &[(StatusFlag, u8)] = &[
    (StatusFlag::RollPaperNearEnd, 2),
    (StatusFlag::RollPaperEnd, 5),
];

const INK_LAYOUT: &[(StatusFlag, u8)] = &[
    (StatusFlag::InkNearEndDetected, 2),
    (StatusFlag::InkEndDetected, 3),
    (StatusFlag::InkNotDetected, 5),
    (StatusFlag::CleaningBeingPerformed, 6),
];

// Bits 3 and 6 are unused for the peeler.
const PEELER_LAYOUT: &[(StatusFlag, u8)] = &[
    (StatusFlag::WaitingForLabelRemoval, 2),
    (StatusFlag::NoPaperInLabelPeeler, 5),
];

const INTERFACE_LAYOUT: &[(StatusFlag, u8)] =
    &[(StatusFlag::PrintingUsingMultipleIfacesEnabled, 2)];

const DM_D_LAYOUT: &[(StatusFlag, u8)] = &[(StatusFlag::DmDTxStatusBusy, 2)];

/// # Status Query Definition
///
/// One catalog entry: the `DLE EOT` function selector, the optional
/// sub-parameter for multiplexed categories (ink cartridge A vs B, the
/// n = 18 group), and the flag layout used to decode the response.
#[derive(Debug, Clone, Copy)]
pub struct StatusQuery {
    /// Function selector (the `n` byte of `DLE EOT n`)
    pub number: u8,
    /// Sub-parameter (the optional `a` byte); `None` unless the category
    /// multiplexes several sub-statuses under one function selector
    pub parameter: Option<u8>,
    /// Flag-to-bit-position table for this category's response byte
    pub layout: &'static [(StatusFlag, u8)],
}

// ============================================================================
// CODEC
// ============================================================================

/// Build the outbound query bytes for a status category.
///
/// Returns `[DLE, EOT, n]`, with the sub-parameter appended as a fourth byte
/// only for categories that define one.
///
/// ## Example
///
/// ```
/// use recibo::protocol::status::{build_query, StatusKind};
///
/// assert_eq!(build_query(StatusKind::Printer), vec![16, 4, 1]);
/// assert_eq!(build_query(StatusKind::InkB), vec![16, 4, 7, 2]);
/// ```
#[inline]
pub fn build_query(kind: StatusKind) -> Vec<u8> {
    let query = kind.query();
    let mut bytes = vec![DLE, EOT, query.number];
    if let Some(parameter) = query.parameter {
        bytes.push(parameter);
    }
    bytes
}

/// Decode a one-byte status response for the given category.
///
/// Fails with [`ReciboError::MalformedResponse`] when the byte's fixed
/// framing bits don't match [`RESPONSE_FIXED_PATTERN`]. On success, a flag is
/// active iff its bit position (per the category's layout) is set; bits not
/// mapped by the layout are ignored. Decoding is pure: the same byte always
/// yields the same flag set.
pub fn decode_response(kind: StatusKind, byte: u8) -> Result<StatusResponse, ReciboError> {
    if byte & RESPONSE_FIXED_MASK != RESPONSE_FIXED_PATTERN {
        return Err(ReciboError::MalformedResponse(byte));
    }

    let flags = kind
        .query()
        .layout
        .iter()
        .filter(|(_, bit)| byte & (1 << bit) != 0)
        .map(|(flag, _)| *flag)
        .collect();

    Ok(StatusResponse { kind, flags })
}

/// # Status Response
///
/// The decoded result of one status query: the set of active flags, scoped
/// to the category that was queried. Produced fresh per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    kind: StatusKind,
    flags: Vec<StatusFlag>,
}

impl StatusResponse {
    /// The category this response answers.
    #[inline]
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Active flags, in the category layout's bit-position order.
    #[inline]
    pub fn flags(&self) -> &[StatusFlag] {
        &self.flags
    }

    /// Whether the given flag is active.
    #[inline]
    pub fn contains(&self, flag: StatusFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Whether no flags are active (the all-clear `0x12` response).
    #[inline]
    pub fn is_clear(&self) -> bool {
        self.flags.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_bit_positions_are_valid() {
        for kind in StatusKind::ALL {
            let layout = kind.query().layout;
            for (flag, bit) in layout {
                assert!(
                    FLAG_BIT_POSITIONS.contains(bit),
                    "{:?}/{:?} uses invalid bit {}",
                    kind,
                    flag,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_catalog_bit_positions_are_unique_per_layout() {
        for kind in StatusKind::ALL {
            let layout = kind.query().layout;
            for (i, (_, a)) in layout.iter().enumerate() {
                for (_, b) in &layout[i + 1..] {
                    assert_ne!(a, b, "{:?} maps two flags to bit {}", kind, a);
                }
            }
        }
    }

    #[test]
    fn test_build_query_without_parameter() {
        assert_eq!(build_query(StatusKind::Printer), vec![16, 4, 1]);
        assert_eq!(build_query(StatusKind::OfflineCause), vec![16, 4, 2]);
        assert_eq!(build_query(StatusKind::ErrorCause), vec![16, 4, 3]);
        assert_eq!(build_query(StatusKind::RollPaperSensor), vec![16, 4, 4]);
    }

    #[test]
    fn test_build_query_with_parameter() {
        assert_eq!(build_query(StatusKind::InkA), vec![16, 4, 7, 1]);
        assert_eq!(build_query(StatusKind::InkB), vec![16, 4, 7, 2]);
        assert_eq!(build_query(StatusKind::Peeler), vec![16, 4, 8, 3]);
        assert_eq!(build_query(StatusKind::Interface), vec![16, 4, 18, 1]);
        assert_eq!(build_query(StatusKind::DmD), vec![16, 4, 18, 2]);
    }

    #[test]
    fn test_ink_cartridges_share_layout() {
        assert_eq!(
            StatusKind::InkA.query().layout,
            StatusKind::InkB.query().layout
        );
    }

    #[test]
    fn test_decode_rejects_bad_framing() {
        // Bit 1 and bit 4 must be set, bits 0 and 7 clear
        for byte in [0x00u8, 0xFF, 0b0001_0011, 0b1001_0010, 0b0000_0010, 0b0001_0000] {
            let result = decode_response(StatusKind::Printer, byte);
            assert!(
                matches!(result, Err(ReciboError::MalformedResponse(b)) if b == byte),
                "byte {:#04x} should be rejected",
                byte
            );
        }
    }

    #[test]
    fn test_decode_all_clear() {
        let response = decode_response(StatusKind::Printer, 0b0001_0010).unwrap();
        assert!(response.is_clear());
        assert_eq!(response.kind(), StatusKind::Printer);
    }

    #[test]
    fn test_decode_printer_flags() {
        // Framing pattern plus bits 2 and 6
        let byte = 0b0001_0010 | (1 << 2) | (1 << 6);
        assert_eq!(byte, 0b0101_0110);

        let response = decode_response(StatusKind::Printer, byte).unwrap();
        assert_eq!(
            response.flags(),
            &[
                StatusFlag::DrawerKickOutPin3,
                StatusFlag::PaperFeedButtonPressed
            ]
        );
        assert!(!response.contains(StatusFlag::Offline));
        assert!(!response.contains(StatusFlag::WaitingOnlineRecovery));
    }

    #[test]
    fn test_decode_ignores_unmapped_bits() {
        // The roll paper sensor reports only on bits 2 and 5; bits 3 and 6
        // are set here and must not surface as flags.
        let byte = 0b0001_0010 | (1 << 3) | (1 << 6);
        let response = decode_response(StatusKind::RollPaperSensor, byte).unwrap();
        assert!(response.is_clear());
    }

    #[test]
    fn test_decode_roll_paper_flags() {
        let byte = 0b0001_0010 | (1 << 2) | (1 << 5);
        let response = decode_response(StatusKind::RollPaperSensor, byte).unwrap();
        assert_eq!(
            response.flags(),
            &[StatusFlag::RollPaperNearEnd, StatusFlag::RollPaperEnd]
        );
    }

    #[test]
    fn test_decode_is_pure() {
        let byte = 0b0011_0110;
        let first = decode_response(StatusKind::OfflineCause, byte).unwrap();
        let second = decode_response(StatusKind::OfflineCause, byte).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_every_declared_subset_round_trips() {
        for kind in StatusKind::ALL {
            let layout = kind.query().layout;
            // Every subset of the declared bit positions
            for mask in 0..(1u32 << layout.len()) {
                let mut byte = RESPONSE_FIXED_PATTERN;
                let mut expected = Vec::new();
                for (i, (flag, bit)) in layout.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        byte |= 1 << bit;
                        expected.push(*flag);
                    }
                }
                let response = decode_response(kind, byte).unwrap();
                assert_eq!(response.flags(), expected.as_slice());
            }
        }
    }

    #[test]
    fn test_parse_category_names() {
        assert_eq!(StatusKind::parse("printer"), Ok(StatusKind::Printer));
        assert_eq!(StatusKind::parse("ink-b"), Ok(StatusKind::InkB));
        assert_eq!(StatusKind::parse("dm-d"), Ok(StatusKind::DmD));
        assert!(StatusKind::parse("nonsense").is_err());
    }
}
