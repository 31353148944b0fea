//! # Printer Configuration
//!
//! This module defines hardware specifications for supported thermal printers.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Resolution | Default Baud |
//! |-------|--------------|------------|--------------|
//! | TM-T20II | 576 | 203 DPI | 38400 |
//!
//! ## Usage
//!
//! ```
//! use recibo::printer::PrinterConfig;
//!
//! let config = PrinterConfig::TM_T20II;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// ## Physical Properties
///
/// - **width_dots**: Maximum printable width in dots (pixels)
/// - **width_bytes**: Width in bytes (width_dots / 8)
/// - **dpi**: Resolution in dots per inch
/// - **default_baud**: Factory serial line speed
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For TM-T20II:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 576 / 8 = 72mm
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Vertical motion units per inch (the granularity of `ESC J` feeds)
    pub motion_units_per_inch: u16,

    /// Factory serial baud rate
    pub default_baud: u32,
}

impl PrinterConfig {
    /// # Epson TM-T20II Configuration
    ///
    /// 80mm paper width thermal receipt printer.
    ///
    /// ## Specifications
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Paper width | 80mm |
    /// | Print width | 72mm (576 dots) |
    /// | Resolution | 203 DPI |
    /// | Interface | Serial/USB/Ethernet |
    /// | Cutter | Auto-cutter (full/partial) |
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │         576 dots           │ margin  │
    /// ```
    pub const TM_T20II: Self = Self {
        name: "Epson TM-T20II",
        width_dots: 576,
        width_bytes: 72,
        dpi: 203,
        motion_units_per_inch: 180,
        default_baud: 38400,
    };

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Convert millimeters to dots
    #[inline]
    pub fn mm_to_dots(&self, mm: f32) -> u16 {
        (mm * self.dots_per_mm()).round() as u16
    }

    /// Convert dots to millimeters
    #[inline]
    pub fn dots_to_mm(&self, dots: u16) -> f32 {
        dots as f32 / self.dots_per_mm()
    }

    /// Convert millimeters to `ESC J` vertical motion units, rounded and
    /// clamped to the command's one-byte range.
    ///
    /// ## Example
    ///
    /// ```
    /// use recibo::printer::PrinterConfig;
    ///
    /// // 10mm at 180 units/inch ≈ 71 motion units
    /// assert_eq!(PrinterConfig::TM_T20II.mm_to_motion_units(10.0), 71);
    /// ```
    #[inline]
    pub fn mm_to_motion_units(&self, mm: f32) -> u8 {
        (mm * self.motion_units_per_inch as f32 / 25.4)
            .round()
            .clamp(0.0, 255.0) as u8
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::TM_T20II
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tm_t20ii_dimensions() {
        let config = PrinterConfig::TM_T20II;
        assert_eq!(config.width_dots, 576);
        assert_eq!(config.width_bytes, 72);
        assert_eq!(config.width_dots, config.width_bytes * 8);
    }

    #[test]
    fn test_dots_per_mm() {
        let config = PrinterConfig::TM_T20II;
        let dpmm = config.dots_per_mm();
        // 203 DPI ≈ 8 dots/mm
        assert!((dpmm - 8.0).abs() < 0.1);
    }

    #[test]
    fn test_width_mm() {
        let config = PrinterConfig::TM_T20II;
        let width = config.width_mm();
        // 576 dots / 8 dpmm = 72mm
        assert!((width - 72.0).abs() < 1.0);
    }

    #[test]
    fn test_mm_dot_round_trip() {
        let config = PrinterConfig::TM_T20II;
        let dots = config.mm_to_dots(10.0);
        assert!((dots as i32 - 80).abs() < 2);
        assert!((config.dots_to_mm(dots) - 10.0).abs() < 0.5);
    }

    #[test]
    fn test_mm_to_motion_units() {
        let config = PrinterConfig::TM_T20II;
        // 1mm = 180/25.4 ≈ 7 units
        assert_eq!(config.mm_to_motion_units(1.0), 7);
        assert_eq!(config.mm_to_motion_units(10.0), 71);
    }

    #[test]
    fn test_mm_to_motion_units_clamps() {
        let config = PrinterConfig::TM_T20II;
        assert_eq!(config.mm_to_motion_units(100.0), 255);
        assert_eq!(config.mm_to_motion_units(-5.0), 0);
    }

    #[test]
    fn test_default_is_tm_t20ii() {
        let default = PrinterConfig::default();
        assert_eq!(default.name, PrinterConfig::TM_T20II.name);
    }
}
