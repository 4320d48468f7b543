//! # Numeric & Notes Parsing
//!
//! Locale-aware number parsing and free-text extraction of board geometry
//! from material notes.
//!
//! Dimension fields arrive from forms in Vietnamese number format, where
//! "." is a thousands separator and "," is the decimal separator
//! ("1.220,5" means 1220.5). Material notes are free text that often
//! encodes the sheet size ("1220x2440mm") and board thickness ("17mm",
//! "dày 18 ly") as typed by purchasing staff.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::parse::{parse_decimal, sheet_size_from_notes, thickness_from_notes};
//!
//! assert_eq!(parse_decimal("1.220,5"), Some(1220.5));
//!
//! let sheet = sheet_size_from_notes("MDF chống ẩm 1220x2440mm").unwrap();
//! assert_eq!(sheet.width_mm, 1220.0);
//! assert_eq!(sheet.height_mm, 2440.0);
//!
//! assert_eq!(thickness_from_notes("ván 17mm, lõi xanh"), Some(17.0));
//! ```

use serde::{Deserialize, Serialize};

/// A rectangular sheet of board material, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl SheetSize {
    /// The standard 4x8-foot metric sheet (1220 x 2440 mm, 2.9768 m²),
    /// used whenever a board's notes carry no explicit size.
    pub const STANDARD: SheetSize = SheetSize {
        width_mm: 1220.0,
        height_mm: 2440.0,
    };

    /// Sheet area in square meters
    pub fn area_m2(&self) -> f64 {
        self.width_mm * self.height_mm / 1_000_000.0
    }
}

impl Default for SheetSize {
    fn default() -> Self {
        SheetSize::STANDARD
    }
}

/// Parse a number typed in Vietnamese locale format.
///
/// "." is treated as a thousands separator and stripped; "," is the
/// decimal separator. Returns `None` for empty or unparseable input.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract a sheet size from free-text notes.
///
/// Matches the first `WxH` pattern of two integers separated by an `x`
/// (case-insensitive, optional surrounding spaces), interpreted as
/// millimeters. Returns `None` when no pattern is present.
pub fn sheet_size_from_notes(notes: &str) -> Option<SheetSize> {
    let bytes = notes.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let mut j = i;
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        if j < bytes.len() && (bytes[j] == b'x' || bytes[j] == b'X') {
            j += 1;
            while j < bytes.len() && bytes[j] == b' ' {
                j += 1;
            }
            let second_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > second_start {
                let width: f64 = notes[start..i].parse().ok()?;
                let height: f64 = notes[second_start..j].parse().ok()?;
                return Some(SheetSize {
                    width_mm: width,
                    height_mm: height,
                });
            }
        }
        // no pair here; keep scanning after this digit run
    }
    None
}

/// Extract a board thickness in millimeters from free-text notes.
///
/// Matches the first number annotated with `mm` or `ly` (the shop term
/// for millimeter board thickness). Numbers at sheet-size scale (over
/// 100 mm) are ignored so "1220x2440mm" never reads as a thickness.
pub fn thickness_from_notes(notes: &str) -> Option<f64> {
    let lower = notes.to_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        // optional decimal fraction, either separator
        if i + 1 < bytes.len()
            && (bytes[i] == b'.' || bytes[i] == b',')
            && bytes[i + 1].is_ascii_digit()
        {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        let number: f64 = lower[start..i].replace(',', ".").parse().ok()?;

        let mut j = i;
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        let suffix = &lower[j..];
        if (suffix.starts_with("mm") || suffix.starts_with("ly")) && number <= 100.0 {
            return Some(number);
        }
    }
    None
}
