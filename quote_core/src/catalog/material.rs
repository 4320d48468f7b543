//! Material library entries.
//!
//! A [`Material`] is one purchasable line in the shop's price list: a
//! sheet good, an edge-banding strip, an accessory, or a labor rate.
//! Board geometry (sheet size, thickness) is not structured data in the
//! library - purchasing staff type it into the free-text `notes` field,
//! and the estimator recovers it with the [`crate::parse`] helpers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parse::{sheet_size_from_notes, thickness_from_notes, SheetSize};

/// What a material is sold as, which decides how its cost is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Sheet goods (MDF, plywood, ...), priced per sheet
    Board,
    /// Edge banding strip, priced per linear meter
    EdgeBand,
    /// Hardware and fittings (hinges, rails, ...), priced per piece/unit
    Accessory,
    /// Labor / machining, priced per job or per unit of work
    Labor,
}

impl MaterialKind {
    /// Human-readable label for tables and dropdowns
    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::Board => "Board",
            MaterialKind::EdgeBand => "Edge banding",
            MaterialKind::Accessory => "Accessory",
            MaterialKind::Labor => "Labor",
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One entry in the material library.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "0b0f7a52-5a1f-4d2a-9d6e-1f1f4be7a001",
///   "name": "MDF lõi xanh 17mm",
///   "kind": "Board",
///   "price": 550000.0,
///   "unit": "tấm",
///   "notes": "An Cường, khổ 1220x2440mm, dày 17mm"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub kind: MaterialKind,
    /// Price per unit, in whole currency (đồng)
    pub price: f64,
    /// Unit label as shown on the price list ("tấm", "md", "cái", ...)
    pub unit: String,
    /// Free text; may encode sheet size and thickness
    pub notes: String,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        kind: MaterialKind,
        price: f64,
        unit: impl Into<String>,
    ) -> Self {
        Material {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            price,
            unit: unit.into(),
            notes: String::new(),
        }
    }

    /// Attach free-text notes (builder style)
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sheet size for this material, parsed from its notes.
    ///
    /// Falls back to the standard 1220x2440 sheet when the notes carry
    /// no `WxH` pattern. Only meaningful for `Board` materials.
    pub fn sheet_size(&self) -> SheetSize {
        sheet_size_from_notes(&self.notes).unwrap_or(SheetSize::STANDARD)
    }

    /// Board thickness parsed from the notes, if any is recorded.
    pub fn thickness_mm(&self) -> Option<f64> {
        thickness_from_notes(&self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_size_from_notes() {
        let board = Material::new("MDF 17", MaterialKind::Board, 550_000.0, "tấm")
            .with_notes("khổ 1000x2000mm");
        assert_eq!(board.sheet_size().width_mm, 1000.0);
        assert_eq!(board.sheet_size().height_mm, 2000.0);
    }

    #[test]
    fn test_sheet_size_fallback() {
        let board = Material::new("MDF 17", MaterialKind::Board, 550_000.0, "tấm");
        assert_eq!(board.sheet_size(), SheetSize::STANDARD);
    }

    #[test]
    fn test_thickness() {
        let board = Material::new("MDF", MaterialKind::Board, 550_000.0, "tấm")
            .with_notes("1220x2440mm, dày 17mm");
        assert_eq!(board.thickness_mm(), Some(17.0));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mat = Material::new("Nẹp PVC", MaterialKind::EdgeBand, 5_000.0, "md");
        let json = serde_json::to_string(&mat).unwrap();
        assert!(json.contains("\"EdgeBand\""));
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(mat, back);
    }
}
