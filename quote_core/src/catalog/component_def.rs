//! Reusable component-name definitions.
//!
//! A [`ComponentDef`] names a kind of cut part ("Hông tủ" / side panel,
//! "Đáy tủ" / bottom, "Hậu tủ" / back panel) and carries the knowledge
//! that is the same every time that part appears in a product: how its
//! length and width derive from the product dimensions, and which of its
//! four edges receive edge banding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of a part's four edges receive edge banding.
///
/// The two long edges run along the part's length, the two short edges
/// along its width. A part can be banded on zero to four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeFlags {
    pub long_a: bool,
    pub long_b: bool,
    pub short_a: bool,
    pub short_b: bool,
}

impl EdgeFlags {
    pub const NONE: EdgeFlags = EdgeFlags {
        long_a: false,
        long_b: false,
        short_a: false,
        short_b: false,
    };

    pub fn new(long_a: bool, long_b: bool, short_a: bool, short_b: bool) -> Self {
        EdgeFlags {
            long_a,
            long_b,
            short_a,
            short_b,
        }
    }

    /// Number of banded edges running along the part's length (0-2)
    pub fn banded_long_edges(&self) -> u32 {
        self.long_a as u32 + self.long_b as u32
    }

    /// Number of banded edges running along the part's width (0-2)
    pub fn banded_short_edges(&self) -> u32 {
        self.short_a as u32 + self.short_b as u32
    }

    /// Whether any edge is banded at all
    pub fn any(&self) -> bool {
        self.long_a || self.long_b || self.short_a || self.short_b
    }
}

/// A reusable part definition.
///
/// Formulas are expressions over `L`, `W`, `H`, `t` (see
/// [`crate::formula`]); either may be absent, in which case that field of
/// an expanded line is left for the user to fill in by hand.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "53c9f1b0-35d4-4e7e-b0a5-77b43f2a9001",
///   "name": "Hông tủ",
///   "length_formula": "H",
///   "width_formula": "W",
///   "edges": { "long_a": true, "long_b": false, "short_a": false, "short_b": false }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub id: Uuid,
    pub name: String,
    pub length_formula: Option<String>,
    pub width_formula: Option<String>,
    pub edges: EdgeFlags,
}

impl ComponentDef {
    pub fn new(name: impl Into<String>) -> Self {
        ComponentDef {
            id: Uuid::new_v4(),
            name: name.into(),
            length_formula: None,
            width_formula: None,
            edges: EdgeFlags::NONE,
        }
    }

    /// Set the length formula (builder style)
    pub fn with_length_formula(mut self, formula: impl Into<String>) -> Self {
        self.length_formula = Some(formula.into());
        self
    }

    /// Set the width formula (builder style)
    pub fn with_width_formula(mut self, formula: impl Into<String>) -> Self {
        self.width_formula = Some(formula.into());
        self
    }

    /// Set the banded edges (builder style)
    pub fn with_edges(mut self, edges: EdgeFlags) -> Self {
        self.edges = edges;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_counts() {
        let edges = EdgeFlags::new(true, false, true, true);
        assert_eq!(edges.banded_long_edges(), 1);
        assert_eq!(edges.banded_short_edges(), 2);
        assert!(edges.any());
        assert!(!EdgeFlags::NONE.any());
    }

    #[test]
    fn test_builder() {
        let def = ComponentDef::new("Hông tủ")
            .with_length_formula("H")
            .with_width_formula("W")
            .with_edges(EdgeFlags::new(true, false, false, false));
        assert_eq!(def.name, "Hông tủ");
        assert_eq!(def.length_formula.as_deref(), Some("H"));
        assert_eq!(def.width_formula.as_deref(), Some("W"));
        assert_eq!(def.edges.banded_long_edges(), 1);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let def = ComponentDef::new("Kệ").with_length_formula("L - 2*t");
        let json = serde_json::to_string(&def).unwrap();
        let back: ComponentDef = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }
}
