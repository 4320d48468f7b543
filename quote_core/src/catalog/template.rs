//! Bill-of-materials templates.
//!
//! A [`ProductTemplate`] lists the parts one furniture category is built
//! from ("Tủ áo 2 cánh" = 2 sides + top + bottom + back + 2 doors...).
//! A [`GroupTemplate`] has the same shape but represents a sub-assembly
//! ("cụm" - a drawer box, a shelf module) that can be inserted into a
//! product any number of times.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a template: a component definition reference and how many
/// of that part the template needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub component_id: Uuid,
    pub qty: u32,
}

/// A reusable bill-of-materials for one furniture category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTemplate {
    pub id: Uuid,
    pub name: String,
    pub entries: Vec<TemplateEntry>,
}

impl ProductTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        ProductTemplate {
            id: Uuid::new_v4(),
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry (builder style)
    pub fn with_entry(mut self, component_id: Uuid, qty: u32) -> Self {
        self.entries.push(TemplateEntry { component_id, qty });
        self
    }
}

/// A reusable sub-assembly ("cụm") insertable N times into a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTemplate {
    pub id: Uuid,
    pub name: String,
    pub entries: Vec<TemplateEntry>,
}

impl GroupTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        GroupTemplate {
            id: Uuid::new_v4(),
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry (builder style)
    pub fn with_entry(mut self, component_id: Uuid, qty: u32) -> Self {
        self.entries.push(TemplateEntry { component_id, qty });
        self
    }
}
