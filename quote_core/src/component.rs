//! # Cut-List Components
//!
//! The ephemeral, per-estimate line items: each [`ProductComponent`] is
//! one cut part with concrete dimensions and quantity. Lines are created
//! by expanding a product template (replacing the list) or a group
//! template (appending to it), then dimensioned by running the owning
//! definition's formulas against the product dimensions.
//!
//! ## Derived vs. Manual
//!
//! Every line is in one of two dimension states:
//!
//! - **Derived** - length/width follow the definition's formulas and are
//!   refreshed whenever the product dimensions change.
//! - **Manual** - the user has typed over length, width, or quantity.
//!   The transition is one-way: once a line is Manual, recompute never
//!   touches it again. The only way back is removing the line and
//!   re-expanding it.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{Catalog, ComponentDef};
//! use quote_core::component::{expand_product, recompute_derived};
//! use quote_core::catalog::ProductTemplate;
//! use quote_core::formula::DimContext;
//!
//! let mut catalog = Catalog::new();
//! let side = ComponentDef::new("Hông tủ")
//!     .with_length_formula("H")
//!     .with_width_formula("W");
//! let side_id = side.id;
//! catalog.add_component(side);
//!
//! let template = ProductTemplate::new("Tủ").with_entry(side_id, 2);
//! let mut components = expand_product(&template, &catalog);
//!
//! let ctx = DimContext { l: 800.0, w: 400.0, h: 750.0, t: 17.0 };
//! recompute_derived(&mut components, &catalog, &ctx);
//!
//! assert_eq!(components[0].length_mm, 750.0);
//! assert_eq!(components[0].width_mm, 400.0);
//! assert_eq!(components[0].qty, 2);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, ComponentDef, GroupTemplate, ProductTemplate};
use crate::formula::{evaluate, DimContext};

/// Dimension state of a cut-list line. See the module docs for the
/// one-way Derived -> Manual transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DimState {
    /// Length/width follow the definition's formulas
    #[default]
    Derived,
    /// The user has edited length, width, or qty directly
    Manual,
}

/// One cut part of the current estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductComponent {
    pub id: Uuid,
    pub name: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub qty: u32,
    /// Link back to the catalog definition; `None` once the user has
    /// freely renamed the line (an unlinked line has no formulas and no
    /// edge-banding flags).
    pub component_id: Option<Uuid>,
    /// Board override for this line; `None` means the product's default
    /// board (or the back-panel board, when the name says so).
    pub material_id: Option<Uuid>,
    pub dims: DimState,
}

impl ProductComponent {
    /// A fresh line from a catalog definition: zero dimensions, Derived,
    /// no material override. Dimensions arrive with the next recompute.
    pub fn from_def(def: &ComponentDef, qty: u32) -> Self {
        ProductComponent {
            id: Uuid::new_v4(),
            name: def.name.clone(),
            length_mm: 0.0,
            width_mm: 0.0,
            qty,
            component_id: Some(def.id),
            material_id: None,
            dims: DimState::Derived,
        }
    }

    /// Direct length edit; flips the line to Manual.
    pub fn set_length_mm(&mut self, length_mm: f64) {
        self.length_mm = length_mm;
        self.dims = DimState::Manual;
    }

    /// Direct width edit; flips the line to Manual.
    pub fn set_width_mm(&mut self, width_mm: f64) {
        self.width_mm = width_mm;
        self.dims = DimState::Manual;
    }

    /// Direct quantity edit; flips the line to Manual.
    pub fn set_qty(&mut self, qty: u32) {
        self.qty = qty;
        self.dims = DimState::Manual;
    }

    /// Free rename. Unlinks the line from its catalog definition, so it
    /// no longer recomputes and no longer contributes edge banding.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.component_id = None;
    }

    pub fn is_derived(&self) -> bool {
        self.dims == DimState::Derived
    }
}

/// Expand a product template into a fresh cut list.
///
/// Entries whose component id is unknown to the catalog are silently
/// skipped - a template referencing a deleted definition must never break
/// the whole expansion.
pub fn expand_product(template: &ProductTemplate, catalog: &Catalog) -> Vec<ProductComponent> {
    template
        .entries
        .iter()
        .filter_map(|entry| {
            catalog
                .component(entry.component_id)
                .map(|def| ProductComponent::from_def(def, entry.qty))
        })
        .collect()
}

/// Append a group template ("cụm") to an existing cut list.
///
/// Each entry's quantity is multiplied by `instance_qty`, and every
/// appended line gets a fresh identity so it can be edited and removed
/// independently of other insertions of the same group. Unknown
/// component ids are silently skipped, as in [`expand_product`].
pub fn expand_group(
    components: &mut Vec<ProductComponent>,
    group: &GroupTemplate,
    instance_qty: u32,
    catalog: &Catalog,
) {
    for entry in &group.entries {
        if let Some(def) = catalog.component(entry.component_id) {
            components.push(ProductComponent::from_def(def, entry.qty * instance_qty));
        }
    }
}

/// Refresh the formula-driven dimensions of every Derived line.
///
/// Per field: a present formula is evaluated and the result rounded to
/// the nearest integer millimeter; an absent formula leaves that field's
/// current value untouched. Manual lines and lines whose definition no
/// longer resolves are never modified. Idempotent for a fixed context.
pub fn recompute_derived(
    components: &mut [ProductComponent],
    catalog: &Catalog,
    ctx: &DimContext,
) {
    for component in components.iter_mut() {
        if component.dims != DimState::Derived {
            continue;
        }
        let Some(def) = component.component_id.and_then(|id| catalog.component(id)) else {
            continue;
        };
        if let Some(formula) = &def.length_formula {
            component.length_mm = evaluate(formula, ctx).round();
        }
        if let Some(formula) = &def.width_formula {
            component.width_mm = evaluate(formula, ctx).round();
        }
    }
}
