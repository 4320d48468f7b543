//! # Catalog
//!
//! The long-lived, user-managed library the estimator works against:
//! materials, component-name definitions, and product/group templates.
//!
//! A [`Catalog`] value is a snapshot. The backing store (out of scope
//! here) delivers updates as full-snapshot replacements, never as
//! incremental merges, so the estimator holds one `Catalog` at a time and
//! swaps it wholesale via the `replace_*` methods. Lookups are by id;
//! collections stay in insertion order for table rendering.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{Catalog, Material, MaterialKind};
//!
//! let mut catalog = Catalog::new();
//! let board = Material::new("MDF 17mm", MaterialKind::Board, 550_000.0, "tấm");
//! let board_id = board.id;
//! catalog.add_material(board);
//!
//! assert_eq!(catalog.material(board_id).unwrap().name, "MDF 17mm");
//! ```

pub mod component_def;
pub mod material;
pub mod template;

pub use component_def::{ComponentDef, EdgeFlags};
pub use material::{Material, MaterialKind};
pub use template::{GroupTemplate, ProductTemplate, TemplateEntry};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-memory snapshot of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub materials: Vec<Material>,
    pub components: Vec<ComponentDef>,
    pub product_templates: Vec<ProductTemplate>,
    pub group_templates: Vec<GroupTemplate>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn material(&self, id: Uuid) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn component(&self, id: Uuid) -> Option<&ComponentDef> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn product_template(&self, id: Uuid) -> Option<&ProductTemplate> {
        self.product_templates.iter().find(|t| t.id == id)
    }

    pub fn group_template(&self, id: Uuid) -> Option<&GroupTemplate> {
        self.group_templates.iter().find(|t| t.id == id)
    }

    /// Materials of one kind, in library order (for dropdowns)
    pub fn materials_of_kind(&self, kind: MaterialKind) -> impl Iterator<Item = &Material> {
        self.materials.iter().filter(move |m| m.kind == kind)
    }

    // ------------------------------------------------------------------
    // In-memory CRUD
    // ------------------------------------------------------------------

    /// Add or replace a material (matched by id)
    pub fn add_material(&mut self, material: Material) {
        match self.materials.iter_mut().find(|m| m.id == material.id) {
            Some(existing) => *existing = material,
            None => self.materials.push(material),
        }
    }

    pub fn remove_material(&mut self, id: Uuid) -> Option<Material> {
        let idx = self.materials.iter().position(|m| m.id == id)?;
        Some(self.materials.remove(idx))
    }

    /// Add or replace a component definition (matched by id)
    pub fn add_component(&mut self, def: ComponentDef) {
        match self.components.iter_mut().find(|c| c.id == def.id) {
            Some(existing) => *existing = def,
            None => self.components.push(def),
        }
    }

    pub fn remove_component(&mut self, id: Uuid) -> Option<ComponentDef> {
        let idx = self.components.iter().position(|c| c.id == id)?;
        Some(self.components.remove(idx))
    }

    /// Add or replace a product template (matched by id)
    pub fn add_product_template(&mut self, template: ProductTemplate) {
        match self.product_templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.product_templates.push(template),
        }
    }

    pub fn remove_product_template(&mut self, id: Uuid) -> Option<ProductTemplate> {
        let idx = self.product_templates.iter().position(|t| t.id == id)?;
        Some(self.product_templates.remove(idx))
    }

    /// Add or replace a group template (matched by id)
    pub fn add_group_template(&mut self, template: GroupTemplate) {
        match self.group_templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.group_templates.push(template),
        }
    }

    pub fn remove_group_template(&mut self, id: Uuid) -> Option<GroupTemplate> {
        let idx = self.group_templates.iter().position(|t| t.id == id)?;
        Some(self.group_templates.remove(idx))
    }

    // ------------------------------------------------------------------
    // Full-snapshot replacement (how the backing store delivers updates)
    // ------------------------------------------------------------------

    pub fn replace_materials(&mut self, materials: Vec<Material>) {
        self.materials = materials;
    }

    pub fn replace_components(&mut self, components: Vec<ComponentDef>) {
        self.components = components;
    }

    pub fn replace_product_templates(&mut self, templates: Vec<ProductTemplate>) {
        self.product_templates = templates;
    }

    pub fn replace_group_templates(&mut self, templates: Vec<GroupTemplate>) {
        self.group_templates = templates;
    }
}
