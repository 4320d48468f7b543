//! # Project Data Structures
//!
//! A [`Project`] is one saved estimate: the full input snapshot plus the
//! result the user last saw. Projects serialize to `.fqt` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, customer, product label, timestamps)
//! ├── estimate: EstimateInput (dimensions, selections, cut list, accessories)
//! └── last_result: Option<EstimateSummary>
//! ```
//!
//! The catalog itself is NOT part of a project - it lives in the shared
//! library. A project references materials by id; loading against a
//! changed catalog simply re-resolves (and possibly re-prices) on the
//! next recompute. Against an unchanged catalog, load + recompute
//! reproduces the saved totals exactly.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::Catalog;
//! use quote_core::project::Project;
//! use quote_core::session::EstimateSession;
//!
//! let mut session = EstimateSession::new(Catalog::new());
//! session.set_dimensions(800.0, 400.0, 750.0);
//!
//! let project = Project::from_session(&session, "Anh Tuấn", "Tủ bếp treo");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Anh Tuấn"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::component::ProductComponent;
use crate::pricing::{AccessoryLine, EstimateSummary};
use crate::session::EstimateSession;

/// Current schema version for .fqt files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Customer name
    pub customer: String,

    /// What is being built ("Tủ bếp treo 2 cánh", ...)
    pub product_label: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// The full input snapshot of one estimate, sufficient to rebuild the
/// session it was saved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub length_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub default_board: Option<Uuid>,
    pub back_panel_board: Option<Uuid>,
    pub edge_band: Option<Uuid>,
    pub components: Vec<ProductComponent>,
    pub accessories: Vec<AccessoryLine>,
    pub labor_cost: f64,
    pub profit_margin_percent: f64,
}

/// One saved estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub estimate: EstimateInput,
    /// The result shown when the user saved; informational - recompute
    /// against the current catalog is always authoritative
    pub last_result: Option<EstimateSummary>,
}

impl Project {
    /// Snapshot a session into a new project.
    pub fn from_session(
        session: &EstimateSession,
        customer: impl Into<String>,
        product_label: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                customer: customer.into(),
                product_label: product_label.into(),
                created: now,
                modified: now,
            },
            estimate: EstimateInput {
                length_mm: session.length_mm,
                width_mm: session.width_mm,
                height_mm: session.height_mm,
                default_board: session.default_board,
                back_panel_board: session.back_panel_board,
                edge_band: session.edge_band,
                components: session.components.clone(),
                accessories: session.accessories.clone(),
                labor_cost: session.labor_cost,
                profit_margin_percent: session.profit_margin_percent,
            },
            last_result: None,
        }
    }

    /// Attach the result the user is saving (builder style)
    pub fn with_result(mut self, result: EstimateSummary) -> Self {
        self.last_result = Some(result);
        self
    }

    /// Rebuild a working session from this project against a catalog
    /// snapshot. The cut list comes back exactly as saved, Manual flags
    /// included.
    pub fn into_session(self, catalog: Catalog) -> EstimateSession {
        let mut session = EstimateSession::new(catalog);
        session.set_dimensions(
            self.estimate.length_mm,
            self.estimate.width_mm,
            self.estimate.height_mm,
        );
        session.select_default_board(self.estimate.default_board);
        session.select_back_panel_board(self.estimate.back_panel_board);
        session.select_edge_band(self.estimate.edge_band);
        session.components = self.estimate.components;
        session.accessories = self.estimate.accessories;
        session.set_labor_cost(self.estimate.labor_cost);
        session.set_profit_margin(self.estimate.profit_margin_percent);
        session
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ComponentDef, Material, MaterialKind, ProductTemplate};

    fn catalog_and_session() -> (Catalog, EstimateSession) {
        let mut catalog = Catalog::new();
        let board = Material::new("MDF", MaterialKind::Board, 550_000.0, "tấm")
            .with_notes("1220x2440mm");
        let board_id = board.id;
        catalog.add_material(board);
        let side = ComponentDef::new("Hông tủ")
            .with_length_formula("H")
            .with_width_formula("W/2");
        let side_id = side.id;
        catalog.add_component(side);
        let template = ProductTemplate::new("Tủ").with_entry(side_id, 2);
        let template_id = template.id;
        catalog.add_product_template(template);

        let mut session = EstimateSession::new(catalog.clone());
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(board_id));
        session.apply_product_template(template_id);
        session.set_profit_margin(50.0);
        (catalog, session)
    }

    #[test]
    fn test_metadata() {
        let (_, session) = catalog_and_session();
        let project = Project::from_session(&session, "Chị Hà", "Tủ áo");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.meta.customer, "Chị Hà");
        assert_eq!(project.meta.created, project.meta.modified);
    }

    #[test]
    fn test_touch_moves_modified() {
        let (_, session) = catalog_and_session();
        let mut project = Project::from_session(&session, "", "");
        let created = project.meta.created;
        project.touch();
        assert!(project.meta.modified >= created);
    }

    #[test]
    fn test_roundtrip_reproduces_totals() {
        let (catalog, mut session) = catalog_and_session();
        let summary = session.recompute();

        let project = Project::from_session(&session, "Anh Tuấn", "Tủ bếp")
            .with_result(summary.clone());
        let json = serde_json::to_string_pretty(&project).unwrap();
        let loaded: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project, loaded);

        let mut restored = loaded.into_session(catalog);
        assert_eq!(restored.components, session.components);
        let recomputed = restored.recompute();
        assert_eq!(recomputed, summary);
    }

    #[test]
    fn test_roundtrip_preserves_manual_flags() {
        let (catalog, mut session) = catalog_and_session();
        session.recompute();
        let line_id = session.components[0].id;
        session.set_component_length(line_id, 700.0);

        let project = Project::from_session(&session, "", "");
        let mut restored = project.into_session(catalog);

        restored.set_dimensions(2000.0, 800.0, 2200.0);
        restored.recompute();
        assert_eq!(restored.components[0].length_mm, 700.0);
    }
}
