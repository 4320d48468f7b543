//! # Estimate Session
//!
//! [`EstimateSession`] is the working state of one open estimate: the
//! current catalog snapshot, the product dimensions, the material
//! selections, the cut list, accessories, labor, and margin. Every core
//! function takes its inputs from here - there are no module-level
//! globals, so several sessions (tabs, tests, users) can run side by
//! side.
//!
//! Recomputation is synchronous and cheap (tens of lines at most), but
//! input events arrive per keystroke, so the session carries two
//! independent 300 ms debouncers: one for formula-driven dimension
//! refresh, one for repricing. A UI loop calls the `notify_*` methods on
//! each input event and [`EstimateSession::tick`] from its idle handler;
//! batch callers (CLI, tests, load-from-file) just call
//! [`EstimateSession::recompute`] directly.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{Catalog, ComponentDef, Material, MaterialKind, ProductTemplate};
//! use quote_core::session::EstimateSession;
//!
//! let mut catalog = Catalog::new();
//! let board = Material::new("MDF 17mm", MaterialKind::Board, 550_000.0, "tấm")
//!     .with_notes("1220x2440mm, dày 17mm");
//! let board_id = board.id;
//! catalog.add_material(board);
//!
//! let side = ComponentDef::new("Hông tủ")
//!     .with_length_formula("H")
//!     .with_width_formula("W/2");
//! let side_id = side.id;
//! catalog.add_component(side);
//!
//! let template = ProductTemplate::new("Tủ bếp").with_entry(side_id, 2);
//! let template_id = template.id;
//! catalog.add_product_template(template);
//!
//! let mut session = EstimateSession::new(catalog);
//! session.set_dimensions(800.0, 400.0, 750.0);
//! session.select_default_board(Some(board_id));
//! session.apply_product_template(template_id);
//! session.set_profit_margin(50.0);
//!
//! let summary = session.recompute();
//! assert_eq!(summary.total_cost, 550_000.0);
//! assert_eq!(summary.suggested_price, 825_000.0);
//! ```

use std::time::Instant;

use uuid::Uuid;

use crate::aggregate::{aggregate_materials, total_edge_length};
use crate::catalog::{Catalog, MaterialKind};
use crate::component::{
    expand_group, expand_product, recompute_derived, ProductComponent,
};
use crate::debounce::Debouncer;
use crate::formula::DimContext;
use crate::pricing::{price, AccessoryLine, EstimateSummary};

/// Board thickness assumed when the default board's notes carry no
/// thickness marker
pub const DEFAULT_BOARD_THICKNESS_MM: f64 = 18.0;

/// What a [`EstimateSession::tick`] call did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOutcome {
    /// Formula-driven dimensions were refreshed
    pub dimensions_refreshed: bool,
    /// A repricing ran; the new summary
    pub summary: Option<EstimateSummary>,
}

/// Working state of one open estimate.
#[derive(Debug, Clone)]
pub struct EstimateSession {
    catalog: Catalog,
    /// Product dimensions in millimeters (L, W, H)
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
    dimension_debounce: Debouncer,
    price_debounce: Debouncer,
}

impl EstimateSession {
    pub fn new(catalog: Catalog) -> Self {
        EstimateSession {
            catalog,
            length_mm: 0.0,
            width_mm: 0.0,
            height_mm: 0.0,
            default_board: None,
            back_panel_board: None,
            edge_band: None,
            components: Vec::new(),
            accessories: Vec::new(),
            labor_cost: 0.0,
            profit_margin_percent: 0.0,
            dimension_debounce: Debouncer::new(),
            price_debounce: Debouncer::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Swap in a fresh catalog snapshot (how the backing store delivers
    /// every update). The cut list and selections are kept as-is; lines
    /// whose references no longer resolve simply stop contributing.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn set_dimensions(&mut self, length_mm: f64, width_mm: f64, height_mm: f64) {
        self.length_mm = length_mm;
        self.width_mm = width_mm;
        self.height_mm = height_mm;
    }

    pub fn select_default_board(&mut self, id: Option<Uuid>) {
        self.default_board = id;
    }

    pub fn select_back_panel_board(&mut self, id: Option<Uuid>) {
        self.back_panel_board = id;
    }

    pub fn select_edge_band(&mut self, id: Option<Uuid>) {
        self.edge_band = id;
    }

    pub fn set_labor_cost(&mut self, cost: f64) {
        self.labor_cost = cost;
    }

    pub fn set_profit_margin(&mut self, percent: f64) {
        self.profit_margin_percent = percent;
    }

    /// Board thickness for the formula context: parsed from the default
    /// board's notes, 18 mm when absent.
    pub fn thickness_mm(&self) -> f64 {
        self.default_board
            .and_then(|id| self.catalog.material(id))
            .and_then(|board| board.thickness_mm())
            .unwrap_or(DEFAULT_BOARD_THICKNESS_MM)
    }

    /// The formula context for the current inputs
    pub fn dim_context(&self) -> DimContext {
        DimContext {
            l: self.length_mm,
            w: self.width_mm,
            h: self.height_mm,
            t: self.thickness_mm(),
        }
    }

    // ------------------------------------------------------------------
    // Cut list
    // ------------------------------------------------------------------

    /// Rebuild the cut list from a product template (replaces the whole
    /// list) and derive dimensions right away. Unknown template ids are
    /// a no-op.
    pub fn apply_product_template(&mut self, template_id: Uuid) {
        let Some(template) = self.catalog.product_template(template_id) else {
            return;
        };
        self.components = expand_product(template, &self.catalog);
        self.refresh_derived_dimensions();
    }

    /// Append a component group ("cụm") N times. Unknown group ids are a
    /// no-op; `instance_qty` of zero appends qty-0 lines the aggregator
    /// will skip.
    pub fn insert_group(&mut self, group_id: Uuid, instance_qty: u32) {
        let Some(group) = self.catalog.group_template(group_id).cloned() else {
            return;
        };
        expand_group(&mut self.components, &group, instance_qty, &self.catalog);
        self.refresh_derived_dimensions();
    }

    /// Append a single part from the component library.
    pub fn add_component(&mut self, component_def_id: Uuid, qty: u32) {
        if let Some(def) = self.catalog.component(component_def_id) {
            self.components.push(ProductComponent::from_def(def, qty));
            self.refresh_derived_dimensions();
        }
    }

    pub fn remove_component(&mut self, line_id: Uuid) -> Option<ProductComponent> {
        let idx = self.components.iter().position(|c| c.id == line_id)?;
        Some(self.components.remove(idx))
    }

    /// Direct length edit on one line; flips it to Manual.
    pub fn set_component_length(&mut self, line_id: Uuid, length_mm: f64) -> bool {
        match self.components.iter_mut().find(|c| c.id == line_id) {
            Some(component) => {
                component.set_length_mm(length_mm);
                true
            }
            None => false,
        }
    }

    /// Direct width edit on one line; flips it to Manual.
    pub fn set_component_width(&mut self, line_id: Uuid, width_mm: f64) -> bool {
        match self.components.iter_mut().find(|c| c.id == line_id) {
            Some(component) => {
                component.set_width_mm(width_mm);
                true
            }
            None => false,
        }
    }

    /// Direct quantity edit on one line; flips it to Manual.
    pub fn set_component_qty(&mut self, line_id: Uuid, qty: u32) -> bool {
        match self.components.iter_mut().find(|c| c.id == line_id) {
            Some(component) => {
                component.set_qty(qty);
                true
            }
            None => false,
        }
    }

    /// Free rename; unlinks the line from its catalog definition.
    pub fn rename_component(&mut self, line_id: Uuid, name: impl Into<String>) -> bool {
        match self.components.iter_mut().find(|c| c.id == line_id) {
            Some(component) => {
                component.rename(name);
                true
            }
            None => false,
        }
    }

    /// Board override for one line (`None` returns it to the default
    /// resolution). This is a material choice, not a dimension edit, so
    /// it does not flip the line to Manual.
    pub fn set_component_material(&mut self, line_id: Uuid, material_id: Option<Uuid>) -> bool {
        match self.components.iter_mut().find(|c| c.id == line_id) {
            Some(component) => {
                component.material_id = material_id;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Accessories
    // ------------------------------------------------------------------

    /// Add an accessory from the material library. Adding the same
    /// accessory again accumulates quantity on the existing line instead
    /// of duplicating the row. Unknown material ids are a no-op.
    pub fn add_accessory(&mut self, material_id: Uuid, quantity: f64) {
        let Some(material) = self.catalog.material(material_id) else {
            return;
        };
        match self
            .accessories
            .iter_mut()
            .find(|a| a.material_id == material_id)
        {
            Some(line) => line.quantity += quantity,
            None => self
                .accessories
                .push(AccessoryLine::from_material(material, quantity)),
        }
    }

    pub fn remove_accessory(&mut self, material_id: Uuid) -> Option<AccessoryLine> {
        let idx = self
            .accessories
            .iter()
            .position(|a| a.material_id == material_id)?;
        Some(self.accessories.remove(idx))
    }

    // ------------------------------------------------------------------
    // Recompute pipeline
    // ------------------------------------------------------------------

    /// Refresh formula-driven dimensions on Derived lines only.
    pub fn refresh_derived_dimensions(&mut self) {
        let ctx = self.dim_context();
        recompute_derived(&mut self.components, &self.catalog, &ctx);
    }

    /// Run the full pipeline now: derive dimensions, aggregate boards,
    /// accumulate edge banding, and price.
    pub fn recompute(&mut self) -> EstimateSummary {
        self.refresh_derived_dimensions();
        self.reprice()
    }

    /// Price the current cut list without touching dimensions.
    pub fn reprice(&self) -> EstimateSummary {
        let usages = aggregate_materials(
            &self.components,
            self.default_board,
            self.back_panel_board,
            &self.catalog,
        );
        let edge_length = total_edge_length(&self.components, &self.catalog);
        let edge_material = self
            .edge_band
            .and_then(|id| self.catalog.material(id))
            .filter(|m| m.kind == MaterialKind::EdgeBand);
        price(
            &usages,
            edge_length,
            edge_material,
            &self.accessories,
            self.labor_cost,
            self.profit_margin_percent,
        )
    }

    // ------------------------------------------------------------------
    // Debounced event handling (for interactive front-ends)
    // ------------------------------------------------------------------

    /// Note a dimension-field input event at `now`. Also schedules a
    /// repricing, since new dimensions change the totals.
    pub fn notify_dimension_input(&mut self, now: Instant) {
        self.dimension_debounce.trigger(now);
        self.price_debounce.trigger(now);
    }

    /// Note a pricing-input event (materials, accessories, labor,
    /// margin, component edits) at `now`.
    pub fn notify_pricing_input(&mut self, now: Instant) {
        self.price_debounce.trigger(now);
    }

    /// Poll both debouncers at `now`, running whatever became due.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.dimension_debounce.fire_ready(now) {
            self.refresh_derived_dimensions();
            outcome.dimensions_refreshed = true;
        }
        if self.price_debounce.fire_ready(now) {
            outcome.summary = Some(self.reprice());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ComponentDef, EdgeFlags, GroupTemplate, Material, ProductTemplate};
    use std::time::Duration;

    /// Catalog matching the shop's usual setup: one body board, one thin
    /// back board, edge banding, hinges, and a one-template wardrobe.
    struct Fixture {
        catalog: Catalog,
        board_id: Uuid,
        thin_id: Uuid,
        edge_id: Uuid,
        hinge_id: Uuid,
        template_id: Uuid,
        group_id: Uuid,
    }

    fn fixture() -> Fixture {
        let mut catalog = Catalog::new();

        let board = Material::new("MDF 17mm", MaterialKind::Board, 550_000.0, "tấm")
            .with_notes("khổ 1220x2440mm, dày 17mm");
        let thin = Material::new("Ván hậu 5mm", MaterialKind::Board, 200_000.0, "tấm")
            .with_notes("1220x2440mm, dày 5mm");
        let edge = Material::new("Nẹp PVC", MaterialKind::EdgeBand, 5_000.0, "md");
        let hinge = Material::new("Bản lề giảm chấn", MaterialKind::Accessory, 15_000.0, "cái");
        let (board_id, thin_id, edge_id, hinge_id) = (board.id, thin.id, edge.id, hinge.id);
        catalog.add_material(board);
        catalog.add_material(thin);
        catalog.add_material(edge);
        catalog.add_material(hinge);

        let side = ComponentDef::new("Hông tủ")
            .with_length_formula("H")
            .with_width_formula("W/2");
        let back = ComponentDef::new("Hậu tủ")
            .with_length_formula("L")
            .with_width_formula("H");
        let shelf = ComponentDef::new("Kệ di động").with_length_formula("L - 2*t");
        let door = ComponentDef::new("Cánh tủ")
            .with_length_formula("H")
            .with_width_formula("L/2")
            .with_edges(EdgeFlags::new(true, true, true, true));
        let (side_id, back_id, shelf_id, door_id) = (side.id, back.id, shelf.id, door.id);
        catalog.add_component(side);
        catalog.add_component(back);
        catalog.add_component(shelf);
        catalog.add_component(door);

        let template = ProductTemplate::new("Tủ bếp treo")
            .with_entry(side_id, 2)
            .with_entry(back_id, 1)
            .with_entry(door_id, 2);
        let template_id = template.id;
        catalog.add_product_template(template);

        let group = GroupTemplate::new("Cụm kệ").with_entry(shelf_id, 2);
        let group_id = group.id;
        catalog.add_group_template(group);

        Fixture {
            catalog,
            board_id,
            thin_id,
            edge_id,
            hinge_id,
            template_id,
            group_id,
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        // One component "Hông tủ" ×2, L=800 W=400 H=750, board 550000đ,
        // margin 50% -> 0.30 m² -> 1 sheet -> 550000 / 825000 / 275000
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

        let mut session = EstimateSession::new(catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(board_id));
        session.apply_product_template(template_id);
        session.set_profit_margin(50.0);

        let summary = session.recompute();
        assert_eq!(session.components[0].length_mm, 750.0);
        assert_eq!(session.components[0].width_mm, 200.0);
        assert_eq!(summary.total_cost, 550_000.0);
        assert_eq!(summary.suggested_price, 825_000.0);
        assert_eq!(summary.estimated_profit, 275_000.0);
        assert!(summary.is_ready_to_save());
    }

    #[test]
    fn test_back_panel_routes_to_thin_board() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(f.board_id));
        session.select_back_panel_board(Some(f.thin_id));
        session.apply_product_template(f.template_id);

        let summary = session.recompute();
        let names: Vec<&str> = summary.breakdown.iter().map(|l| l.name.as_str()).collect();
        assert!(names.contains(&"MDF 17mm"));
        assert!(names.contains(&"Ván hậu 5mm"));
    }

    #[test]
    fn test_edge_banding_priced() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(f.board_id));
        session.select_edge_band(Some(f.edge_id));
        session.apply_product_template(f.template_id);

        let summary = session.recompute();
        // doors: 2 lines? no - one line qty 2, banded on all 4 edges:
        // (750×2 + 400×2) × 2 = 4600 mm = 4.6 m × 5000đ = 23000đ
        let edge_line = summary
            .breakdown
            .iter()
            .find(|l| l.name == "Nẹp PVC")
            .expect("edge banding line");
        assert_eq!(edge_line.cost, 23_000.0);
    }

    #[test]
    fn test_group_insertion_appends() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(f.board_id));
        session.apply_product_template(f.template_id);
        let before = session.components.len();

        session.insert_group(f.group_id, 3);
        assert_eq!(session.components.len(), before + 1);
        let shelf = session.components.last().unwrap();
        assert_eq!(shelf.qty, 6);
        assert_eq!(shelf.length_mm, 766.0); // 800 - 2×17
    }

    #[test]
    fn test_accessory_accumulates() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.add_accessory(f.hinge_id, 2.0);
        session.add_accessory(f.hinge_id, 2.0);

        assert_eq!(session.accessories.len(), 1);
        assert_eq!(session.accessories[0].quantity, 4.0);

        session.add_accessory(Uuid::new_v4(), 9.0); // unknown: no-op
        assert_eq!(session.accessories.len(), 1);
    }

    #[test]
    fn test_thickness_from_default_board_notes() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        assert_eq!(session.thickness_mm(), DEFAULT_BOARD_THICKNESS_MM);

        session.select_default_board(Some(f.board_id));
        assert_eq!(session.thickness_mm(), 17.0);
    }

    #[test]
    fn test_manual_edit_survives_dimension_change() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(f.board_id));
        session.apply_product_template(f.template_id);
        session.recompute();

        let line_id = session.components[0].id;
        session.set_component_length(line_id, 720.0);

        session.set_dimensions(900.0, 450.0, 2000.0);
        session.recompute();

        assert_eq!(session.components[0].length_mm, 720.0);
        // other lines followed the new dimensions
        assert_eq!(session.components[1].length_mm, 900.0);
    }

    #[test]
    fn test_template_replaces_but_group_appends() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(f.board_id));
        session.apply_product_template(f.template_id);
        session.insert_group(f.group_id, 1);
        let with_group = session.components.len();

        session.apply_product_template(f.template_id);
        assert_eq!(session.components.len(), with_group - 1);
    }

    #[test]
    fn test_unknown_template_is_noop() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.apply_product_template(Uuid::new_v4());
        assert!(session.components.is_empty());
        session.insert_group(Uuid::new_v4(), 2);
        assert!(session.components.is_empty());
    }

    #[test]
    fn test_debounced_ticks() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.select_default_board(Some(f.board_id));
        session.apply_product_template(f.template_id);

        let start = Instant::now();
        session.set_dimensions(800.0, 400.0, 750.0);
        session.notify_dimension_input(start);

        // too early: nothing fires
        let outcome = session.tick(start + Duration::from_millis(100));
        assert!(!outcome.dimensions_refreshed);
        assert!(outcome.summary.is_none());

        // typing again restarts the window
        session.set_dimensions(800.0, 400.0, 760.0);
        session.notify_dimension_input(start + Duration::from_millis(200));
        let outcome = session.tick(start + Duration::from_millis(400));
        assert!(!outcome.dimensions_refreshed);

        let outcome = session.tick(start + Duration::from_millis(600));
        assert!(outcome.dimensions_refreshed);
        let summary = outcome.summary.expect("repricing fired with dimensions");
        assert!(summary.total_cost > 0.0);
        assert_eq!(session.components[0].length_mm, 760.0);

        // consumed: a later tick is quiet
        let outcome = session.tick(start + Duration::from_millis(900));
        assert!(!outcome.dimensions_refreshed);
        assert!(outcome.summary.is_none());
    }

    #[test]
    fn test_edge_selection_must_be_edge_band() {
        let f = fixture();
        let mut session = EstimateSession::new(f.catalog);
        session.set_dimensions(800.0, 400.0, 750.0);
        session.select_default_board(Some(f.board_id));
        session.select_edge_band(Some(f.board_id)); // wrong kind
        session.apply_product_template(f.template_id);

        let summary = session.recompute();
        assert!(summary.breakdown.iter().all(|l| l.name != "MDF 17mm" || l.cost > 0.0));
        // no edge-banding line was added for a board material
        assert!(!summary.breakdown.iter().any(|l| l.reason.contains("đ/m")));
    }
}
