//! # Material Aggregation
//!
//! Turns a cut list into per-material consumption: total cut area, whole
//! sheets to buy, and the board cost for each material actually used.
//! Also accumulates the linear edge-banding length across the list.
//!
//! Aggregation never fails - lines that cannot contribute (blank name,
//! non-positive geometry, zero quantity, unresolvable material) are
//! skipped, because a partial estimate is more useful than none.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::aggregate::aggregate_materials;
//! use quote_core::catalog::{Catalog, Material, MaterialKind};
//! use quote_core::component::ProductComponent;
//! use quote_core::catalog::ComponentDef;
//!
//! let mut catalog = Catalog::new();
//! let board = Material::new("MDF 17mm", MaterialKind::Board, 550_000.0, "tấm");
//! let board_id = board.id;
//! catalog.add_material(board);
//!
//! let def = ComponentDef::new("Hông tủ");
//! let mut line = ProductComponent::from_def(&def, 2);
//! line.length_mm = 750.0;
//! line.width_mm = 200.0;
//!
//! let usages = aggregate_materials(&[line], Some(board_id), None, &catalog);
//! assert_eq!(usages.len(), 1);
//! assert_eq!(usages[0].sheets_needed, 1);
//! assert_eq!(usages[0].cost, 550_000.0);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::component::ProductComponent;
use crate::units::{Mm, SquareMeters, SquareMm};

/// Name marker for back panels: any line whose name contains "hậu"
/// (case-insensitive) is cut from the back-panel board when one is
/// configured, since backs are typically a thinner, cheaper sheet.
const BACK_PANEL_MARKER: &str = "hậu";

/// Consumption of one board material across the whole cut list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub material_id: Uuid,
    pub material_name: String,
    /// Raw summed cut area, before rounding up to whole sheets
    pub total_area_m2: f64,
    /// Whole sheets to purchase
    pub sheets_needed: u32,
    /// Unit price of one sheet, copied from the catalog at aggregation time
    pub sheet_price: f64,
    pub cost: f64,
}

impl MaterialUsage {
    /// Human-readable explanation of how the cost was computed
    pub fn reason(&self) -> String {
        format!(
            "{} tấm × {} đ ({:.2} m²)",
            self.sheets_needed, self.sheet_price, self.total_area_m2
        )
    }
}

/// Group the cut list by effective board material and convert cut area
/// into whole sheets and cost.
///
/// Effective material per line, in order: the line's own override, the
/// back-panel board when the line name carries the "hậu" marker and a
/// back-panel board is configured, the default board otherwise. A line
/// whose effective material is unknown to the catalog contributes
/// nothing. Results keep first-use order for stable table rendering.
pub fn aggregate_materials(
    components: &[ProductComponent],
    default_board: Option<Uuid>,
    back_panel_board: Option<Uuid>,
    catalog: &Catalog,
) -> Vec<MaterialUsage> {
    let mut areas: Vec<(Uuid, SquareMm)> = Vec::new();

    for component in components {
        if component.name.trim().is_empty()
            || component.length_mm <= 0.0
            || component.width_mm <= 0.0
            || component.qty == 0
        {
            continue;
        }
        let Some(material_id) = effective_material(component, default_board, back_panel_board)
        else {
            continue;
        };
        if catalog.material(material_id).is_none() {
            continue;
        }

        let area = SquareMm(component.length_mm * component.width_mm * component.qty as f64);
        match areas.iter_mut().find(|(id, _)| *id == material_id) {
            Some((_, total)) => *total = *total + area,
            None => areas.push((material_id, area)),
        }
    }

    areas
        .into_iter()
        .filter_map(|(material_id, area)| {
            let material = catalog.material(material_id)?;
            let total_area: SquareMeters = area.into();
            let sheet_area = material.sheet_size().area_m2();
            let sheets_needed = (total_area.0 / sheet_area).ceil() as u32;
            if sheets_needed == 0 {
                return None;
            }
            Some(MaterialUsage {
                material_id,
                material_name: material.name.clone(),
                total_area_m2: total_area.0,
                sheets_needed,
                sheet_price: material.price,
                cost: sheets_needed as f64 * material.price,
            })
        })
        .collect()
}

fn effective_material(
    component: &ProductComponent,
    default_board: Option<Uuid>,
    back_panel_board: Option<Uuid>,
) -> Option<Uuid> {
    if component.material_id.is_some() {
        return component.material_id;
    }
    if back_panel_board.is_some() && component.name.to_lowercase().contains(BACK_PANEL_MARKER) {
        return back_panel_board;
    }
    default_board
}

/// Total linear edge-banding length across the cut list, in millimeters.
///
/// Each line contributes `length × qty` once per banded long edge and
/// `width × qty` once per banded short edge, as flagged on its catalog
/// definition. Unlinked lines (no resolvable definition) contribute
/// nothing.
pub fn total_edge_length(components: &[ProductComponent], catalog: &Catalog) -> Mm {
    let mut total = Mm(0.0);
    for component in components {
        let Some(def) = component.component_id.and_then(|id| catalog.component(id)) else {
            continue;
        };
        let qty = component.qty as f64;
        total = total
            + Mm(component.length_mm * qty * def.edges.banded_long_edges() as f64)
            + Mm(component.width_mm * qty * def.edges.banded_short_edges() as f64);
    }
    total
}
