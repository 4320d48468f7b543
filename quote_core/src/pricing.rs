//! # Pricing
//!
//! Combines board consumption, edge banding, accessories, and labor into
//! the numbers the customer sees: total cost, suggested sale price, and
//! estimated profit.
//!
//! Accumulation is plain f64 all the way through; only the three headline
//! figures are rounded (to whole đồng) at the very end.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::pricing::{price, AccessoryLine};
//! use quote_core::units::Mm;
//!
//! let summary = price(&[], Mm(0.0), None, &[], 200_000.0, 50.0);
//! assert_eq!(summary.total_cost, 200_000.0);
//! assert_eq!(summary.suggested_price, 300_000.0);
//! assert_eq!(summary.estimated_profit, 100_000.0);
//! assert!(summary.is_ready_to_save());
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::MaterialUsage;
use crate::catalog::Material;
use crate::units::{Currency, Meters, Mm};

/// One accessory on the estimate (hinges, rails, handles...).
///
/// Adding the same accessory twice accumulates `quantity` on the existing
/// line instead of duplicating the row - see
/// [`crate::session::EstimateSession::add_accessory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryLine {
    pub material_id: Uuid,
    pub name: String,
    pub unit: String,
    pub price: f64,
    pub quantity: f64,
}

impl AccessoryLine {
    pub fn from_material(material: &Material, quantity: f64) -> Self {
        AccessoryLine {
            material_id: material.id,
            name: material.name.clone(),
            unit: material.unit.clone(),
            price: material.price,
            quantity,
        }
    }

    pub fn cost(&self) -> f64 {
        self.quantity * self.price
    }
}

/// One line of the cost breakdown shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub name: String,
    pub cost: f64,
    pub reason: String,
}

/// The computed estimate: breakdown plus headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub breakdown: Vec<CostLine>,
    /// Total production cost, rounded to whole đồng
    pub total_cost: f64,
    /// `total_cost × (1 + margin/100)`, rounded to whole đồng
    pub suggested_price: f64,
    /// `suggested_price − total_cost`, rounded to whole đồng
    pub estimated_profit: f64,
}

impl EstimateSummary {
    /// Whether this result is worth persisting. A non-positive total is
    /// not an error - it just means there is nothing to sell yet, and
    /// the save action stays disabled.
    pub fn is_ready_to_save(&self) -> bool {
        self.total_cost > 0.0
    }
}

/// Price the estimate.
///
/// - Board cost: one breakdown line per [`MaterialUsage`].
/// - Edge banding: `(length / 1000) × price-per-meter`, only when some
///   edge length exists and an edge material is configured.
/// - Accessories: one line each, zero-cost lines skipped.
/// - Labor: its own line when positive.
pub fn price(
    usages: &[MaterialUsage],
    edge_length: Mm,
    edge_material: Option<&Material>,
    accessories: &[AccessoryLine],
    labor_cost: f64,
    profit_margin_percent: f64,
) -> EstimateSummary {
    let mut breakdown = Vec::new();
    let mut total = Currency(0.0);

    for usage in usages {
        breakdown.push(CostLine {
            name: usage.material_name.clone(),
            cost: usage.cost,
            reason: usage.reason(),
        });
        total = total + Currency(usage.cost);
    }

    if edge_length.0 > 0.0 {
        if let Some(material) = edge_material {
            let meters: Meters = edge_length.into();
            let cost = meters.0 * material.price;
            breakdown.push(CostLine {
                name: material.name.clone(),
                cost,
                reason: format!("{:.1} m × {} đ/m", meters.0, material.price),
            });
            total = total + Currency(cost);
        }
    }

    for accessory in accessories {
        let cost = accessory.cost();
        if cost == 0.0 {
            continue;
        }
        breakdown.push(CostLine {
            name: accessory.name.clone(),
            cost,
            reason: format!("{} {} × {} đ", accessory.quantity, accessory.unit, accessory.price),
        });
        total = total + Currency(cost);
    }

    if labor_cost > 0.0 {
        breakdown.push(CostLine {
            name: "Nhân công".to_string(),
            cost: labor_cost,
            reason: "gia công + lắp đặt".to_string(),
        });
        total = total + Currency(labor_cost);
    }

    let suggested = total * (1.0 + profit_margin_percent / 100.0);
    let profit = suggested - total;

    EstimateSummary {
        breakdown,
        total_cost: total.rounded(),
        suggested_price: suggested.rounded(),
        estimated_profit: profit.rounded(),
    }
}
