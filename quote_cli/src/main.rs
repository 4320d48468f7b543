//! # Woodquote CLI Application
//!
//! Terminal front-end for the furniture estimation engine. Prompts for
//! the dimensions of a hanging kitchen cabinet against a built-in demo
//! catalog, prints the cut list and cost breakdown, and dumps the result
//! as JSON for scripting.

use std::io::{self, BufRead, Write};

use once_cell::sync::Lazy;
use uuid::Uuid;

use quote_core::catalog::{
    Catalog, ComponentDef, EdgeFlags, Material, MaterialKind, ProductTemplate,
};
use quote_core::parse::parse_decimal;
use quote_core::session::EstimateSession;

/// Demo catalog: one hanging kitchen cabinet with the shop's usual
/// materials. Real deployments receive the catalog from the
/// configuration store instead.
struct DemoCatalog {
    catalog: Catalog,
    board_id: Uuid,
    back_board_id: Uuid,
    edge_id: Uuid,
    hinge_id: Uuid,
    template_id: Uuid,
}

static DEMO: Lazy<DemoCatalog> = Lazy::new(|| {
    let mut catalog = Catalog::new();

    let board = Material::new("MDF lõi xanh 17mm", MaterialKind::Board, 550_000.0, "tấm")
        .with_notes("An Cường, khổ 1220x2440mm, dày 17mm");
    let back_board = Material::new("Ván hậu 5mm", MaterialKind::Board, 200_000.0, "tấm")
        .with_notes("1220x2440mm, dày 5mm");
    let edge = Material::new("Nẹp cạnh PVC", MaterialKind::EdgeBand, 5_000.0, "md");
    let hinge = Material::new("Bản lề giảm chấn", MaterialKind::Accessory, 15_000.0, "cái");
    let (board_id, back_board_id, edge_id, hinge_id) = (board.id, back_board.id, edge.id, hinge.id);
    catalog.add_material(board);
    catalog.add_material(back_board);
    catalog.add_material(edge);
    catalog.add_material(hinge);

    let side = ComponentDef::new("Hông tủ")
        .with_length_formula("H")
        .with_width_formula("W");
    let top_bottom = ComponentDef::new("Nóc + đáy")
        .with_length_formula("L - 2*t")
        .with_width_formula("W");
    let back = ComponentDef::new("Hậu tủ")
        .with_length_formula("L")
        .with_width_formula("H");
    let door = ComponentDef::new("Cánh tủ")
        .with_length_formula("H")
        .with_width_formula("L/2")
        .with_edges(EdgeFlags::new(true, true, true, true));
    let shelf = ComponentDef::new("Kệ giữa")
        .with_length_formula("L - 2*t")
        .with_width_formula("W - t");

    let template = ProductTemplate::new("Tủ bếp treo 2 cánh")
        .with_entry(side.id, 2)
        .with_entry(top_bottom.id, 2)
        .with_entry(back.id, 1)
        .with_entry(door.id, 2)
        .with_entry(shelf.id, 1);
    let template_id = template.id;

    catalog.add_component(side);
    catalog.add_component(top_bottom);
    catalog.add_component(back);
    catalog.add_component(door);
    catalog.add_component(shelf);
    catalog.add_product_template(template);

    DemoCatalog {
        catalog,
        board_id,
        back_board_id,
        edge_id,
        hinge_id,
        template_id,
    }
});

/// Prompt for a number; accepts Vietnamese format ("1.220,5") and falls
/// back to the default on empty/invalid input.
fn prompt_number(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    parse_decimal(&input).unwrap_or(default)
}

fn main() {
    println!("Woodquote CLI - Furniture Cost Estimator");
    println!("========================================");
    println!();
    println!("Demo: hanging kitchen cabinet, MDF body + 5mm back panel.");
    println!();

    let length = prompt_number("Chiều dài L (mm) [800]: ", 800.0);
    let width = prompt_number("Chiều sâu W (mm) [400]: ", 400.0);
    let height = prompt_number("Chiều cao H (mm) [750]: ", 750.0);
    let margin = prompt_number("Lợi nhuận (%) [50]: ", 50.0);

    let mut session = EstimateSession::new(DEMO.catalog.clone());
    session.set_dimensions(length, width, height);
    session.select_default_board(Some(DEMO.board_id));
    session.select_back_panel_board(Some(DEMO.back_board_id));
    session.select_edge_band(Some(DEMO.edge_id));
    session.apply_product_template(DEMO.template_id);
    session.add_accessory(DEMO.hinge_id, 4.0);
    session.set_labor_cost(300_000.0);
    session.set_profit_margin(margin);

    let summary = session.recompute();

    println!();
    println!("═══════════════════════════════════════");
    println!("  CUT LIST");
    println!("═══════════════════════════════════════");
    for component in &session.components {
        println!(
            "  {:<12} {:>6.0} x {:>5.0} mm  x{}",
            component.name, component.length_mm, component.width_mm, component.qty
        );
    }

    println!();
    println!("═══════════════════════════════════════");
    println!("  COST BREAKDOWN");
    println!("═══════════════════════════════════════");
    for line in &summary.breakdown {
        println!("  {:<22} {:>12.0} đ   ({})", line.name, line.cost, line.reason);
    }
    println!();
    println!("  Tổng chi phí:    {:>12.0} đ", summary.total_cost);
    println!("  Giá đề xuất:     {:>12.0} đ", summary.suggested_price);
    println!("  Lợi nhuận dự kiến: {:>10.0} đ", summary.estimated_profit);
    println!("═══════════════════════════════════════");

    if !summary.is_ready_to_save() {
        println!("  (Chưa đủ dữ liệu để lưu báo giá)");
    }

    println!();
    println!("JSON Output (for scripting):");
    if let Ok(json) = serde_json::to_string_pretty(&summary) {
        println!("{}", json);
    }
}
