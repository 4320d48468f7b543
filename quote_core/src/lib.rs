//! # quote_core - Furniture Cost Estimation Engine
//!
//! `quote_core` is the computational heart of Woodquote, turning a
//! product's dimensions and a library of parametrized components into a
//! concrete cut list, per-material sheet consumption, and a priced
//! estimate. All inputs and outputs are JSON-serializable, making the
//! engine easy to drive from any front-end or script.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: pure functions over explicit inputs; the only
//!   mutable state is the [`session::EstimateSession`] you create
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Degrade, don't fail**: bad formulas evaluate to zero, dangling
//!   catalog references are skipped - a partial estimate beats an error
//! - **No I/O in the pipeline**: only [`file_io`] touches the disk
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::catalog::{Catalog, ComponentDef, Material, MaterialKind, ProductTemplate};
//! use quote_core::session::EstimateSession;
//!
//! // Build a catalog (normally delivered by the configuration store)
//! let mut catalog = Catalog::new();
//! let board = Material::new("MDF 17mm", MaterialKind::Board, 550_000.0, "tấm")
//!     .with_notes("khổ 1220x2440mm, dày 17mm");
//! let board_id = board.id;
//! catalog.add_material(board);
//!
//! let side = ComponentDef::new("Hông tủ")
//!     .with_length_formula("H")
//!     .with_width_formula("W");
//! let side_id = side.id;
//! catalog.add_component(side);
//!
//! let template = ProductTemplate::new("Tủ đầu giường").with_entry(side_id, 2);
//! let template_id = template.id;
//! catalog.add_product_template(template);
//!
//! // Estimate one piece
//! let mut session = EstimateSession::new(catalog);
//! session.set_dimensions(500.0, 400.0, 550.0);
//! session.select_default_board(Some(board_id));
//! session.apply_product_template(template_id);
//! session.set_profit_margin(40.0);
//!
//! let summary = session.recompute();
//! assert!(summary.is_ready_to_save());
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Materials, component definitions, and templates
//! - [`formula`] - Sandboxed dimension-formula evaluator (L, W, H, t)
//! - [`component`] - Cut-list lines, expansion, Derived/Manual state
//! - [`aggregate`] - Per-material sheet consumption and edge banding
//! - [`pricing`] - Cost breakdown, suggested price, profit
//! - [`session`] - The working state of one open estimate
//! - [`debounce`] - Input coalescing for interactive front-ends
//! - [`project`] - Saved-estimate snapshots
//! - [`file_io`] - Atomic saves and file locking
//! - [`assist`] - Wire contract for the external AI assistant
//! - [`parse`] - Locale-aware numbers and notes parsing
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod aggregate;
pub mod assist;
pub mod catalog;
pub mod component;
pub mod debounce;
pub mod errors;
pub mod file_io;
pub mod formula;
pub mod parse;
pub mod pricing;
pub mod project;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{Catalog, ComponentDef, GroupTemplate, Material, MaterialKind, ProductTemplate};
pub use component::{DimState, ProductComponent};
pub use errors::{EstimateError, EstimateResult};
pub use file_io::{load_project, save_project, FileLock};
pub use pricing::{AccessoryLine, CostLine, EstimateSummary};
pub use project::{EstimateInput, Project, ProjectMetadata};
pub use session::EstimateSession;
