//! # Production Planner
//!
//! 生產建議引擎：依目錄快照計算在現有原物料庫存下，
//! 各產品依單價優先可生產的數量與總價值。

pub mod logging;

pub use rust_decimal::Decimal;

pub use plan_calc::{
    plan, Allocation, PlanResult, PlanWarning, PriorityOrdering, ProductIssue, ProductionPlanner,
    StockLedger, WarningSeverity,
};
pub use plan_catalog::{CatalogSource, InMemoryCatalog, JsonCatalog, NewMaterial, NewProduct, SuggestionService};
pub use plan_core::{
    BomEntry, CatalogSnapshot, DuplicateEntryPolicy, Material, MaterialId, PlanError, PlannerConfig,
    Product, ProductId, ProductionSuggestion, Result,
};
