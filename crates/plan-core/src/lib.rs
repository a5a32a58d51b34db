//! # Plan Core
//!
//! 生產建議的核心資料模型與類型定義

pub mod config;
pub mod material;
pub mod product;
pub mod snapshot;
pub mod suggestion;

// Re-export 主要類型
pub use config::{DuplicateEntryPolicy, PlannerConfig};
pub use material::{Material, MaterialId};
pub use product::{BomEntry, MaterialRef, Product, ProductId};
pub use snapshot::CatalogSnapshot;
pub use suggestion::ProductionSuggestion;

/// 生產計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("找不到原物料: {0}")]
    MaterialNotFound(MaterialId),

    #[error("找不到產品: {0}")]
    ProductNotFound(ProductId),

    #[error("原物料 ID 重複: {0}")]
    DuplicateMaterial(MaterialId),

    #[error("產品 ID 重複: {0}")]
    DuplicateProduct(ProductId),

    #[error("原物料 {material_id} 仍被產品 {product_id} 使用")]
    MaterialInUse {
        material_id: MaterialId,
        product_id: ProductId,
    },

    #[error("產品 {product_id} 的用料 {material_id} 無效: {reason}")]
    InvalidBomEntry {
        product_id: ProductId,
        material_id: MaterialId,
        reason: String,
    },

    #[error("無法取得目錄快照: {0}")]
    SnapshotUnavailable(String),

    #[error("目錄無法存取: {0}")]
    CatalogUnavailable(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
