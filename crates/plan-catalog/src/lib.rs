//! # Plan Catalog
//!
//! 目錄來源：提供計劃計算所需的一致性快照

pub mod json;
pub mod memory;
pub mod service;

// Re-export 主要類型
pub use json::JsonCatalog;
pub use memory::{InMemoryCatalog, NewMaterial, NewProduct};
pub use service::SuggestionService;

use plan_core::CatalogSnapshot;
use std::sync::Arc;

/// 目錄快照來源
///
/// 實作者必須回傳某一時刻的一致性複本；無法保證一致時回傳
/// `PlanError::SnapshotUnavailable`，計劃計算不會開始。
pub trait CatalogSource {
    /// 讀取目錄快照
    fn snapshot(&self) -> plan_core::Result<CatalogSnapshot>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn snapshot(&self) -> plan_core::Result<CatalogSnapshot> {
        (**self).snapshot()
    }
}

impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    fn snapshot(&self) -> plan_core::Result<CatalogSnapshot> {
        (**self).snapshot()
    }
}

impl CatalogSource for CatalogSnapshot {
    fn snapshot(&self) -> plan_core::Result<CatalogSnapshot> {
        Ok(self.clone())
    }
}
