//! 生產建議查詢服務
//!
//! 對外的唯一讀取操作：每次查詢都重新擷取快照並計算，不快取結果。

use plan_calc::{PlanResult, ProductionPlanner};
use plan_core::{PlannerConfig, ProductionSuggestion, Result};

use crate::CatalogSource;

/// 生產建議查詢服務
pub struct SuggestionService<S> {
    source: S,
    planner: ProductionPlanner,
}

impl<S: CatalogSource> SuggestionService<S> {
    /// 以預設配置創建服務
    pub fn new(source: S) -> Self {
        Self {
            source,
            planner: ProductionPlanner::default(),
        }
    }

    /// 建構器模式：設置引擎配置
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.planner = ProductionPlanner::new(config);
        self
    }

    /// 查詢生產建議
    ///
    /// 快照取得失敗時回傳錯誤且不進行計算；沒有可生產的產品時回傳空列表。
    pub fn suggest(&self) -> Result<Vec<ProductionSuggestion>> {
        Ok(self.suggest_detailed()?.suggestions())
    }

    /// 查詢生產建議（含分配明細與警告）
    pub fn suggest_detailed(&self) -> Result<PlanResult> {
        let snapshot = self.source.snapshot().map_err(|e| {
            tracing::error!("無法取得目錄快照: {}", e);
            e
        })?;

        Ok(self.planner.plan_detailed(&snapshot))
    }

    /// 查詢生產建議並輸出為 JSON 陣列
    pub fn suggest_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.suggest()?)?)
    }

    /// 獲取目錄來源引用
    pub fn source(&self) -> &S {
        &self.source
    }
}
