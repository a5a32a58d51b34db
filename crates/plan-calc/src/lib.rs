//! # Production Planning Engine
//!
//! 依單價優先的貪婪式生產建議計算引擎

pub mod ledger;
pub mod planner;
pub mod priority;
pub mod requirements;

// Re-export 主要類型
pub use ledger::StockLedger;
pub use planner::ProductionPlanner;
pub use priority::PriorityOrdering;
pub use requirements::{FeasibilityCalculator, FeasibleQuantity, MaterialRequirements, ProductIssue};

use plan_core::{CatalogSnapshot, MaterialId, Product, ProductId, ProductionSuggestion};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 以預設配置計算生產建議
pub fn plan(snapshot: &CatalogSnapshot) -> Vec<ProductionSuggestion> {
    ProductionPlanner::default().plan(snapshot)
}

/// 計劃計算結果
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// 本次計算ID
    pub run_id: uuid::Uuid,

    /// 使用的快照版本
    pub snapshot_version: u64,

    /// 依優先順序排列的分配結果（數量皆大於 0）
    pub allocations: Vec<Allocation>,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            snapshot_version: 0,
            allocations: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 對外輸出的生產建議
    pub fn suggestions(&self) -> Vec<ProductionSuggestion> {
        self.allocations.iter().map(Allocation::to_suggestion).collect()
    }

    /// 計劃總價值
    pub fn total_value(&self) -> Decimal {
        self.allocations.iter().map(|a| a.total_value).sum()
    }

    /// 計劃總生產數量
    pub fn total_units(&self) -> u64 {
        self.allocations.iter().map(|a| a.quantity).sum()
    }

    /// 沒有任何可生產的產品
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// 指定產品的警告
    pub fn warnings_for(&self, product_id: ProductId) -> Vec<&PlanWarning> {
        self.warnings
            .iter()
            .filter(|w| w.product_id == product_id)
            .collect()
    }

    /// 是否含有錯誤等級的警告
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Error)
    }
}

/// 單一產品的分配結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub product_id: ProductId,
    pub product_name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    pub quantity: u64,

    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,

    /// 各原物料扣減的數量
    pub consumption: BTreeMap<MaterialId, u64>,

    /// 限制產量的原物料（被生產上限截斷時仍記錄庫存限制來源）
    pub limiting_material: Option<MaterialId>,

    /// 是否被單一產品生產上限截斷
    pub capped: bool,
}

impl Allocation {
    /// 轉換為對外的生產建議
    pub fn to_suggestion(&self) -> ProductionSuggestion {
        ProductionSuggestion::new(self.product_name.clone(), self.quantity, self.total_value)
    }
}

/// 計劃警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanWarning {
    pub product_id: ProductId,
    pub product_name: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(product: &Product, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            message,
            severity,
        }
    }

    pub fn info(product: &Product, message: String) -> Self {
        Self::new(product, message, WarningSeverity::Info)
    }

    pub fn warning(product: &Product, message: String) -> Self {
        Self::new(product, message, WarningSeverity::Warning)
    }

    pub fn error(product: &Product, message: String) -> Self {
        Self::new(product, message, WarningSeverity::Error)
    }

    /// 由產品資料問題產生警告
    pub fn from_issue(product: &Product, issue: &ProductIssue) -> Self {
        Self::new(product, issue.to_string(), issue.severity())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
