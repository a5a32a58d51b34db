//! 計劃引擎配置模型

use serde::{Deserialize, Serialize};

/// 生產計劃引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// 同一產品重複引用同一原物料時的處理方式
    pub duplicate_entry_policy: DuplicateEntryPolicy,

    /// 單一產品的生產上限
    /// - None: 不設上限，只受庫存限制（預設）
    /// - Some(n): 每個產品最多建議 n 單位，剩餘庫存留給後續產品
    pub max_units_per_product: Option<u64>,
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            duplicate_entry_policy: DuplicateEntryPolicy::Reject, // 預設拒絕重複用料（保守策略）
            max_units_per_product: None,
        }
    }

    /// 從 JSON 載入配置，缺少的欄位使用預設值
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置重複用料處理方式
    pub fn with_duplicate_entry_policy(mut self, policy: DuplicateEntryPolicy) -> Self {
        self.duplicate_entry_policy = policy;
        self
    }

    /// 建構器模式：設置單一產品生產上限
    pub fn with_max_units_per_product(mut self, max_units: u64) -> Self {
        self.max_units_per_product = Some(max_units);
        self
    }

    /// 套用生產上限，回傳（調整後數量, 是否被截斷）
    pub fn cap_quantity(&self, quantity: u64) -> (u64, bool) {
        match self.max_units_per_product {
            Some(max_units) if quantity > max_units => (max_units, true),
            _ => (quantity, false),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 重複用料處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateEntryPolicy {
    /// 拒絕：該產品排除於計劃之外
    #[default]
    Reject,

    /// 合併：同一原物料的用量相加後再計算
    Sum,
}
