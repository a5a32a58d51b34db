//! 生產建議模型（計劃計算結果）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 生產建議
///
/// 對外的資料格式：`{productName, quantity, totalValue}`，
/// `totalValue` 以 JSON 數字輸出，顯示用的四捨五入由呈現層負責。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSuggestion {
    /// 產品名稱（快照當下）
    pub product_name: String,

    /// 建議生產數量
    pub quantity: u64,

    /// 總價值 = 數量 × 單價
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

impl ProductionSuggestion {
    /// 創建新的生產建議
    pub fn new(product_name: impl Into<String>, quantity: u64, total_value: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            total_value,
        }
    }
}
