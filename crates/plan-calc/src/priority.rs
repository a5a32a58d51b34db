//! 產品優先順序

use plan_core::Product;
use std::cmp::Ordering;

/// 優先順序計算器
///
/// 單價高者優先；單價相同時依產品 ID 由小到大，
/// 使結果不受輸入順序影響。此順序同時是扣料順序與輸出順序。
pub struct PriorityOrdering;

impl PriorityOrdering {
    /// 依優先順序排列產品
    pub fn sort(products: &[Product]) -> Vec<&Product> {
        let mut ordered: Vec<&Product> = products.iter().collect();
        ordered.sort_by(|a, b| Self::compare(a, b));
        ordered
    }

    /// 比較兩個產品的優先順序（Less 表示 `a` 先處理）
    pub fn compare(a: &Product, b: &Product) -> Ordering {
        b.price.cmp(&a.price).then_with(|| a.id.cmp(&b.id))
    }
}
