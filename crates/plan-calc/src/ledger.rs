//! 庫存分帳（單次計算的剩餘庫存工作複本）

use plan_core::{CatalogSnapshot, MaterialId};
use std::collections::BTreeMap;

use crate::{MaterialRequirements, ProductIssue};

/// 庫存分帳
///
/// 每次計算從快照建立一份，計算結束即丟棄；不跨計算共用。
#[derive(Debug, Clone)]
pub struct StockLedger {
    /// 剩餘庫存
    remaining: BTreeMap<MaterialId, u64>,

    /// 已扣減數量
    consumed: BTreeMap<MaterialId, u64>,
}

impl StockLedger {
    /// 從快照建立分帳
    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Self {
        Self {
            remaining: snapshot.stock_levels(),
            consumed: BTreeMap::new(),
        }
    }

    /// 分帳中是否有此原物料
    pub fn contains(&self, material_id: MaterialId) -> bool {
        self.remaining.contains_key(&material_id)
    }

    /// 剩餘庫存
    pub fn remaining(&self, material_id: MaterialId) -> Option<u64> {
        self.remaining.get(&material_id).copied()
    }

    /// 已扣減數量
    pub fn consumed(&self, material_id: MaterialId) -> u64 {
        self.consumed.get(&material_id).copied().unwrap_or(0)
    }

    /// 扣減生產 `quantity` 單位所需的原物料
    ///
    /// 全部檢查通過才會扣減，任何一項失敗則分帳保持不變。
    /// 回傳各原物料的扣減數量。
    pub fn commit(
        &mut self,
        requirements: &MaterialRequirements,
        quantity: u64,
    ) -> Result<BTreeMap<MaterialId, u64>, ProductIssue> {
        let mut consumption = BTreeMap::new();

        for (material_id, per_unit) in requirements.iter() {
            let required = per_unit
                .checked_mul(quantity)
                .ok_or(ProductIssue::QuantityOverflow(material_id))?;
            let available = self
                .remaining(material_id)
                .ok_or(ProductIssue::UnknownMaterial(material_id))?;

            if required > available {
                return Err(ProductIssue::InsufficientStock {
                    material_id,
                    required,
                    available,
                });
            }
            consumption.insert(material_id, required);
        }

        for (material_id, required) in &consumption {
            if let Some(remaining) = self.remaining.get_mut(material_id) {
                *remaining -= required;
            }
            *self.consumed.entry(*material_id).or_insert(0) += required;
        }

        Ok(consumption)
    }
}
