//! 用料需求整理與可生產數量計算

use plan_core::{BomEntry, DuplicateEntryPolicy, MaterialId, Product};
use rust_decimal::Decimal;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::{StockLedger, WarningSeverity};

/// 產品資料問題
///
/// 只影響單一產品：該產品視為不可生產，其他產品照常計算。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductIssue {
    #[error("未設定用料清單，視為不可生產")]
    EmptyBom,

    #[error("單價不可為負數: {0}")]
    NegativePrice(Decimal),

    #[error("原物料 {material_id} 的單位用量無效: {quantity}")]
    NonPositiveQuantity { material_id: MaterialId, quantity: i64 },

    #[error("引用不存在的原物料: {0}")]
    UnknownMaterial(MaterialId),

    #[error("重複引用原物料: {0}")]
    DuplicateMaterial(MaterialId),

    #[error("原物料 {0} 的用量溢位")]
    QuantityOverflow(MaterialId),

    #[error("庫存不足：原物料 {material_id} 需要 {required}, 可用 {available}")]
    InsufficientStock {
        material_id: MaterialId,
        required: u64,
        available: u64,
    },

    #[error("總價值溢位：數量 {0}")]
    ValueOverflow(u64),
}

impl ProductIssue {
    /// 警告等級
    pub fn severity(&self) -> WarningSeverity {
        match self {
            Self::EmptyBom => WarningSeverity::Info,
            Self::NegativePrice(_)
            | Self::NonPositiveQuantity { .. }
            | Self::UnknownMaterial(_)
            | Self::DuplicateMaterial(_) => WarningSeverity::Warning,
            // 以下代表計算本身出錯，而非目錄資料問題
            Self::QuantityOverflow(_) | Self::InsufficientStock { .. } | Self::ValueOverflow(_) => {
                WarningSeverity::Error
            }
        }
    }
}

/// 整理後的單位用量（依原物料 ID 排序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRequirements {
    per_unit: BTreeMap<MaterialId, u64>,
}

impl MaterialRequirements {
    /// 驗證並整理產品的用料清單
    ///
    /// 用料先依（原物料 ID, 用量）排序再檢查，
    /// 回報的問題不受用料清單的排列順序影響。
    pub fn from_product(
        product: &Product,
        duplicate_policy: DuplicateEntryPolicy,
        is_known_material: impl Fn(MaterialId) -> bool,
    ) -> Result<Self, ProductIssue> {
        if !product.has_bom() {
            return Err(ProductIssue::EmptyBom);
        }

        let mut entries: Vec<&BomEntry> = product.materials.iter().collect();
        entries.sort_by_key(|e| (e.material_id(), e.quantity_needed));

        if let Some(entry) = entries.iter().find(|e| !e.is_valid_quantity()) {
            return Err(ProductIssue::NonPositiveQuantity {
                material_id: entry.material_id(),
                quantity: entry.quantity_needed,
            });
        }

        if let Some(entry) = entries.iter().find(|e| !is_known_material(e.material_id())) {
            return Err(ProductIssue::UnknownMaterial(entry.material_id()));
        }

        let mut per_unit = BTreeMap::new();
        for entry in entries {
            let material_id = entry.material_id();
            // 已確認為正數
            let quantity = entry.quantity_needed as u64;

            match per_unit.entry(material_id) {
                Entry::Vacant(slot) => {
                    slot.insert(quantity);
                }
                Entry::Occupied(mut slot) => match duplicate_policy {
                    DuplicateEntryPolicy::Reject => {
                        return Err(ProductIssue::DuplicateMaterial(material_id));
                    }
                    DuplicateEntryPolicy::Sum => {
                        let summed = slot
                            .get()
                            .checked_add(quantity)
                            .ok_or(ProductIssue::QuantityOverflow(material_id))?;
                        slot.insert(summed);
                    }
                },
            }
        }

        Ok(Self { per_unit })
    }

    /// 依原物料 ID 順序列出（原物料, 單位用量）
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, u64)> + '_ {
        self.per_unit.iter().map(|(id, qty)| (*id, *qty))
    }

    /// 指定原物料的單位用量
    pub fn per_unit(&self, material_id: MaterialId) -> Option<u64> {
        self.per_unit.get(&material_id).copied()
    }

    pub fn len(&self) -> usize {
        self.per_unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_unit.is_empty()
    }
}

/// 可生產數量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeasibleQuantity {
    /// 最大可生產整數數量
    pub quantity: u64,

    /// 限制產量的原物料（剩餘庫存 / 單位用量 最小者，同值取 ID 較小者）
    pub limiting_material: Option<MaterialId>,
}

/// 可生產數量計算器
pub struct FeasibilityCalculator;

impl FeasibilityCalculator {
    /// 計算可生產數量
    ///
    /// quantity = floor( min over entries of remaining / per_unit )
    ///
    /// 分帳中不存在的原物料視為剩餘 0。
    pub fn calculate(requirements: &MaterialRequirements, ledger: &StockLedger) -> FeasibleQuantity {
        let mut result = FeasibleQuantity {
            quantity: 0,
            limiting_material: None,
        };

        for (material_id, per_unit) in requirements.iter() {
            let remaining = ledger.remaining(material_id).unwrap_or(0);
            let possible = remaining / per_unit;

            if result.limiting_material.is_none() || possible < result.quantity {
                result.quantity = possible;
                result.limiting_material = Some(material_id);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{CatalogSnapshot, Material, ProductId};
    use rstest::rstest;

    fn known(ids: &'static [u64]) -> impl Fn(MaterialId) -> bool {
        move |id| ids.contains(&id.value())
    }

    fn product() -> Product {
        Product::new(ProductId(1), "Frame", Decimal::from(10))
    }

    fn ledger(stock: &[(u64, u64)]) -> StockLedger {
        let materials = stock
            .iter()
            .map(|(id, qty)| Material::new(MaterialId(*id), format!("M{}", id), *qty))
            .collect();
        StockLedger::from_snapshot(&CatalogSnapshot::new(materials, vec![]).unwrap())
    }

    #[test]
    fn test_requirements_sorted_by_material() {
        let product = product().with_material(MaterialId(3), 1).with_material(MaterialId(1), 4);

        let requirements =
            MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1, 3])).unwrap();

        let entries: Vec<_> = requirements.iter().collect();
        assert_eq!(entries, vec![(MaterialId(1), 4), (MaterialId(3), 1)]);
    }

    #[test]
    fn test_empty_bom() {
        let result = MaterialRequirements::from_product(&product(), DuplicateEntryPolicy::Reject, known(&[]));
        assert_eq!(result, Err(ProductIssue::EmptyBom));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn test_non_positive_quantity(#[case] quantity: i64) {
        let product = product().with_material(MaterialId(1), 2).with_material(MaterialId(2), quantity);

        let result = MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1, 2]));
        assert_eq!(
            result,
            Err(ProductIssue::NonPositiveQuantity {
                material_id: MaterialId(2),
                quantity,
            })
        );
    }

    #[test]
    fn test_unknown_material() {
        let product = product().with_material(MaterialId(1), 2).with_material(MaterialId(8), 1);

        let result = MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1]));
        assert_eq!(result, Err(ProductIssue::UnknownMaterial(MaterialId(8))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let product = product().with_material(MaterialId(1), 2).with_material(MaterialId(1), 3);

        let result = MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1]));
        assert_eq!(result, Err(ProductIssue::DuplicateMaterial(MaterialId(1))));
    }

    #[test]
    fn test_duplicate_summed() {
        let product = product().with_material(MaterialId(1), 2).with_material(MaterialId(1), 3);

        let requirements =
            MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Sum, known(&[1])).unwrap();
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements.per_unit(MaterialId(1)), Some(5));
    }

    #[test]
    fn test_duplicate_sum_overflow() {
        let product = product()
            .with_material(MaterialId(1), i64::MAX)
            .with_material(MaterialId(1), i64::MAX)
            .with_material(MaterialId(1), i64::MAX);

        let result = MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Sum, known(&[1]));
        assert_eq!(result, Err(ProductIssue::QuantityOverflow(MaterialId(1))));
    }

    #[test]
    fn test_invalid_quantity_reported_before_unknown_material() {
        let product = product().with_material(MaterialId(9), 1).with_material(MaterialId(1), 0);

        let result = MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1]));
        assert!(matches!(result, Err(ProductIssue::NonPositiveQuantity { .. })));
    }

    #[rstest]
    #[case(&[(1, 10)], 2, 5)]
    #[case(&[(1, 10)], 3, 3)]
    #[case(&[(1, 1)], 2, 0)]
    #[case(&[(1, 0)], 1, 0)]
    fn test_single_material_feasibility(#[case] stock: &[(u64, u64)], #[case] per_unit: i64, #[case] expected: u64) {
        let product = product().with_material(MaterialId(1), per_unit);
        let requirements =
            MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1])).unwrap();

        let feasible = FeasibilityCalculator::calculate(&requirements, &ledger(stock));
        assert_eq!(feasible.quantity, expected);
        assert_eq!(feasible.limiting_material, Some(MaterialId(1)));
    }

    #[test]
    fn test_limiting_material() {
        // M1: 20 / 2 = 10，M2: 9 / 3 = 3，M3: 100 / 1 = 100
        let product = product()
            .with_material(MaterialId(1), 2)
            .with_material(MaterialId(2), 3)
            .with_material(MaterialId(3), 1);
        let requirements =
            MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1, 2, 3])).unwrap();

        let feasible = FeasibilityCalculator::calculate(&requirements, &ledger(&[(1, 20), (2, 9), (3, 100)]));
        assert_eq!(feasible.quantity, 3);
        assert_eq!(feasible.limiting_material, Some(MaterialId(2)));
    }

    #[test]
    fn test_limiting_material_tie_uses_lowest_id() {
        let product = product().with_material(MaterialId(2), 1).with_material(MaterialId(1), 1);
        let requirements =
            MaterialRequirements::from_product(&product, DuplicateEntryPolicy::Reject, known(&[1, 2])).unwrap();

        let feasible = FeasibilityCalculator::calculate(&requirements, &ledger(&[(1, 4), (2, 4)]));
        assert_eq!(feasible.quantity, 4);
        assert_eq!(feasible.limiting_material, Some(MaterialId(1)));
    }
}
