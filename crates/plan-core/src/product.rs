//! 產品與用料清單（BOM）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::MaterialId;

/// 產品ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// 對原物料的引用（只需要 ID）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRef {
    pub id: MaterialId,
}

/// 用料清單項目：每生產一單位產品需要的原物料數量
///
/// `quantity_needed` 保留有號整數，讓零或負數的錯誤資料能進入引擎並被判定為無效，
/// 而不是在反序列化時就被吞掉。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomEntry {
    /// 引用的原物料
    pub material: MaterialRef,

    /// 單位用量
    pub quantity_needed: i64,
}

impl BomEntry {
    /// 創建新的用料項目
    pub fn new(material_id: MaterialId, quantity_needed: i64) -> Self {
        Self {
            material: MaterialRef { id: material_id },
            quantity_needed,
        }
    }

    /// 引用的原物料ID
    pub fn material_id(&self) -> MaterialId {
        self.material.id
    }

    /// 單位用量是否為正
    pub fn is_valid_quantity(&self) -> bool {
        self.quantity_needed > 0
    }
}

/// 產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 產品ID
    pub id: ProductId,

    /// 顯示名稱
    pub name: String,

    /// 單價
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// 用料清單（順序無意義）
    #[serde(default)]
    pub materials: Vec<BomEntry>,
}

impl Product {
    /// 創建新的產品（用料清單為空）
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            materials: Vec::new(),
        }
    }

    /// 建構器模式：添加用料
    pub fn with_material(mut self, material_id: MaterialId, quantity_needed: i64) -> Self {
        self.add_material(material_id, quantity_needed);
        self
    }

    /// 建構器模式：設置整份用料清單
    pub fn with_materials(mut self, materials: Vec<BomEntry>) -> Self {
        self.materials = materials;
        self
    }

    /// 添加用料
    pub fn add_material(&mut self, material_id: MaterialId, quantity_needed: i64) {
        self.materials.push(BomEntry::new(material_id, quantity_needed));
    }

    /// 是否設定了用料清單
    pub fn has_bom(&self) -> bool {
        !self.materials.is_empty()
    }

    /// 是否引用指定原物料
    pub fn uses_material(&self, material_id: MaterialId) -> bool {
        self.materials.iter().any(|e| e.material_id() == material_id)
    }

    /// 單價是否有效（非負）
    pub fn has_valid_price(&self) -> bool {
        self.price >= Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new(ProductId::new(3), "Bracket", Decimal::new(1250, 2))
            .with_material(MaterialId(1), 2)
            .with_material(MaterialId(2), 1);

        assert_eq!(product.materials.len(), 2);
        assert!(product.has_bom());
        assert!(product.uses_material(MaterialId(2)));
        assert!(!product.uses_material(MaterialId(9)));
        assert!(product.has_valid_price());
    }

    #[test]
    fn test_bom_entry_quantity_validation() {
        assert!(BomEntry::new(MaterialId(1), 3).is_valid_quantity());
        assert!(!BomEntry::new(MaterialId(1), 0).is_valid_quantity());
        assert!(!BomEntry::new(MaterialId(1), -2).is_valid_quantity());
    }

    #[test]
    fn test_product_wire_format() {
        // 前端送出的用料可能帶完整的原物料物件，多餘欄位會被忽略
        let json = r#"{
            "id": 10,
            "name": "Table",
            "price": 12.5,
            "materials": [
                {"id": 99, "material": {"id": 1, "name": "Wood", "stockQuantity": 40}, "quantityNeeded": 4},
                {"material": {"id": 2}, "quantityNeeded": 8}
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId(10));
        assert_eq!(product.price, Decimal::new(125, 1));
        assert_eq!(product.materials[0].material_id(), MaterialId(1));
        assert_eq!(product.materials[1].quantity_needed, 8);
    }

    #[test]
    fn test_product_without_materials_field() {
        let product: Product = serde_json::from_str(r#"{"id": 1, "name": "Gift Card", "price": 20}"#).unwrap();
        assert!(!product.has_bom());
    }

    #[test]
    fn test_negative_price_is_flagged() {
        let product = Product::new(ProductId(1), "Refund", Decimal::from(-5));
        assert!(!product.has_valid_price());
    }
}
