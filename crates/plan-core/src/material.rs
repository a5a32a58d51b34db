//! 原物料模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 原物料ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u64);

impl MaterialId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// 原物料（含現有庫存）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// 原物料ID
    pub id: MaterialId,

    /// 顯示名稱
    pub name: String,

    /// 現有庫存數量（非負整數）
    pub stock_quantity: u64,
}

impl Material {
    /// 創建新的原物料
    pub fn new(id: MaterialId, name: impl Into<String>, stock_quantity: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stock_quantity,
        }
    }

    /// 建構器模式：設置庫存數量
    pub fn with_stock_quantity(mut self, stock_quantity: u64) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// 檢查是否有庫存
    pub fn has_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_material() {
        let material = Material::new(MaterialId::new(1), "Steel Sheet", 120);

        assert_eq!(material.id, MaterialId(1));
        assert_eq!(material.name, "Steel Sheet");
        assert_eq!(material.stock_quantity, 120);
        assert!(material.has_stock());
    }

    #[test]
    fn test_material_wire_format() {
        let material: Material =
            serde_json::from_str(r#"{"id": 7, "name": "Resin", "stockQuantity": 0}"#).unwrap();

        assert_eq!(material.id.value(), 7);
        assert!(!material.has_stock());

        let json = serde_json::to_value(material.with_stock_quantity(3)).unwrap();
        assert_eq!(json["stockQuantity"], 3);
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let parsed = serde_json::from_str::<Material>(r#"{"id": 1, "name": "Glue", "stockQuantity": -4}"#);
        assert!(parsed.is_err());
    }
}
