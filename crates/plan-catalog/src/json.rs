//! JSON 目錄
//!
//! 從兩份 JSON 文件建立快照：
//! - 原物料：`[{id, name, stockQuantity}]`
//! - 產品：`[{id, name, price, materials: [{material: {id}, quantityNeeded}]}]`

use plan_core::{CatalogSnapshot, Material, Product, Result};
use std::io::Read;

use crate::CatalogSource;

/// JSON 目錄
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    materials: Vec<Material>,
    products: Vec<Product>,
}

impl JsonCatalog {
    /// 解析原物料與產品 JSON
    ///
    /// 格式錯誤（包括負數庫存）在此即回報，不會進入計劃計算。
    pub fn from_documents(materials_json: &str, products_json: &str) -> Result<Self> {
        let materials: Vec<Material> = serde_json::from_str(materials_json)?;
        let products: Vec<Product> = serde_json::from_str(products_json)?;

        tracing::debug!("載入 JSON 目錄：原物料 {} 筆，產品 {} 筆", materials.len(), products.len());

        Ok(Self { materials, products })
    }

    /// 從讀取器解析
    pub fn from_readers(materials: impl Read, products: impl Read) -> Result<Self> {
        Ok(Self {
            materials: serde_json::from_reader(materials)?,
            products: serde_json::from_reader(products)?,
        })
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl CatalogSource for JsonCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot> {
        CatalogSnapshot::new(self.materials.clone(), self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{MaterialId, PlanError, ProductId};
    use rstest::rstest;

    const MATERIALS: &str = r#"[
        {"id": 1, "name": "Cotton", "stockQuantity": 30},
        {"id": 2, "name": "Button", "stockQuantity": 12}
    ]"#;

    const PRODUCTS: &str = r#"[
        {"id": 1, "name": "Shirt", "price": 19.5,
         "materials": [{"material": {"id": 1}, "quantityNeeded": 2},
                       {"material": {"id": 2}, "quantityNeeded": 6}]}
    ]"#;

    #[test]
    fn test_load_documents() {
        let catalog = JsonCatalog::from_documents(MATERIALS, PRODUCTS).unwrap();
        assert_eq!(catalog.materials().len(), 2);
        assert_eq!(catalog.products()[0].id, ProductId(1));

        let snapshot = catalog.snapshot().unwrap();
        assert_eq!(snapshot.material(MaterialId(2)).map(|m| m.stock_quantity), Some(12));
    }

    #[test]
    fn test_load_from_readers() {
        let catalog = JsonCatalog::from_readers(MATERIALS.as_bytes(), "[]".as_bytes()).unwrap();
        assert_eq!(catalog.materials().len(), 2);
        assert!(catalog.products().is_empty());
    }

    #[rstest]
    #[case::negative_stock(r#"[{"id": 1, "name": "Cotton", "stockQuantity": -1}]"#, "[]")]
    #[case::missing_stock(r#"[{"id": 1, "name": "Cotton"}]"#, "[]")]
    #[case::missing_price("[]", r#"[{"id": 1, "name": "Shirt", "materials": []}]"#)]
    #[case::not_an_array(r#"{"id": 1}"#, "[]")]
    fn test_malformed_documents_fail_before_planning(#[case] materials: &str, #[case] products: &str) {
        let result = JsonCatalog::from_documents(materials, products);
        assert!(matches!(result, Err(PlanError::Serialization(_))));
    }

    #[test]
    fn test_duplicate_ids_fail_snapshot() {
        let catalog = JsonCatalog::from_documents(
            r#"[{"id": 1, "name": "A", "stockQuantity": 1}, {"id": 1, "name": "B", "stockQuantity": 2}]"#,
            "[]",
        )
        .unwrap();

        assert!(matches!(catalog.snapshot(), Err(PlanError::DuplicateMaterial(MaterialId(1)))));
    }
}
