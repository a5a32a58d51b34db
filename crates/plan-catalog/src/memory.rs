//! 記憶體目錄
//!
//! 原物料與產品的 CRUD 儲存，快照採讀取時複製。

use plan_core::{
    BomEntry, CatalogSnapshot, Material, MaterialId, PlanError, Product, ProductId, Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::CatalogSource;

/// 新增/更新原物料的表單資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    pub name: String,
    pub stock_quantity: u64,
}

impl NewMaterial {
    pub fn new(name: impl Into<String>, stock_quantity: u64) -> Self {
        Self {
            name: name.into(),
            stock_quantity,
        }
    }
}

/// 新增產品的表單資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[serde(default)]
    pub materials: Vec<BomEntry>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            materials: Vec::new(),
        }
    }

    /// 建構器模式：添加用料
    pub fn with_material(mut self, material_id: MaterialId, quantity_needed: i64) -> Self {
        self.materials.push(BomEntry::new(material_id, quantity_needed));
        self
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    materials: BTreeMap<MaterialId, Material>,
    products: BTreeMap<ProductId, Product>,
    last_material_id: u64,
    last_product_id: u64,
    /// 每次異動遞增
    version: u64,
}

impl CatalogState {
    fn touch(&mut self) {
        self.version += 1;
    }
}

/// 記憶體目錄
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 目前的目錄版本
    pub fn version(&self) -> Result<u64> {
        Ok(self.read()?.version)
    }

    /// 列出所有原物料
    pub fn list_materials(&self) -> Result<Vec<Material>> {
        Ok(self.read()?.materials.values().cloned().collect())
    }

    /// 查找原物料
    pub fn get_material(&self, id: MaterialId) -> Result<Material> {
        self.read()?
            .materials
            .get(&id)
            .cloned()
            .ok_or(PlanError::MaterialNotFound(id))
    }

    /// 新增原物料（ID 依序配發）
    pub fn create_material(&self, draft: NewMaterial) -> Result<Material> {
        let mut state = self.write()?;
        state.last_material_id += 1;

        let material = Material::new(
            MaterialId(state.last_material_id),
            draft.name,
            draft.stock_quantity,
        );
        state.materials.insert(material.id, material.clone());
        state.touch();

        tracing::debug!("新增原物料 {}（庫存 {}）", material.id, material.stock_quantity);
        Ok(material)
    }

    /// 更新原物料名稱與庫存
    pub fn update_material(&self, id: MaterialId, draft: NewMaterial) -> Result<Material> {
        let mut state = self.write()?;
        let material = state
            .materials
            .get_mut(&id)
            .ok_or(PlanError::MaterialNotFound(id))?;

        material.name = draft.name;
        material.stock_quantity = draft.stock_quantity;
        let updated = material.clone();
        state.touch();

        Ok(updated)
    }

    /// 刪除原物料
    ///
    /// 仍被產品用料清單引用時拒絕刪除。
    pub fn delete_material(&self, id: MaterialId) -> Result<()> {
        let mut state = self.write()?;
        if !state.materials.contains_key(&id) {
            return Err(PlanError::MaterialNotFound(id));
        }

        if let Some(product) = state.products.values().find(|p| p.uses_material(id)) {
            return Err(PlanError::MaterialInUse {
                material_id: id,
                product_id: product.id,
            });
        }

        state.materials.remove(&id);
        state.touch();
        Ok(())
    }

    /// 列出所有產品
    pub fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.read()?.products.values().cloned().collect())
    }

    /// 查找產品
    pub fn get_product(&self, id: ProductId) -> Result<Product> {
        self.read()?
            .products
            .get(&id)
            .cloned()
            .ok_or(PlanError::ProductNotFound(id))
    }

    /// 新增產品
    ///
    /// 用料引用的原物料必須存在，且單位用量必須為正數。
    /// 其他來源（如 JSON）的錯誤用料仍由計劃引擎逐一排除。
    pub fn create_product(&self, draft: NewProduct) -> Result<Product> {
        let mut state = self.write()?;
        let product_id = ProductId(state.last_product_id + 1);

        for entry in &draft.materials {
            if !state.materials.contains_key(&entry.material_id()) {
                return Err(PlanError::MaterialNotFound(entry.material_id()));
            }
            if !entry.is_valid_quantity() {
                return Err(PlanError::InvalidBomEntry {
                    product_id,
                    material_id: entry.material_id(),
                    reason: format!("單位用量必須大於 0（實際 {}）", entry.quantity_needed),
                });
            }
        }

        state.last_product_id = product_id.value();
        let product = Product::new(product_id, draft.name, draft.price)
            .with_materials(draft.materials);
        state.products.insert(product.id, product.clone());
        state.touch();

        tracing::debug!("新增產品 {}（用料 {} 項）", product.id, product.materials.len());
        Ok(product)
    }

    /// 更新產品名稱與單價（用料清單不變）
    pub fn update_product(&self, id: ProductId, name: impl Into<String>, price: Decimal) -> Result<Product> {
        let mut state = self.write()?;
        let product = state
            .products
            .get_mut(&id)
            .ok_or(PlanError::ProductNotFound(id))?;

        product.name = name.into();
        product.price = price;
        let updated = product.clone();
        state.touch();

        Ok(updated)
    }

    /// 刪除產品（連同其用料清單）
    pub fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut state = self.write()?;
        state
            .products
            .remove(&id)
            .ok_or(PlanError::ProductNotFound(id))?;
        state.touch();
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|e| PlanError::CatalogUnavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|e| PlanError::CatalogUnavailable(e.to_string()))
    }
}

impl CatalogSource for InMemoryCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot> {
        // 讀鎖期間完成複製，異動不會穿插其中
        let state = self
            .state
            .read()
            .map_err(|e| PlanError::SnapshotUnavailable(e.to_string()))?;

        let snapshot = CatalogSnapshot::new(
            state.materials.values().cloned().collect(),
            state.products.values().cloned().collect(),
        )?
        .with_version(state.version);

        tracing::debug!("擷取目錄快照，版本 {}", state.version);
        Ok(snapshot)
    }
}
