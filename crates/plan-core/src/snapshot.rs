//! 目錄快照
//!
//! 一次計劃計算的唯一輸入：某一時刻所有原物料與產品的不可變複本。
//! 建立後不提供任何修改方法。

use chrono::{DateTime, Utc};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use crate::{Material, MaterialId, PlanError, Product};

/// 目錄快照
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    materials: BTreeMap<MaterialId, Material>,
    products: Vec<Product>,
    version: u64,
    taken_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// 從原物料與產品集合建立快照
    ///
    /// 原物料或產品 ID 重複時拒絕建立。
    pub fn new(materials: Vec<Material>, products: Vec<Product>) -> crate::Result<Self> {
        let mut material_map = BTreeMap::new();
        for material in materials {
            match material_map.entry(material.id) {
                Entry::Vacant(slot) => {
                    slot.insert(material);
                }
                Entry::Occupied(slot) => return Err(PlanError::DuplicateMaterial(*slot.key())),
            }
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(PlanError::DuplicateProduct(product.id));
            }
        }

        Ok(Self {
            materials: material_map,
            products,
            version: 0,
            taken_at: Utc::now(),
        })
    }

    /// 空快照
    pub fn empty() -> Self {
        Self {
            materials: BTreeMap::new(),
            products: Vec::new(),
            version: 0,
            taken_at: Utc::now(),
        }
    }

    /// 建構器模式：設置目錄版本
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// 所有原物料（依 ID 排序）
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    /// 查找原物料
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// 所有產品（保持輸入順序）
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// 快照是否完全為空
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.products.is_empty()
    }

    /// 各原物料的庫存數量
    pub fn stock_levels(&self) -> BTreeMap<MaterialId, u64> {
        self.materials
            .values()
            .map(|m| (m.id, m.stock_quantity))
            .collect()
    }

    /// 快照對應的目錄版本
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 快照擷取時間
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
