//! 生產計劃主計算器

use plan_core::{CatalogSnapshot, PlannerConfig, Product, ProductionSuggestion};
use rust_decimal::Decimal;

use crate::{
    Allocation, FeasibilityCalculator, MaterialRequirements, PlanResult, PlanWarning, PriorityOrdering,
    ProductIssue, StockLedger,
};

/// 生產計劃計算器
///
/// 依單價由高到低逐一處理產品，每個產品取當下剩餘庫存能生產的最大整數量，
/// 立即扣料後再處理下一個產品，不回頭調整。
/// 計算器本身不保存任何計算狀態，可在多執行緒間共用。
#[derive(Debug, Clone, Default)]
pub struct ProductionPlanner {
    config: PlannerConfig,
}

impl ProductionPlanner {
    /// 創建新的計算器
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 計算生產建議（依優先順序，數量為 0 的產品不輸出）
    pub fn plan(&self, snapshot: &CatalogSnapshot) -> Vec<ProductionSuggestion> {
        self.plan_detailed(snapshot).suggestions()
    }

    /// 主計算入口，回傳分配明細與警告
    pub fn plan_detailed(&self, snapshot: &CatalogSnapshot) -> PlanResult {
        tracing::info!(
            "開始生產計劃計算：原物料 {} 筆，產品 {} 筆，快照版本 {}",
            snapshot.material_count(),
            snapshot.product_count(),
            snapshot.version()
        );

        let start_time = std::time::Instant::now();

        let mut result = PlanResult::empty();
        result.snapshot_version = snapshot.version();

        let mut ledger = StockLedger::from_snapshot(snapshot);

        for product in PriorityOrdering::sort(snapshot.products()) {
            match self.plan_product(product, &mut ledger) {
                Ok(Some(allocation)) => {
                    tracing::debug!(
                        "產品 {} 建議生產 {} 單位（限制原物料: {:?}）",
                        product.id,
                        allocation.quantity,
                        allocation.limiting_material
                    );
                    if allocation.capped {
                        result.add_warning(PlanWarning::info(
                            product,
                            format!("已達單一產品生產上限 {}", allocation.quantity),
                        ));
                    }
                    result.allocations.push(allocation);
                }
                Ok(None) => {
                    tracing::debug!("產品 {} 剩餘庫存不足，不建議生產", product.id);
                }
                Err(issue) => {
                    tracing::warn!("產品 {} 排除於計劃之外: {}", product.id, issue);
                    result.add_warning(PlanWarning::from_issue(product, &issue));
                }
            }
        }

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("生產計劃計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "建議產品數量: {}，總價值: {}",
            result.allocations.len(),
            result.total_value()
        );

        result
    }

    /// 單一產品計算：驗證用料、計算可生產數量、扣料
    ///
    /// 數量為 0 時回傳 `Ok(None)`，分帳不變。
    fn plan_product(
        &self,
        product: &Product,
        ledger: &mut StockLedger,
    ) -> Result<Option<Allocation>, ProductIssue> {
        if !product.has_valid_price() {
            return Err(ProductIssue::NegativePrice(product.price));
        }

        let requirements = MaterialRequirements::from_product(
            product,
            self.config.duplicate_entry_policy,
            |material_id| ledger.contains(material_id),
        )?;

        let feasible = FeasibilityCalculator::calculate(&requirements, ledger);
        let (quantity, capped) = self.config.cap_quantity(feasible.quantity);

        if quantity == 0 {
            return Ok(None);
        }

        // 先算總價值再扣料，溢位時不影響分帳
        let total_value = product
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or(ProductIssue::ValueOverflow(quantity))?;

        let consumption = ledger.commit(&requirements, quantity)?;

        Ok(Some(Allocation {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
            total_value,
            consumption,
            limiting_material: feasible.limiting_material,
            capped,
        }))
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}
