//! 家具工坊生產建議範例
//!
//! 展示從建立目錄到取得生產建議的完整流程

use production_planner::{
    logging, Decimal, InMemoryCatalog, NewMaterial, NewProduct, PlannerConfig, SuggestionService,
};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("===== Production Plan Example =====\n");

    // 步驟 1: 建立原物料
    println!("[1] Create Materials");
    let catalog = Arc::new(InMemoryCatalog::new());
    let board = catalog.create_material(NewMaterial::new("Oak Board", 23))?;
    let screw = catalog.create_material(NewMaterial::new("Screw", 50))?;
    let varnish = catalog.create_material(NewMaterial::new("Varnish", 4))?;
    for material in catalog.list_materials()? {
        println!("    {} {:<10} stock {}", material.id, material.name, material.stock_quantity);
    }
    println!();

    // 步驟 2: 建立產品與用料
    println!("[2] Create Products");
    catalog.create_product(
        NewProduct::new("Table", Decimal::new(12000, 2))
            .with_material(board.id, 4)
            .with_material(screw.id, 8)
            .with_material(varnish.id, 1),
    )?;
    catalog.create_product(
        NewProduct::new("Chair", Decimal::new(4500, 2))
            .with_material(board.id, 2)
            .with_material(screw.id, 6),
    )?;
    catalog.create_product(NewProduct::new("Shelf", Decimal::new(4500, 2)).with_material(board.id, 3))?;
    catalog.create_product(NewProduct::new("Gift Card", Decimal::new(2500, 2)))?;
    for product in catalog.list_products()? {
        println!("    {} {:<10} price {} ({} materials)", product.id, product.name, product.price, product.materials.len());
    }
    println!();

    // 步驟 3: 計算生產建議
    println!("[3] Compute Suggestions");
    let service = SuggestionService::new(Arc::clone(&catalog));
    let result = service.suggest_detailed()?;

    for allocation in &result.allocations {
        println!(
            "    {:<10} x{:<4} = {:>8}  (limited by {})",
            allocation.product_name,
            allocation.quantity,
            allocation.total_value,
            allocation
                .limiting_material
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!("    Total value: {}", result.total_value());

    for warning in &result.warnings {
        println!("    [{:?}] {}: {}", warning.severity, warning.product_name, warning.message);
    }
    println!();

    // 步驟 4: 輸出 JSON
    println!("[4] JSON Response");
    println!("    {}\n", service.suggest_json()?);

    // 步驟 5: 限制單一產品產量後重新計算
    println!("[5] Recompute with Per-Product Cap");
    let capped = SuggestionService::new(Arc::clone(&catalog))
        .with_config(PlannerConfig::new().with_max_units_per_product(2));
    for suggestion in capped.suggest()? {
        println!("    {:<10} x{:<4} = {}", suggestion.product_name, suggestion.quantity, suggestion.total_value);
    }

    tracing::info!("範例完成，目錄版本 {}", catalog.version()?);
    Ok(())
}
