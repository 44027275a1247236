// ==========================================
// 采购建议引擎集成测试
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 Recommender
// 职责: 验证建议引擎的可解释输出, 财务口径与序列化口径
// ==========================================

use chrono::NaiveDate;
use inventory_procurement::config::ProcurementEngineConfig;
use inventory_procurement::domain::inventory::{InventoryRecord, MaterialAbc, SmartAlert};
use inventory_procurement::domain::types::{
    AbcClass, AlertSeverity, AlertType, RecommendationType,
};
use inventory_procurement::engine::ProcurementRecommender;
use serde_json::Value;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用已分类物料 (字段齐全)
fn create_test_material(
    id: &str,
    abc_class: AbcClass,
    current_stock: f64,
    unit_cost: f64,
    annual_consumption: f64,
    supplier: Option<&str>,
) -> MaterialAbc {
    let record = InventoryRecord {
        id: id.to_string(),
        name: format!("物料{}", id),
        item_type: "备件".to_string(),
        unit: "件".to_string(),
        category: "机械".to_string(),
        supplier: supplier.map(|s| s.to_string()),
        current_stock,
        unit_cost,
        min_stock: Some(20.0),
        monthly_consumption: Some(annual_consumption / 12.0),
        annual_consumption: Some(annual_consumption),
        consumption_frequency: Some(24.0),
        is_active: true,
    };
    let annual_value = annual_consumption * unit_cost;
    MaterialAbc {
        abc_class,
        annual_consumption,
        annual_value,
        ranking_value: annual_value,
        revenue_percentage: 0.0,
        cumulative_revenue: 0.0,
        total_stock_value: current_stock * unit_cost,
        record,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
}

// ==========================================
// 测试1: 覆盖天数不足 (有库存但低于缓冲期) → 紧急
// ==========================================
#[test]
fn test_low_coverage_is_urgent() {
    let engine = ProcurementRecommender::new();

    // 日消耗 10, 库存 30 → 覆盖 3 天 < 缓冲 7 天
    let material = create_test_material("M001", AbcClass::B, 30.0, 8.0, 3650.0, None);
    let result = engine.recommend(
        vec![material],
        &[],
        &ProcurementEngineConfig::default(),
        today(),
    );

    assert_eq!(result.urgent_recommendations.len(), 1);
    let rec = &result.urgent_recommendations[0];
    assert_eq!(rec.rec_type, RecommendationType::UrgentRestock);
    // 建议量补齐到 安全库存 + 缓冲期消耗
    // safety = 1.5×10×7 = 105, + 10×7 = 175, − 30 = 145
    assert!((rec.recommended_quantity - 145.0).abs() < 1e-6);
    // 断货风险 = 1 − 3/7
    assert!((rec.stockout_risk - (1.0 - 3.0 / 7.0)).abs() < 1e-6);
    // 紧急物料当日下单
    assert_eq!(rec.optimal_order_date, today());
}

// ==========================================
// 测试2: 建议原因为可解析 JSON
// ==========================================
#[test]
fn test_reason_is_parseable_json() {
    let engine = ProcurementRecommender::new();

    let material = create_test_material("M001", AbcClass::A, 0.0, 10.0, 1200.0, None);
    let result = engine.recommend(
        vec![material],
        &[],
        &ProcurementEngineConfig::default(),
        today(),
    );

    let rec = &result.urgent_recommendations[0];
    let reason: Value = serde_json::from_str(&rec.reason).unwrap();

    assert_eq!(reason["type"], "urgent_restock");
    assert_eq!(reason["abc_class"], "A");
    assert_eq!(reason["urgent"], true);
    assert!(reason["inputs"]["daily_consumption"].is_number());
    assert!(reason["inputs"]["days_of_supply"].is_number());
}

// ==========================================
// 测试3: 节约口径非负且仅计批量/计划类
// ==========================================
#[test]
fn test_savings_non_negative() {
    let engine = ProcurementRecommender::new();

    let materials = vec![
        // B 类高消耗 → bulk_purchase, 计节约
        create_test_material("BULK", AbcClass::B, 500.0, 5.0, 20_000.0, None),
        // A 类非紧急 → just_in_time, 不计节约
        create_test_material("JIT", AbcClass::A, 30.0, 5.0, 365.0, None),
    ];
    let result = engine.recommend(
        materials,
        &[],
        &ProcurementEngineConfig::default(),
        today(),
    );

    assert!(result.estimated_total_savings >= 0.0);
    assert_eq!(result.opportunity_recommendations.len(), 1);
    assert_eq!(result.planned_recommendations.len(), 1);
}

// ==========================================
// 测试4: 汇总指标与分桶一致
// ==========================================
#[test]
fn test_metrics_match_buckets() {
    let engine = ProcurementRecommender::new();

    let materials = vec![
        create_test_material("A1", AbcClass::A, 0.0, 10.0, 1200.0, None),
        create_test_material("A2", AbcClass::A, 0.0, 12.0, 1200.0, None),
        create_test_material("B1", AbcClass::B, 0.0, 8.0, 2400.0, None),
        create_test_material("C1", AbcClass::C, 2.0, 1.0, 600.0, None),
    ];
    let result = engine.recommend(
        materials,
        &[],
        &ProcurementEngineConfig::default(),
        today(),
    );

    let all: Vec<_> = result
        .urgent_recommendations
        .iter()
        .chain(result.planned_recommendations.iter())
        .chain(result.opportunity_recommendations.iter())
        .collect();

    assert_eq!(result.retained_count(), all.len());

    // 按等级指标与建议明细一致
    let metrics = &result.metrics_by_class;
    let count_a = all.iter().filter(|r| r.abc_class == AbcClass::A).count();
    let value_a: f64 = all
        .iter()
        .filter(|r| r.abc_class == AbcClass::A)
        .map(|r| r.recommended_value)
        .sum();
    assert_eq!(metrics.class_a.count, count_a);
    assert_eq!(metrics.class_a.total_value, value_a);

    // 平均置信度落在 [0, 100]
    assert!((0.0..=100.0).contains(&result.average_confidence));
    // 投资合计 = Σ 明细
    let sum: f64 = all.iter().map(|r| r.recommended_value).sum();
    assert_eq!(result.total_recommended_investment, sum);
}

// ==========================================
// 测试5: 结果序列化 (UI/预警子系统消费口径)
// ==========================================
#[test]
fn test_result_serialization_round_trip() {
    let engine = ProcurementRecommender::new();

    let alert = SmartAlert {
        id: "AL-9".to_string(),
        alert_type: AlertType::Stockout,
        severity: AlertSeverity::Critical,
        item_id: "M001".to_string(),
        current_value: 0.0,
        threshold_value: 20.0,
        recommended_action: "立即补货".to_string(),
    };
    let material = create_test_material("M001", AbcClass::A, 0.0, 10.0, 1200.0, Some("供应商甲"));
    let result = engine.recommend(
        vec![material],
        &[alert],
        &ProcurementEngineConfig::default(),
        today(),
    );

    let json = serde_json::to_string(&result).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    // snake_case 序列化口径
    assert_eq!(
        value["urgent_recommendations"][0]["rec_type"],
        "urgent_restock"
    );
    assert_eq!(value["urgent_recommendations"][0]["abc_class"], "A");
    assert_eq!(value["triggered_by_alerts"][0], "AL-9");
    assert_eq!(value["config"]["lead_time_buffer"], 7.0);

    // 反序列化可还原
    let restored: inventory_procurement::ProcurementAnalysisResult =
        serde_json::from_str(&json).unwrap();
    assert_eq!(restored.retained_count(), result.retained_count());
    assert_eq!(restored.triggered_by_alerts, result.triggered_by_alerts);
}

// ==========================================
// 测试6: 预计交付天数回显缓冲期
// ==========================================
#[test]
fn test_delivery_days_echo_lead_time() {
    let engine = ProcurementRecommender::new();

    let cfg = ProcurementEngineConfig {
        lead_time_buffer: 14.0,
        ..Default::default()
    };
    let result = engine.recommend(
        vec![create_test_material("M001", AbcClass::A, 0.0, 10.0, 1200.0, None)],
        &[],
        &cfg,
        today(),
    );

    assert_eq!(
        result.urgent_recommendations[0].estimated_delivery_days,
        14.0
    );
    assert_eq!(result.config.lead_time_buffer, 14.0);
}
