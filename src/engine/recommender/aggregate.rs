// ==========================================
// 库存采购决策系统 - 建议聚合阶段
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 后处理
// 红线: 聚合单线程执行, 排序键固定, 结果可复现
// ==========================================

use crate::config::procurement_config::{
    CONSOLIDATION_VALUE_THRESHOLD, LARGE_PURCHASE_THRESHOLD,
};
use crate::config::ProcurementEngineConfig;
use crate::domain::analysis::{
    MetricsByClass, ProcurementAnalysisResult, ProcurementRecommendation, SupplierOpportunity,
};
use crate::domain::inventory::ProposedAlert;
use crate::domain::types::{AlertSeverity, AlertType, RecommendationType};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use super::core::RecommendationSeed;

/// 聚合单物料计算产物为最终结果
///
/// 步骤:
/// 1) 全局排序: priority 降序 → recommended_value 降序 → item_id 升序
/// 2) max_recommendations > 0 时全局截断 (保留者的分桶归属不变)
/// 3) 分桶: 紧急 / 计划 (planned_restock, just_in_time) / 机会 (bulk, consolidation)
/// 4) 汇总: 投资合计 / 节约合计 / 平均置信度 / 按等级指标
/// 5) 供应商合并机会 + 预警联动输出 + 新预警建议
pub(super) fn assemble(
    mut seeds: Vec<RecommendationSeed>,
    cfg: &ProcurementEngineConfig,
    total_items_analyzed: usize,
    generated_at: DateTime<Utc>,
) -> ProcurementAnalysisResult {
    // 1. 全局确定性排序
    seeds.sort_by(|a, b| compare_recommendations(&a.recommendation, &b.recommendation));

    // 2. 全局截断
    if cfg.max_recommendations > 0 && seeds.len() > cfg.max_recommendations {
        seeds.truncate(cfg.max_recommendations);
    }

    let mut result = ProcurementAnalysisResult::empty(cfg.clone(), generated_at);
    result.total_items_analyzed = total_items_analyzed;

    let mut confidence_sum = 0.0;
    let mut triggered: BTreeSet<String> = BTreeSet::new();
    let mut by_supplier: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();

    for seed in seeds {
        let rec = seed.recommendation;

        // 4. 汇总指标
        result.total_recommended_investment += rec.recommended_value;
        result.estimated_total_savings += seed.savings;
        confidence_sum += rec.confidence;
        result.metrics_by_class.add(rec.abc_class, rec.recommended_value);

        for alert_id in &rec.related_alerts {
            triggered.insert(alert_id.clone());
        }

        if let Some(supplier) = &seed.supplier {
            by_supplier
                .entry(supplier.clone())
                .or_default()
                .push((rec.item_id.clone(), rec.recommended_value));
        }

        // 大额采购 → 建议生成新预警
        if rec.recommended_value > LARGE_PURCHASE_THRESHOLD {
            result.new_alerts_to_generate.push(propose_alert(&rec));
        }

        // 3. 分桶 (保持全局排序顺序, 桶内天然有序)
        if rec.urgent {
            result.urgent_recommendations.push(rec);
        } else {
            match rec.rec_type {
                RecommendationType::PlannedRestock | RecommendationType::JustInTime => {
                    result.planned_recommendations.push(rec)
                }
                _ => result.opportunity_recommendations.push(rec),
            }
        }
    }

    let retained = result.retained_count();
    result.average_confidence = if retained > 0 {
        confidence_sum / retained as f64
    } else {
        0.0
    };

    result.triggered_by_alerts = triggered.into_iter().collect();

    // 5. 供应商合并机会: 同供应商 ≥ 2 条 且 合计金额超线
    for (supplier, mut items) in by_supplier {
        let combined_value: f64 = items.iter().map(|(_, v)| v).sum();
        if items.len() >= 2 && combined_value > CONSOLIDATION_VALUE_THRESHOLD {
            items.sort_by(|a, b| a.0.cmp(&b.0));
            result.supplier_opportunities.push(SupplierOpportunity {
                supplier,
                item_count: items.len(),
                item_ids: items.into_iter().map(|(id, _)| id).collect(),
                combined_value,
            });
        }
    }
    result
        .supplier_opportunities
        .sort_by(|a, b| {
            b.combined_value
                .total_cmp(&a.combined_value)
                .then_with(|| a.supplier.cmp(&b.supplier))
        });

    result
}

/// 全局排序键: priority 降序 → recommended_value 降序 → item_id 升序
fn compare_recommendations(
    a: &ProcurementRecommendation,
    b: &ProcurementRecommendation,
) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.recommended_value.total_cmp(&a.recommended_value))
        .then_with(|| a.item_id.cmp(&b.item_id))
}

/// 为大额采购建议生成新预警 (落库由预警子系统负责)
///
/// 类型: 批量/合并类 → supplier_contact_needed, 其余 → budget_required
/// 严重度: 金额 ≥ 2× 大额线 → critical, 否则 high
fn propose_alert(rec: &ProcurementRecommendation) -> ProposedAlert {
    let alert_type = match rec.rec_type {
        RecommendationType::BulkPurchase | RecommendationType::SupplierConsolidation => {
            AlertType::SupplierContactNeeded
        }
        _ => AlertType::BudgetRequired,
    };
    let severity = if rec.recommended_value >= 2.0 * LARGE_PURCHASE_THRESHOLD {
        AlertSeverity::Critical
    } else {
        AlertSeverity::High
    };
    let recommended_action = match alert_type {
        AlertType::SupplierContactNeeded => {
            format!("联系供应商协商批量条款: {} ({})", rec.item_name, rec.item_id)
        }
        _ => format!("大额采购需预算审批: {} ({})", rec.item_name, rec.item_id),
    };

    ProposedAlert {
        id: Uuid::new_v4().to_string(),
        alert_type,
        severity,
        item_id: rec.item_id.clone(),
        current_value: rec.recommended_value,
        threshold_value: LARGE_PURCHASE_THRESHOLD,
        recommended_action,
    }
}
