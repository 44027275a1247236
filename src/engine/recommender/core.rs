// ==========================================
// 库存采购决策系统 - 采购建议引擎 (单物料管线)
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 Recommender
// 红线: 数据形状问题一律降级处理, 整批永不失败
// ==========================================
// 职责: 逐物料计算建议 → 聚合排序分桶
// 输入: 已分类物料 + 外部预警 + 引擎配置 + 当日
// 输出: ProcurementAnalysisResult
// ==========================================

use crate::config::ProcurementEngineConfig;
use crate::domain::analysis::{ProcurementAnalysisResult, ProcurementRecommendation};
use crate::domain::inventory::{MaterialAbc, SmartAlert};
use crate::domain::types::{AbcClass, RecommendationType};
use crate::engine::costing;
use crate::engine::recommender::aggregate;
use crate::engine::recommender::scoring;
use crate::engine::strategy::ClassStrategy;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, instrument};

// 下单日期偏移上限 (天), 防御极端覆盖天数
const MAX_ORDER_OFFSET_DAYS: f64 = 3650.0;

// ==========================================
// RecommendationSeed - 单物料计算产物 (聚合前)
// ==========================================
pub(super) struct RecommendationSeed {
    pub recommendation: ProcurementRecommendation,
    pub savings: f64,             // EOQ 优化节约 (批量/计划类)
    pub supplier: Option<String>, // 供应商分组键
}

// ==========================================
// ProcurementRecommender - 采购建议引擎
// ==========================================
pub struct ProcurementRecommender {
    // 无状态引擎, 不需要注入依赖
}

impl ProcurementRecommender {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 批量生成采购建议
    ///
    /// 单物料管线 (依据 Procurement_Engine_Specs 4.2, 物料间相互独立):
    /// 1) 日消耗率 → 2) 安全库存 → 3) 覆盖天数/紧急判定 → 4) EOQ
    /// 5) 按等级策略选型 → 6) 建议量/金额 → 7) 财务口径
    /// 8) 最优下单时点 → 9) 置信度 → 10) 优先级 → 11) 预警联动
    ///
    /// 聚合阶段 (单线程, 保证确定性排序): 分桶 → 排序 → 截断 → 汇总
    #[instrument(skip(self, classified, alerts), fields(count = classified.len(), alert_count = alerts.len()))]
    pub fn recommend(
        &self,
        classified: Vec<MaterialAbc>,
        alerts: &[SmartAlert],
        cfg: &ProcurementEngineConfig,
        today: NaiveDate,
    ) -> ProcurementAnalysisResult {
        let cfg = cfg.normalized();
        let generated_at = Utc::now();

        if classified.is_empty() {
            return ProcurementAnalysisResult::empty(cfg, generated_at);
        }

        // 预警按物料索引
        let mut alerts_by_item: HashMap<&str, Vec<&SmartAlert>> = HashMap::new();
        for alert in alerts {
            alerts_by_item
                .entry(alert.item_id.as_str())
                .or_default()
                .push(alert);
        }

        let total_items_analyzed = classified.len();

        let seeds: Vec<RecommendationSeed> = classified
            .into_iter()
            .filter_map(|material| {
                let item_alerts = alerts_by_item
                    .get(material.record.id.as_str())
                    .map(|v| v.as_slice())
                    .unwrap_or(&[]);
                self.evaluate_single(material, item_alerts, &cfg, today)
            })
            .collect();

        aggregate::assemble(seeds, &cfg, total_items_analyzed, generated_at)
    }

    /// 单物料建议计算 (内部使用)
    ///
    /// 返回 None 的情况:
    /// - 置信度低于 confidence_threshold
    /// - 非紧急且建议量为 0 (无可下单内容)
    pub(super) fn evaluate_single(
        &self,
        material: MaterialAbc,
        item_alerts: &[&SmartAlert],
        cfg: &ProcurementEngineConfig,
        today: NaiveDate,
    ) -> Option<RecommendationSeed> {
        let record = &material.record;
        let unit_cost = record.sanitized_unit_cost();
        let current_stock = record.current_stock.max(0.0);
        let min_stock = record.min_stock_or_zero();

        // 1. 日消耗率
        let daily = costing::daily_consumption(
            material.annual_consumption,
            record.monthly_consumption,
        );

        // 2. 安全库存
        let safety = costing::safety_stock(daily, min_stock, cfg);

        // 3. 覆盖天数 + 紧急判定
        let days_of_supply = costing::days_of_supply(current_stock, daily);
        let urgent = current_stock <= 0.0 || days_of_supply < cfg.lead_time_buffer;

        // 4. EOQ (退化输入时为 None, 跳过批量候选)
        let eoq = costing::economic_order_quantity(material.annual_consumption, unit_cost, cfg);

        // 5/6. 策略选型 + 建议量
        let strategy = ClassStrategy::for_class(material.abc_class);
        let (rec_type, recommended_quantity) = self.select_strategy(
            &material, &strategy, urgent, eoq, daily, safety, current_stock, min_stock, cfg,
        );

        // 非紧急且无量可下 → 不出建议
        if !urgent && recommended_quantity <= 0.0 {
            debug!(item_id = %record.id, "非紧急且建议量为 0, 跳过");
            return None;
        }

        let recommended_value = recommended_quantity * unit_cost;

        // 7. 财务口径
        let holding_cost = costing::holding_cost_per_unit(unit_cost, cfg);
        let carrying_cost =
            costing::carrying_cost(current_stock, recommended_quantity, holding_cost);
        let stockout_risk = if urgent {
            costing::urgent_stockout_risk(days_of_supply, cfg.lead_time_buffer)
        } else {
            strategy.baseline_stockout_risk
        };
        let opportunity_cost = costing::opportunity_cost(stockout_risk, recommended_value, cfg);

        // 8. 最优下单时点 (不早于 today)
        let offset_days = (days_of_supply - cfg.lead_time_buffer)
            .max(0.0)
            .min(MAX_ORDER_OFFSET_DAYS);
        let optimal_order_date = today + Duration::days(offset_days.floor() as i64);

        // 9. 置信度 (低于阈值丢弃)
        let confidence = scoring::compute_confidence(&material, urgent);
        if confidence < cfg.confidence_threshold {
            debug!(
                item_id = %record.id,
                confidence,
                threshold = cfg.confidence_threshold,
                "置信度低于阈值, 丢弃建议"
            );
            return None;
        }

        // 10. 优先级 + 11. 预警联动抬升
        let base_priority = scoring::compute_priority(&strategy, urgent, recommended_value);
        let related_alerts: Vec<String> =
            item_alerts.iter().map(|a| a.id.clone()).collect();
        let priority = scoring::boost_for_alerts(base_priority, related_alerts.len());

        // 可解释性: 建议原因 JSON
        let reason = json!({
            "type": rec_type.as_str(),
            "abc_class": material.abc_class.to_string(),
            "urgent": urgent,
            "inputs": {
                "daily_consumption": daily,
                "safety_stock": safety,
                "days_of_supply": days_of_supply,
                "lead_time_buffer": cfg.lead_time_buffer,
                "eoq": eoq,
            },
            "matched_alerts": related_alerts,
        })
        .to_string();

        // EOQ 优化节约 (仅批量/计划类建议计入)
        let savings = match rec_type {
            RecommendationType::BulkPurchase | RecommendationType::PlannedRestock => eoq
                .map(|q| costing::eoq_savings(q, material.annual_consumption, unit_cost, cfg))
                .unwrap_or(0.0),
            _ => 0.0,
        };

        let recommendation = ProcurementRecommendation {
            item_id: record.id.clone(),
            item_name: record.name.clone(),
            abc_class: material.abc_class,
            rec_type,
            recommended_quantity,
            recommended_value,
            priority,
            confidence,
            urgent,
            carrying_cost,
            opportunity_cost,
            stockout_risk,
            optimal_order_date,
            estimated_delivery_days: cfg.lead_time_buffer,
            related_alerts,
            reason,
        };

        Some(RecommendationSeed {
            recommendation,
            savings,
            supplier: record.supplier.clone(),
        })
    }

    // ==========================================
    // 等级策略选型
    // ==========================================

    /// 按 ABC 等级选择建议类型与建议量
    ///
    /// 规则 (依据 Procurement_Engine_Specs 4.2 步骤5/6):
    /// - 紧急 (任意等级) → urgent_restock, 量 = max(safety + daily×lead − current, 0)
    /// - A 类 → just_in_time, 量 = 计划口径
    /// - B 类 → EOQ 策略年总成本与计划口径比较, 低者胜
    /// - C 类 → bulk_purchase (EOQ 可用) / supplier_consolidation (退化)
    ///
    /// 计划口径: min_stock×2 + min_stock×0.5 − current, 下限 0
    #[allow(clippy::too_many_arguments)]
    fn select_strategy(
        &self,
        material: &MaterialAbc,
        strategy: &ClassStrategy,
        urgent: bool,
        eoq: Option<f64>,
        daily: f64,
        safety: f64,
        current_stock: f64,
        min_stock: f64,
        cfg: &ProcurementEngineConfig,
    ) -> (RecommendationType, f64) {
        if urgent {
            let quantity =
                (safety + daily * cfg.lead_time_buffer - current_stock).max(0.0);
            return (RecommendationType::UrgentRestock, quantity);
        }

        let planned_quantity = (min_stock * 2.0 + min_stock * 0.5 - current_stock).max(0.0);

        match material.abc_class {
            AbcClass::A => (strategy.preferred_type, planned_quantity),
            AbcClass::B => {
                // 订货 + 持有总成本比较
                match eoq {
                    Some(q) if planned_quantity <= 0.0 => {
                        (RecommendationType::BulkPurchase, q)
                    }
                    Some(q) => {
                        let unit_cost = material.record.sanitized_unit_cost();
                        let h = costing::holding_cost_per_unit(unit_cost, cfg);
                        let eoq_cost = costing::annual_policy_cost(
                            q,
                            material.annual_consumption,
                            h,
                            cfg,
                        );
                        let planned_cost = costing::annual_policy_cost(
                            planned_quantity,
                            material.annual_consumption,
                            h,
                            cfg,
                        );
                        if eoq_cost < planned_cost {
                            (RecommendationType::BulkPurchase, q)
                        } else {
                            (RecommendationType::PlannedRestock, planned_quantity)
                        }
                    }
                    None => (RecommendationType::PlannedRestock, planned_quantity),
                }
            }
            AbcClass::C => match eoq {
                // 大批量低频次
                Some(q) => (RecommendationType::BulkPurchase, q.max(planned_quantity)),
                None => (RecommendationType::SupplierConsolidation, planned_quantity),
            },
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ProcurementRecommender {
    fn default() -> Self {
        Self::new()
    }
}
