// ==========================================
// 库存采购决策系统 - 优先级/置信度评分
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 步骤9/10
// ==========================================

use crate::config::procurement_config::HIGH_VALUE_THRESHOLD;
use crate::domain::inventory::MaterialAbc;
use crate::domain::types::AbcClass;
use crate::engine::strategy::ClassStrategy;

// ===== 置信度扣分项 =====
const MISSING_FIELD_PENALTY: f64 = 15.0;
const CLASS_MISMATCH_PENALTY: f64 = 20.0;

/// 计算建议置信度 (0-100)
///
/// 规则:
/// 1) 起始 100
/// 2) monthly_consumption 缺失 → −15
/// 3) consumption_frequency 缺失 → −15
/// 4) total_stock_value ≤ 0 → −15
/// 5) C 类走紧急通道 (A 类式紧急逻辑) → −20 (策略/等级错配)
/// 6) 钳入 [0, 100]
pub fn compute_confidence(material: &MaterialAbc, urgent: bool) -> f64 {
    let mut confidence = 100.0;

    if material.record.monthly_consumption.is_none() {
        confidence -= MISSING_FIELD_PENALTY;
    }
    if material.record.consumption_frequency.is_none() {
        confidence -= MISSING_FIELD_PENALTY;
    }
    if material.total_stock_value <= 0.0 {
        confidence -= MISSING_FIELD_PENALTY;
    }
    if urgent && material.abc_class == AbcClass::C {
        confidence -= CLASS_MISMATCH_PENALTY;
    }

    confidence.clamp(0.0, 100.0)
}

/// 计算建议优先级 (1-5)
///
/// 组成:
/// - 基准 1
/// - 等级权重 (A=+2, B=+1, C=+0)
/// - 紧急 +2
/// - 建议金额超过高价值线 +1
/// - A 类下限 3 (priority_floor)
/// - 钳入 [1, 5]
pub fn compute_priority(strategy: &ClassStrategy, urgent: bool, recommended_value: f64) -> u8 {
    let mut priority = 1u8 + strategy.priority_weight;
    if urgent {
        priority += 2;
    }
    if recommended_value > HIGH_VALUE_THRESHOLD {
        priority += 1;
    }
    priority.max(strategy.priority_floor).clamp(1, 5)
}

/// 预警命中抬升: +1, 封顶 5
pub fn boost_for_alerts(priority: u8, matched_alerts: usize) -> u8 {
    if matched_alerts > 0 {
        (priority + 1).min(5)
    } else {
        priority
    }
}
