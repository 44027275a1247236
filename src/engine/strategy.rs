// ==========================================
// 库存采购决策系统 - 等级策略定义
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 步骤5 策略选择
// 用途:
// - 每个 ABC 等级对应一组显式参数 (数据而非继承), 可独立单测;
// - 建议引擎按等级取规则集, 不做等级分支散落。
// ==========================================

use crate::domain::types::{AbcClass, RecommendationType};
use serde::{Deserialize, Serialize};

// ==========================================
// ClassStrategy - 单等级规则集
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassStrategy {
    /// 所属等级
    pub class: AbcClass,

    /// 优先级权重 (A=+2, B=+1, C=+0)
    pub priority_weight: u8,

    /// 优先级下限 (A 类建议不低于 3)
    pub priority_floor: u8,

    /// 非紧急时的首选建议类型
    pub preferred_type: RecommendationType,

    /// 成本比较/退化时的备选建议类型
    pub fallback_type: RecommendationType,

    /// 非紧急状态下的基线断货风险 (A > B > C)
    pub baseline_stockout_risk: f64,
}

impl ClassStrategy {
    /// 取等级对应的规则集
    ///
    /// 规则 (依据 Procurement_Engine_Specs 4.2 步骤5):
    /// - A 类: 紧急则 urgent_restock, 否则 just_in_time / planned_restock; 优先级下限 3
    /// - B 类: planned_restock 或 bulk_purchase, 按订货+持有总成本择优
    /// - C 类: bulk_purchase 或 supplier_consolidation, 大批量低频次
    pub fn for_class(class: AbcClass) -> Self {
        match class {
            AbcClass::A => Self {
                class,
                priority_weight: 2,
                priority_floor: 3,
                preferred_type: RecommendationType::JustInTime,
                fallback_type: RecommendationType::PlannedRestock,
                baseline_stockout_risk: 0.15,
            },
            AbcClass::B => Self {
                class,
                priority_weight: 1,
                priority_floor: 1,
                preferred_type: RecommendationType::PlannedRestock,
                fallback_type: RecommendationType::BulkPurchase,
                baseline_stockout_risk: 0.10,
            },
            AbcClass::C => Self {
                class,
                priority_weight: 0,
                priority_floor: 1,
                preferred_type: RecommendationType::BulkPurchase,
                fallback_type: RecommendationType::SupplierConsolidation,
                baseline_stockout_risk: 0.05,
            },
        }
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_a_ruleset() {
        let s = ClassStrategy::for_class(AbcClass::A);
        assert_eq!(s.priority_weight, 2);
        assert_eq!(s.priority_floor, 3);
        assert_eq!(s.preferred_type, RecommendationType::JustInTime);
    }

    #[test]
    fn test_baseline_risk_ordering() {
        // 基线断货风险 A > B > C
        let a = ClassStrategy::for_class(AbcClass::A).baseline_stockout_risk;
        let b = ClassStrategy::for_class(AbcClass::B).baseline_stockout_risk;
        let c = ClassStrategy::for_class(AbcClass::C).baseline_stockout_risk;
        assert!(a > b && b > c);
    }

    #[test]
    fn test_class_c_prefers_bulk() {
        let s = ClassStrategy::for_class(AbcClass::C);
        assert_eq!(s.preferred_type, RecommendationType::BulkPurchase);
        assert_eq!(s.fallback_type, RecommendationType::SupplierConsolidation);
        assert_eq!(s.priority_weight, 0);
    }
}
