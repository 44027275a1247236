// ==========================================
// 库存采购决策系统 - EOQ 与财务口径计算
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 步骤1-4/7, GLOSSARY EOQ
// 职责: 纯函数计算, 退化输入降级处理 (跳过/归零), 永不报错
// ==========================================

use crate::config::procurement_config::EPSILON;
use crate::config::ProcurementEngineConfig;

/// 日消耗率
///
/// 口径 (命中即返回):
/// 1) annual_consumption > 0 → / 365
/// 2) monthly_consumption > 0 → / 30
/// 3) 均缺失 → 0
pub fn daily_consumption(annual_consumption: f64, monthly_consumption: Option<f64>) -> f64 {
    if annual_consumption > 0.0 {
        return annual_consumption / 365.0;
    }
    match monthly_consumption {
        Some(monthly) if monthly.is_finite() && monthly > 0.0 => monthly / 30.0,
        _ => 0.0,
    }
}

/// 安全库存
///
/// safety_stock = multiplier × daily × lead_time;
/// 日消耗为 0 时退化为 min_stock × multiplier
pub fn safety_stock(daily: f64, min_stock: f64, cfg: &ProcurementEngineConfig) -> f64 {
    if daily > 0.0 {
        cfg.safety_stock_multiplier * daily * cfg.lead_time_buffer
    } else {
        min_stock * cfg.safety_stock_multiplier
    }
}

/// 覆盖天数 (除零保护: 日消耗下限 EPSILON)
pub fn days_of_supply(current_stock: f64, daily: f64) -> f64 {
    current_stock.max(0.0) / daily.max(EPSILON)
}

/// 单位年持有成本 H = carrying_cost_percentage/100 × unit_cost
///
/// H 为 0 时垫高到 EPSILON, 避免 EOQ 除零
pub fn holding_cost_per_unit(unit_cost: f64, cfg: &ProcurementEngineConfig) -> f64 {
    let h = cfg.carrying_cost_percentage / 100.0 * unit_cost.max(0.0);
    h.max(EPSILON)
}

/// 经济订货量 EOQ = sqrt(2DS/H)
///
/// 退化输入 (D ≤ 0 或单价 ≤ 0) → None, 该物料跳过批量采购候选
pub fn economic_order_quantity(
    annual_consumption: f64,
    unit_cost: f64,
    cfg: &ProcurementEngineConfig,
) -> Option<f64> {
    if annual_consumption <= 0.0 || unit_cost <= 0.0 {
        return None;
    }
    let h = holding_cost_per_unit(unit_cost, cfg);
    let eoq = (2.0 * annual_consumption * cfg.ordering_cost_per_order / h).sqrt();
    if eoq.is_finite() {
        Some(eoq)
    } else {
        None
    }
}

/// 订货策略年总成本 = D/q × S + q/2 × H
///
/// q ≤ 0 时按 EPSILON 兜底 (仅用于成本比较, 不产生建议量)
pub fn annual_policy_cost(
    quantity: f64,
    annual_consumption: f64,
    holding_cost: f64,
    cfg: &ProcurementEngineConfig,
) -> f64 {
    let q = quantity.max(EPSILON);
    annual_consumption / q * cfg.ordering_cost_per_order + q / 2.0 * holding_cost
}

/// 持有成本 = 平均库存 × H = (current + recommended)/2 × H
pub fn carrying_cost(current_stock: f64, recommended_quantity: f64, holding_cost: f64) -> f64 {
    (current_stock.max(0.0) + recommended_quantity.max(0.0)) / 2.0 * holding_cost
}

/// 紧急物料断货风险 = clamp(1 − days_of_supply/lead_time, 0, 1)
pub fn urgent_stockout_risk(days_of_supply: f64, lead_time_buffer: f64) -> f64 {
    if lead_time_buffer <= 0.0 {
        return 1.0;
    }
    (1.0 - days_of_supply / lead_time_buffer).clamp(0.0, 1.0)
}

/// 机会成本 = 断货风险 × 建议金额 × 断货成本倍数
pub fn opportunity_cost(
    stockout_risk: f64,
    recommended_value: f64,
    cfg: &ProcurementEngineConfig,
) -> f64 {
    stockout_risk * recommended_value.max(0.0) * cfg.stockout_cost_multiplier
}

/// EOQ 优化节约 = max(朴素月批订货成本 − EOQ 策略成本, 0)
///
/// 朴素口径: 每月一批, q_naive = D/12
pub fn eoq_savings(
    eoq: f64,
    annual_consumption: f64,
    unit_cost: f64,
    cfg: &ProcurementEngineConfig,
) -> f64 {
    if annual_consumption <= 0.0 || eoq <= 0.0 {
        return 0.0;
    }
    let h = holding_cost_per_unit(unit_cost, cfg);
    let naive_quantity = annual_consumption / 12.0;
    let naive_cost = annual_policy_cost(naive_quantity, annual_consumption, h, cfg);
    let eoq_cost = annual_policy_cost(eoq, annual_consumption, h, cfg);
    (naive_cost - eoq_cost).max(0.0)
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ProcurementEngineConfig {
        ProcurementEngineConfig::default()
    }

    #[test]
    fn test_daily_consumption_fallback_chain() {
        assert_eq!(daily_consumption(365.0, None), 1.0);
        assert_eq!(daily_consumption(0.0, Some(30.0)), 1.0);
        assert_eq!(daily_consumption(0.0, None), 0.0);
    }

    #[test]
    fn test_safety_stock_min_stock_fallback() {
        let cfg = cfg();
        // 日消耗 2, 缓冲 7 天, 倍数 1.5 → 21
        assert!((safety_stock(2.0, 0.0, &cfg) - 21.0).abs() < 1e-9);
        // 日消耗 0 → min_stock × 1.5
        assert!((safety_stock(0.0, 10.0, &cfg) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_eoq_scaling_with_ordering_cost() {
        // EOQ 比例性质: S 翻倍 → EOQ 乘 √2
        let base = cfg();
        let doubled = ProcurementEngineConfig {
            ordering_cost_per_order: base.ordering_cost_per_order * 2.0,
            ..base.clone()
        };

        let eoq1 = economic_order_quantity(1200.0, 25.0, &base).unwrap();
        let eoq2 = economic_order_quantity(1200.0, 25.0, &doubled).unwrap();

        assert!((eoq2 / eoq1 - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_eoq_scaling_with_annual_consumption() {
        // EOQ 比例性质: D 翻倍 → EOQ 乘 √2
        let cfg = cfg();
        let eoq1 = economic_order_quantity(600.0, 25.0, &cfg).unwrap();
        let eoq2 = economic_order_quantity(1200.0, 25.0, &cfg).unwrap();
        assert!((eoq2 / eoq1 - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_eoq_degenerate_inputs_skipped() {
        let cfg = cfg();
        assert!(economic_order_quantity(0.0, 25.0, &cfg).is_none());
        assert!(economic_order_quantity(-10.0, 25.0, &cfg).is_none());
        assert!(economic_order_quantity(1000.0, 0.0, &cfg).is_none());
    }

    #[test]
    fn test_eoq_zero_carrying_cost_does_not_divide_by_zero() {
        // H = 0 垫高到 EPSILON, EOQ 有限
        let cfg = ProcurementEngineConfig {
            carrying_cost_percentage: 0.0,
            ..cfg()
        };
        let eoq = economic_order_quantity(1000.0, 25.0, &cfg).unwrap();
        assert!(eoq.is_finite() && eoq > 0.0);
    }

    #[test]
    fn test_urgent_stockout_risk_bounds() {
        assert_eq!(urgent_stockout_risk(0.0, 7.0), 1.0);
        assert_eq!(urgent_stockout_risk(7.0, 7.0), 0.0);
        assert_eq!(urgent_stockout_risk(14.0, 7.0), 0.0); // 钳制下界
        assert!((urgent_stockout_risk(3.5, 7.0) - 0.5).abs() < 1e-9);
        assert_eq!(urgent_stockout_risk(1.0, 0.0), 1.0); // 零缓冲期
    }

    #[test]
    fn test_eoq_savings_non_negative() {
        let cfg = cfg();
        let eoq = economic_order_quantity(1200.0, 25.0, &cfg).unwrap();
        assert!(eoq_savings(eoq, 1200.0, 25.0, &cfg) >= 0.0);
        // EOQ 是最优解: 任何其他批量的成本不低于 EOQ 成本
        let h = holding_cost_per_unit(25.0, &cfg);
        let eoq_cost = annual_policy_cost(eoq, 1200.0, h, &cfg);
        let naive_cost = annual_policy_cost(100.0, 1200.0, h, &cfg);
        assert!(naive_cost >= eoq_cost - 1e-9);
    }

    #[test]
    fn test_days_of_supply_zero_daily() {
        // 日消耗为 0 → 覆盖天数极大 (非紧急), 不除零
        let days = days_of_supply(100.0, 0.0);
        assert!(days.is_finite() && days > 1e6);
    }
}
