// ==========================================
// 库存采购决策系统 - 采购引擎配置
// ==========================================
// 依据: Procurement_Engine_Specs.md - ProcurementEngineConfig
// 红线: 越界配置一律钳制修正, 钳制后的值回显在结果中
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::debug;

// ===== 默认值 =====
pub const DEFAULT_LEAD_TIME_BUFFER: f64 = 7.0;
pub const DEFAULT_SAFETY_STOCK_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_ORDERING_COST_PER_ORDER: f64 = 150.0;
pub const DEFAULT_CARRYING_COST_PERCENTAGE: f64 = 25.0;
pub const DEFAULT_STOCKOUT_COST_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 30.0;

// ===== 命名阈值常量 =====
// 高价值建议线: recommended_value 超过则优先级 +1
pub const HIGH_VALUE_THRESHOLD: f64 = 10_000.0;
// 大额采购线: recommended_value 超过则建议生成新预警
pub const LARGE_PURCHASE_THRESHOLD: f64 = 50_000.0;
// 供应商合并线: 同供应商合计金额超过则输出合并机会
pub const CONSOLIDATION_VALUE_THRESHOLD: f64 = 5_000.0;
// 除零保护下限
pub const EPSILON: f64 = 1e-6;

// ==========================================
// ProcurementEngineConfig - 采购引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementEngineConfig {
    /// 交付缓冲期 (天, ≥0)
    #[serde(default = "default_lead_time_buffer")]
    pub lead_time_buffer: f64,

    /// 安全库存倍数 (>0)
    #[serde(default = "default_safety_stock_multiplier")]
    pub safety_stock_multiplier: f64,

    /// 单次订货成本 S (≥0)
    #[serde(default = "default_ordering_cost_per_order")]
    pub ordering_cost_per_order: f64,

    /// 年持有成本率 (0-100, 单价百分比)
    #[serde(default = "default_carrying_cost_percentage")]
    pub carrying_cost_percentage: f64,

    /// 断货成本倍数 (≥0)
    #[serde(default = "default_stockout_cost_multiplier")]
    pub stockout_cost_multiplier: f64,

    /// 置信度下限 (0-100), 低于则丢弃建议
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// 全局建议条数上限 (0 = 不限)
    #[serde(default)]
    pub max_recommendations: usize,
}

fn default_lead_time_buffer() -> f64 {
    DEFAULT_LEAD_TIME_BUFFER
}

fn default_safety_stock_multiplier() -> f64 {
    DEFAULT_SAFETY_STOCK_MULTIPLIER
}

fn default_ordering_cost_per_order() -> f64 {
    DEFAULT_ORDERING_COST_PER_ORDER
}

fn default_carrying_cost_percentage() -> f64 {
    DEFAULT_CARRYING_COST_PERCENTAGE
}

fn default_stockout_cost_multiplier() -> f64 {
    DEFAULT_STOCKOUT_COST_MULTIPLIER
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

impl Default for ProcurementEngineConfig {
    fn default() -> Self {
        Self {
            lead_time_buffer: DEFAULT_LEAD_TIME_BUFFER,
            safety_stock_multiplier: DEFAULT_SAFETY_STOCK_MULTIPLIER,
            ordering_cost_per_order: DEFAULT_ORDERING_COST_PER_ORDER,
            carrying_cost_percentage: DEFAULT_CARRYING_COST_PERCENTAGE,
            stockout_cost_multiplier: DEFAULT_STOCKOUT_COST_MULTIPLIER,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_recommendations: 0,
        }
    }
}

impl ProcurementEngineConfig {
    /// 钳制为合法配置
    ///
    /// 规则 (越界就近修正, 永不报错):
    /// 1) lead_time_buffer < 0 → 0; 非有限值回落默认
    /// 2) safety_stock_multiplier ≤ 0 → 默认值 (必须 > 0)
    /// 3) ordering_cost_per_order < 0 → 0
    /// 4) carrying_cost_percentage 钳入 [0, 100]
    /// 5) stockout_cost_multiplier < 0 → 0
    /// 6) confidence_threshold 钳入 [0, 100]
    pub fn normalized(&self) -> Self {
        let cfg = Self {
            lead_time_buffer: clamp_min(self.lead_time_buffer, 0.0, DEFAULT_LEAD_TIME_BUFFER),
            safety_stock_multiplier: if self.safety_stock_multiplier.is_finite()
                && self.safety_stock_multiplier > 0.0
            {
                self.safety_stock_multiplier
            } else {
                DEFAULT_SAFETY_STOCK_MULTIPLIER
            },
            ordering_cost_per_order: clamp_min(
                self.ordering_cost_per_order,
                0.0,
                DEFAULT_ORDERING_COST_PER_ORDER,
            ),
            carrying_cost_percentage: clamp_range(
                self.carrying_cost_percentage,
                0.0,
                100.0,
                DEFAULT_CARRYING_COST_PERCENTAGE,
            ),
            stockout_cost_multiplier: clamp_min(
                self.stockout_cost_multiplier,
                0.0,
                DEFAULT_STOCKOUT_COST_MULTIPLIER,
            ),
            confidence_threshold: clamp_range(
                self.confidence_threshold,
                0.0,
                100.0,
                DEFAULT_CONFIDENCE_THRESHOLD,
            ),
            max_recommendations: self.max_recommendations,
        };

        if cfg != *self {
            debug!(?cfg, "采购引擎配置越界, 已钳制修正");
        }

        cfg
    }
}

/// 下限钳制; 非有限值回落默认值
fn clamp_min(value: f64, min: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        fallback
    }
}

/// 区间钳制; 非有限值回落默认值
fn clamp_range(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
