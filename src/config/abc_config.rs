// ==========================================
// 库存采购决策系统 - ABC 分类配置
// ==========================================
// 依据: Procurement_Engine_Specs.md - ABCAnalysisConfig
// 红线: 越界配置一律钳制修正, 不拒绝不报错
// ==========================================

use crate::domain::types::AbcCriteria;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ===== 默认值 =====
pub const DEFAULT_CLASS_A_THRESHOLD: f64 = 80.0;
pub const DEFAULT_CLASS_B_THRESHOLD: f64 = 15.0;
pub const DEFAULT_MIN_VALUE: f64 = 100.0;

// ==========================================
// AbcAnalysisConfig - ABC 分类配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbcAnalysisConfig {
    /// 分类主准则
    #[serde(default)]
    pub primary_criteria: AbcCriteria,

    /// A 类累计百分比阈值 (0, 100]
    #[serde(default = "default_class_a_threshold")]
    pub class_a_threshold: f64,

    /// B 类累计百分比增量阈值, A+B ≤ 100
    #[serde(default = "default_class_b_threshold")]
    pub class_b_threshold: f64,

    /// 是否纳入停用物料
    #[serde(default)]
    pub include_inactive: bool,

    /// 年消耗金额过滤下限
    #[serde(default = "default_min_value")]
    pub min_value: f64,
}

fn default_class_a_threshold() -> f64 {
    DEFAULT_CLASS_A_THRESHOLD
}

fn default_class_b_threshold() -> f64 {
    DEFAULT_CLASS_B_THRESHOLD
}

fn default_min_value() -> f64 {
    DEFAULT_MIN_VALUE
}

impl Default for AbcAnalysisConfig {
    fn default() -> Self {
        Self {
            primary_criteria: AbcCriteria::default(),
            class_a_threshold: DEFAULT_CLASS_A_THRESHOLD,
            class_b_threshold: DEFAULT_CLASS_B_THRESHOLD,
            include_inactive: false,
            min_value: DEFAULT_MIN_VALUE,
        }
    }
}

impl AbcAnalysisConfig {
    /// 钳制为合法配置
    ///
    /// 规则:
    /// 1) class_a_threshold 钳入 (0, 100], 非有限值回落默认
    /// 2) class_b_threshold 钳入 (0, 100], 非有限值回落默认
    /// 3) class_a + class_b > 100 → class_b 压缩到 100 − class_a
    /// 4) min_value < 0 或非有限 → 0
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();

        cfg.class_a_threshold =
            clamp_threshold(cfg.class_a_threshold, DEFAULT_CLASS_A_THRESHOLD);
        cfg.class_b_threshold =
            clamp_threshold(cfg.class_b_threshold, DEFAULT_CLASS_B_THRESHOLD);

        if cfg.class_a_threshold + cfg.class_b_threshold > 100.0 {
            cfg.class_b_threshold = 100.0 - cfg.class_a_threshold;
        }

        cfg.min_value = if cfg.min_value.is_finite() {
            cfg.min_value.max(0.0)
        } else {
            0.0
        };

        if cfg.class_a_threshold != self.class_a_threshold
            || cfg.class_b_threshold != self.class_b_threshold
            || cfg.min_value != self.min_value
        {
            debug!(
                class_a = cfg.class_a_threshold,
                class_b = cfg.class_b_threshold,
                min_value = cfg.min_value,
                "ABC 配置越界, 已钳制修正"
            );
        }

        cfg
    }
}

/// 阈值钳入 (0, 100]; 非有限值回落默认值
fn clamp_threshold(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    if value <= 0.0 {
        return fallback;
    }
    value.min(100.0)
}
