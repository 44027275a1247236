// ==========================================
// 库存采购决策系统 - 配置层
// ==========================================
// 职责: 引擎配置定义与钳制修正
// 红线: 配置越界不报错, 钳制后回显给调用方
// ==========================================

pub mod abc_config;
pub mod procurement_config;

// 重导出核心配置
pub use abc_config::AbcAnalysisConfig;
pub use procurement_config::{
    ProcurementEngineConfig, CONSOLIDATION_VALUE_THRESHOLD, EPSILON, HIGH_VALUE_THRESHOLD,
    LARGE_PURCHASE_THRESHOLD,
};
