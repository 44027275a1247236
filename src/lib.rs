// ==========================================
// 库存采购决策系统 - 核心库
// ==========================================
// 依据: Procurement_Engine_Specs.md - 系统宪法
// 系统定位: 决策支持系统 (建议仅供参考, 人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 引擎配置
pub mod config;

// 引擎层 - 业务规则
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AbcClass, AbcCriteria, AlertSeverity, AlertType, RecommendationType};

// 领域实体
pub use domain::{
    AbcAnalysisResult, InventoryRecord, MaterialAbc, MetricsByClass, ProcurementAnalysisResult,
    ProcurementRecommendation, ProposedAlert, SmartAlert, SupplierOpportunity,
};

// 配置
pub use config::{AbcAnalysisConfig, ProcurementEngineConfig};

// 引擎
pub use engine::{AbcClassifier, ClassStrategy, ProcurementRecommender};

// ==========================================
// 错误类型
// ==========================================

use thiserror::Error;

/// 引擎层错误
///
/// 引擎对数据形状问题一律降级处理, 错误仅出现在调用方输入解析场景
#[derive(Debug, Error)]
pub enum EngineError {
    /// 未知的分类主准则 (解析字符串配置时)
    #[error("未知的分类主准则: {0}")]
    UnknownCriteria(String),

    /// 配置序列化/反序列化失败
    #[error("配置解析失败: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存采购决策系统";

// ==========================================
// 预编译检查
// ==========================================
