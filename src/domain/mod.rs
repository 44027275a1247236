// ==========================================
// 库存采购决策系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod analysis;
pub mod inventory;
pub mod types;

// 重导出核心类型
pub use analysis::{
    AbcAnalysisResult, ClassMetrics, MetricsByClass, ProcurementAnalysisResult,
    ProcurementRecommendation, SupplierOpportunity,
};
pub use inventory::{InventoryRecord, MaterialAbc, ProposedAlert, SmartAlert};
pub use types::{AbcClass, AbcCriteria, AlertSeverity, AlertType, RecommendationType};
