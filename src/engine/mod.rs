// ==========================================
// 库存采购决策系统 - 引擎层
// ==========================================
// 职责: 业务规则计算 (分类 + 建议), 无状态, 无数据访问
// 红线: 引擎对输入只读, 数据形状问题降级处理, 整批永不失败
// ==========================================

// ABC 分类引擎
pub mod classifier;

// EOQ 与财务口径计算
pub mod costing;

// 采购建议引擎
pub mod recommender;

// 等级策略定义
pub mod strategy;

// 重导出引擎入口
pub use classifier::AbcClassifier;
pub use recommender::ProcurementRecommender;
pub use strategy::ClassStrategy;
