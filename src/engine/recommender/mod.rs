// ==========================================
// 库存采购决策系统 - 采购建议引擎
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.2 Recommender
// ==========================================
// 职责: 消费分类输出 + 外部预警, 产出优先级化采购建议
// ==========================================

mod aggregate;
mod core;
mod scoring;


pub use self::core::ProcurementRecommender;
