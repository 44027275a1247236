// ==========================================
// 库存采购决策系统 - 领域类型定义
// ==========================================
// 依据: Procurement_Engine_Specs.md - 数据模型
// 红线: 分类是"等级制"(A/B/C), 不是连续评分
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EngineError;

// ==========================================
// ABC 分类等级 (ABC Class)
// ==========================================
// 顺序: A > B > C (价值贡献递减)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A, // 高价值 (帕累托头部)
    B, // 中价值
    C, // 低价值 (长尾)
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbcClass::A => write!(f, "A"),
            AbcClass::B => write!(f, "B"),
            AbcClass::C => write!(f, "C"),
        }
    }
}

// ==========================================
// 分类主准则 (ABC Criteria)
// ==========================================
// 决定排名值的计算口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbcCriteria {
    Revenue,   // 年消耗金额 (annual_consumption × unit_cost)
    Quantity,  // 年消耗数量
    Frequency, // 消耗频次
    Cost,      // 单价
}

impl AbcCriteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcCriteria::Revenue => "revenue",
            AbcCriteria::Quantity => "quantity",
            AbcCriteria::Frequency => "frequency",
            AbcCriteria::Cost => "cost",
        }
    }
}

impl Default for AbcCriteria {
    fn default() -> Self {
        AbcCriteria::Revenue
    }
}

impl FromStr for AbcCriteria {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "revenue" => Ok(AbcCriteria::Revenue),
            "quantity" => Ok(AbcCriteria::Quantity),
            "frequency" => Ok(AbcCriteria::Frequency),
            "cost" => Ok(AbcCriteria::Cost),
            other => Err(EngineError::UnknownCriteria(other.to_string())),
        }
    }
}

// ==========================================
// 采购建议类型 (Recommendation Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    UrgentRestock,         // 紧急补货 (断货/覆盖不足)
    PlannedRestock,        // 计划补货
    BulkPurchase,          // 批量采购 (EOQ 驱动)
    JustInTime,            // 准时化小批量 (A类常态)
    SupplierConsolidation, // 供应商合并采购 (C类长尾)
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::UrgentRestock => "urgent_restock",
            RecommendationType::PlannedRestock => "planned_restock",
            RecommendationType::BulkPurchase => "bulk_purchase",
            RecommendationType::JustInTime => "just_in_time",
            RecommendationType::SupplierConsolidation => "supplier_consolidation",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 预警严重度 (Alert Severity)
// ==========================================
// 顺序: Info < Warning < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,     // 提示
    Warning,  // 关注
    High,     // 紧急
    Critical, // 红线
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::High => write!(f, "high"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 预警类型 (Alert Type)
// ==========================================
// 引擎只读输入预警的 item_id/severity;
// BudgetRequired/SupplierContactNeeded 由引擎建议生成, 落库由预警子系统负责
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,              // 低库存
    Stockout,              // 断货
    Overstock,             // 积压
    BudgetRequired,        // 需要预算审批 (大额采购)
    SupplierContactNeeded, // 需要联系供应商 (合并采购)
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LowStock => "low_stock",
            AlertType::Stockout => "stockout",
            AlertType::Overstock => "overstock",
            AlertType::BudgetRequired => "budget_required",
            AlertType::SupplierContactNeeded => "supplier_contact_needed",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
