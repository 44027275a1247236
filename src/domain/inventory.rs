// ==========================================
// 库存采购决策系统 - 库存领域模型
// ==========================================
// 依据: Procurement_Engine_Specs.md - InventoryRecord/MaterialABC/SmartAlert
// 红线: InventoryRecord 是持久层快照, 引擎层只读
// ==========================================

use crate::domain::types::{AbcClass, AlertSeverity, AlertType};
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryRecord - 库存记录快照
// ==========================================
// 用途: 持久层传入, 单次分析内不可变
// 生命周期: 仅一次引擎调用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    // ===== 主键 =====
    pub id: String, // 物料唯一标识

    // ===== 基础信息 =====
    pub name: String,                 // 物料名称
    pub item_type: String,            // 物料类型
    pub unit: String,                 // 计量单位
    pub category: String,             // 物料分类
    #[serde(default)]
    pub supplier: Option<String>,     // 供应商 (合并采购分组键)

    // ===== 库存与成本 =====
    pub current_stock: f64,           // 当前库存
    pub unit_cost: f64,               // 单价
    #[serde(default)]
    pub min_stock: Option<f64>,       // 最小库存 (安全库存兜底基数)

    // ===== 消耗口径 (可选字段, 缺失按 0 处理) =====
    #[serde(default)]
    pub monthly_consumption: Option<f64>,   // 月消耗量
    #[serde(default)]
    pub annual_consumption: Option<f64>,    // 年消耗量
    #[serde(default)]
    pub consumption_frequency: Option<f64>, // 消耗频次 (次/年)

    // ===== 状态 =====
    #[serde(default = "default_active")]
    pub is_active: bool, // 是否在用 (停用物料默认不参与分类)
}

fn default_active() -> bool {
    true
}

impl InventoryRecord {
    /// 解析年消耗量
    ///
    /// 口径 (命中即返回):
    /// 1) annual_consumption 存在 → 直接使用
    /// 2) monthly_consumption 存在 → ×12 折算
    /// 3) 均缺失 → 0
    pub fn resolved_annual_consumption(&self) -> f64 {
        match (self.annual_consumption, self.monthly_consumption) {
            (Some(annual), _) if annual.is_finite() => annual.max(0.0),
            (None, Some(monthly)) if monthly.is_finite() => (monthly * 12.0).max(0.0),
            _ => 0.0,
        }
    }

    /// 单价 (结构性问题就地修正: 负值/非有限值钳制为 0)
    pub fn sanitized_unit_cost(&self) -> f64 {
        if self.unit_cost.is_finite() {
            self.unit_cost.max(0.0)
        } else {
            0.0
        }
    }

    /// 最小库存 (缺失按 0)
    pub fn min_stock_or_zero(&self) -> f64 {
        match self.min_stock {
            Some(v) if v.is_finite() => v.max(0.0),
            _ => 0.0,
        }
    }
}

// ==========================================
// MaterialAbc - 带分类标注的物料
// ==========================================
// 用途: 分类引擎写入, 建议引擎只读
// 生命周期: 仅一次分析运行, 不落库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialAbc {
    // ===== 源记录 =====
    pub record: InventoryRecord,

    // ===== 分类引擎输出 =====
    pub abc_class: AbcClass,        // ABC 等级
    pub annual_consumption: f64,    // 解析后的年消耗量
    pub annual_value: f64,          // 年消耗金额 (annual_consumption × unit_cost)
    pub ranking_value: f64,         // 按主准则计算的排名值
    pub revenue_percentage: f64,    // 占总值百分比 (0-100)
    pub cumulative_revenue: f64,    // 累计百分比 (0-100)
    pub total_stock_value: f64,     // 当前库存金额 (current_stock × unit_cost)
}

// ==========================================
// SmartAlert - 外部预警 (只读输入)
// ==========================================
// 红线: 引擎不修改预警, 只读 item_id/severity 做优先级抬升
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartAlert {
    pub id: String,                 // 预警 ID
    pub alert_type: AlertType,      // 预警类型
    pub severity: AlertSeverity,    // 严重度
    pub item_id: String,            // 关联物料 ID
    pub current_value: f64,         // 触发时的观测值
    pub threshold_value: f64,       // 触发阈值
    pub recommended_action: String, // 建议动作 (预警子系统生成)
}

// ==========================================
// ProposedAlert - 引擎建议生成的新预警
// ==========================================
// 用途: 写入 result.new_alerts_to_generate, 落库由预警子系统负责
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedAlert {
    pub id: String,                 // 新预警 ID (UUID)
    pub alert_type: AlertType,      // budget_required / supplier_contact_needed
    pub severity: AlertSeverity,    // 与金额规模成比例
    pub item_id: String,            // 关联物料 ID
    pub current_value: f64,         // 建议采购金额
    pub threshold_value: f64,       // 触发阈值 (大额采购线)
    pub recommended_action: String, // 建议动作描述
}
