// ==========================================
// 库存采购决策系统 - 分析结果模型
// ==========================================
// 依据: Procurement_Engine_Specs.md - ABCAnalysisResult/ProcurementAnalysisResult
// 用途: 引擎输出, UI 渲染与预警子系统消费
// ==========================================

use crate::config::ProcurementEngineConfig;
use crate::domain::inventory::{MaterialAbc, ProposedAlert};
use crate::domain::types::{AbcClass, RecommendationType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// AbcAnalysisResult - ABC 分类结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbcAnalysisResult {
    pub class_a: Vec<MaterialAbc>, // A 类 (按排名值降序)
    pub class_b: Vec<MaterialAbc>, // B 类
    pub class_c: Vec<MaterialAbc>, // C 类
    pub total_value: f64,          // 排名值总和 V
    pub total_items_analyzed: usize, // 过滤后参与分类的物料数
}

impl AbcAnalysisResult {
    /// 空结果 (空输入/全部被过滤时返回, 永不报错)
    pub fn empty() -> Self {
        Self {
            class_a: Vec::new(),
            class_b: Vec::new(),
            class_c: Vec::new(),
            total_value: 0.0,
            total_items_analyzed: 0,
        }
    }

    /// 按排名顺序拍平为单列表 (A → B → C)
    ///
    /// 建议引擎的标准输入口径
    pub fn all_items(&self) -> Vec<MaterialAbc> {
        let mut all =
            Vec::with_capacity(self.class_a.len() + self.class_b.len() + self.class_c.len());
        all.extend(self.class_a.iter().cloned());
        all.extend(self.class_b.iter().cloned());
        all.extend(self.class_c.iter().cloned());
        all
    }
}

// ==========================================
// ProcurementRecommendation - 单条采购建议
// ==========================================
// 不变量: 1 ≤ priority ≤ 5, 0 ≤ confidence ≤ 100, recommended_quantity ≥ 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementRecommendation {
    // ===== 关联 =====
    pub item_id: String,   // 物料 ID
    pub item_name: String, // 物料名称 (UI 免关联查询)
    pub abc_class: AbcClass,

    // ===== 建议内容 =====
    pub rec_type: RecommendationType, // 建议类型
    pub recommended_quantity: f64,    // 建议采购数量 (≥0)
    pub recommended_value: f64,       // 建议采购金额 (quantity × unit_cost)

    // ===== 排序与置信 =====
    pub priority: u8,    // 优先级 1-5 (5 最高)
    pub confidence: f64, // 置信度 0-100
    pub urgent: bool,    // 紧急标志 (断货或覆盖天数不足)

    // ===== 财务口径 =====
    pub carrying_cost: f64,    // 持有成本
    pub opportunity_cost: f64, // 机会成本 (断货风险 × 金额 × 倍数)
    pub stockout_risk: f64,    // 断货风险 0-1

    // ===== 时间口径 =====
    pub optimal_order_date: NaiveDate, // 最优下单日期 (不早于 today)
    pub estimated_delivery_days: f64,  // 预计交付天数 (lead_time_buffer 占位)

    // ===== 预警联动 =====
    pub related_alerts: Vec<String>, // 命中的预警 ID

    // ===== 可解释性 =====
    pub reason: String, // JSON 格式的建议原因
}

// ==========================================
// ClassMetrics - 单等级聚合指标
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub count: usize,      // 保留建议条数
    pub total_value: f64,  // 保留建议金额合计
}

// ==========================================
// MetricsByClass - 按 A/B/C 聚合
// ==========================================
// 三个等级恒存在, 无建议时为零值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsByClass {
    pub class_a: ClassMetrics,
    pub class_b: ClassMetrics,
    pub class_c: ClassMetrics,
}

impl MetricsByClass {
    /// 累加一条保留建议
    pub fn add(&mut self, class: AbcClass, value: f64) {
        let m = match class {
            AbcClass::A => &mut self.class_a,
            AbcClass::B => &mut self.class_b,
            AbcClass::C => &mut self.class_c,
        };
        m.count += 1;
        m.total_value += value;
    }
}

// ==========================================
// SupplierOpportunity - 供应商合并采购机会
// ==========================================
// 条件: 同供应商保留建议 ≥ 2 条 且 合计金额超过合并阈值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierOpportunity {
    pub supplier: String,       // 供应商
    pub item_ids: Vec<String>,  // 覆盖物料 (ID 升序)
    pub item_count: usize,      // 物料数
    pub combined_value: f64,    // 合计建议金额
}

// ==========================================
// ProcurementAnalysisResult - 采购分析结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementAnalysisResult {
    // ===== 审计 =====
    pub generated_at: DateTime<Utc>,        // 生成时间
    pub config: ProcurementEngineConfig,    // 回显的已钳制配置
    pub total_items_analyzed: usize,        // 输入物料数

    // ===== 建议分桶 (桶内: priority 降序 → value 降序 → item_id 升序) =====
    pub urgent_recommendations: Vec<ProcurementRecommendation>,      // 紧急
    pub planned_recommendations: Vec<ProcurementRecommendation>,     // 计划
    pub opportunity_recommendations: Vec<ProcurementRecommendation>, // 机会 (批量/合并)

    // ===== 汇总指标 =====
    pub total_recommended_investment: f64, // Σ recommended_value (保留建议)
    pub estimated_total_savings: f64,      // Σ (朴素订货成本 − EOQ 优化成本)
    pub average_confidence: f64,           // 保留建议平均置信度 (无建议为 0)
    pub metrics_by_class: MetricsByClass,  // 按等级聚合

    // ===== 协作输出 =====
    pub supplier_opportunities: Vec<SupplierOpportunity>, // 合并采购机会
    pub triggered_by_alerts: Vec<String>,                 // 命中建议的预警 ID
    pub new_alerts_to_generate: Vec<ProposedAlert>,       // 建议新增的预警 (未落库)
}

impl ProcurementAnalysisResult {
    /// 空结果 (空输入时返回, 永不报错)
    pub fn empty(config: ProcurementEngineConfig, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            config,
            total_items_analyzed: 0,
            urgent_recommendations: Vec::new(),
            planned_recommendations: Vec::new(),
            opportunity_recommendations: Vec::new(),
            total_recommended_investment: 0.0,
            estimated_total_savings: 0.0,
            average_confidence: 0.0,
            metrics_by_class: MetricsByClass::default(),
            supplier_opportunities: Vec::new(),
            triggered_by_alerts: Vec::new(),
            new_alerts_to_generate: Vec::new(),
        }
    }

    /// 保留建议总条数 (三桶合计)
    pub fn retained_count(&self) -> usize {
        self.urgent_recommendations.len()
            + self.planned_recommendations.len()
            + self.opportunity_recommendations.len()
    }
}
