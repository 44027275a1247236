// ==========================================
// 库存采购决策系统 - ABC 分类引擎
// ==========================================
// 依据: Procurement_Engine_Specs.md - 4.1 Classifier
// 红线: 同准则下等级与排名值降序严格单调, 无低排名 A 类
// ==========================================
// 职责: 过滤 → 按主准则排名 → 累计百分比走查定级
// 输入: 库存记录快照 + ABC 配置
// 输出: AbcAnalysisResult (A/B/C 分区)
// ==========================================

use crate::config::AbcAnalysisConfig;
use crate::domain::analysis::AbcAnalysisResult;
use crate::domain::inventory::{InventoryRecord, MaterialAbc};
use crate::domain::types::{AbcClass, AbcCriteria};
use tracing::instrument;

// 累计百分比边界容差 (浮点累加误差)
const BOUNDARY_EPS: f64 = 1e-9;

// ==========================================
// AbcClassifier - ABC 分类引擎
// ==========================================
pub struct AbcClassifier {
    // 无状态引擎, 不需要注入依赖
}

impl AbcClassifier {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行 ABC 分类
    ///
    /// 步骤 (依据 Procurement_Engine_Specs 4.1):
    /// 1) 过滤: 停用物料 (除非 include_inactive) + 年消耗金额低于 min_value
    /// 2) 排名值: 按 primary_criteria 计算, 缺失字段按 0, 负单价钳制为 0
    /// 3) 排序: 排名值降序, 同值按 id 升序 (确定性要求)
    /// 4) 走查: 累计百分比 ≤ A 阈值 → A; ≤ A+B → B; 其余 → C (含边界)
    ///
    /// 边界处理:
    /// - 总值 V = 0 (全零值或过滤后为空) → 全部 C 类, 百分比为 0
    /// - 空输入 → 空结果, 永不报错
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub fn classify(
        &self,
        items: Vec<InventoryRecord>,
        cfg: &AbcAnalysisConfig,
    ) -> AbcAnalysisResult {
        let cfg = cfg.normalized();

        // 1. 过滤 + 预计算
        let mut candidates: Vec<Candidate> = items
            .into_iter()
            .filter(|r| cfg.include_inactive || r.is_active)
            .filter_map(|record| {
                let annual_consumption = record.resolved_annual_consumption();
                let unit_cost = record.sanitized_unit_cost();
                let annual_value = annual_consumption * unit_cost;

                // 年消耗金额过滤 (准则无关, 切换准则时过滤口径稳定)
                if annual_value < cfg.min_value {
                    return None;
                }

                let ranking_value =
                    Self::ranking_value(&record, annual_consumption, unit_cost, cfg.primary_criteria);

                Some(Candidate {
                    record,
                    annual_consumption,
                    annual_value,
                    unit_cost,
                    ranking_value,
                })
            })
            .collect();

        if candidates.is_empty() {
            return AbcAnalysisResult::empty();
        }

        // 2. 排名值降序, 同值按 id 升序
        candidates.sort_by(|a, b| {
            b.ranking_value
                .total_cmp(&a.ranking_value)
                .then_with(|| a.record.id.cmp(&b.record.id))
        });

        // 3. 总值与走查定级
        let total_value: f64 = candidates.iter().map(|c| c.ranking_value).sum();
        let total_items_analyzed = candidates.len();

        let mut result = AbcAnalysisResult::empty();
        result.total_value = total_value;
        result.total_items_analyzed = total_items_analyzed;

        let mut cumulative = 0.0;
        let class_ab_threshold = cfg.class_a_threshold + cfg.class_b_threshold;

        for candidate in candidates {
            let (abc_class, revenue_percentage, cumulative_revenue) = if total_value > 0.0 {
                cumulative += candidate.ranking_value;
                let pct = candidate.ranking_value / total_value * 100.0;
                let cum_pct = cumulative / total_value * 100.0;

                // 含边界: 恰好触线的物料落入被跨越的等级
                let class = if cum_pct <= cfg.class_a_threshold + BOUNDARY_EPS {
                    AbcClass::A
                } else if cum_pct <= class_ab_threshold + BOUNDARY_EPS {
                    AbcClass::B
                } else {
                    AbcClass::C
                };
                (class, pct, cum_pct)
            } else {
                // 退化输入: 全零值 → 全部 C 类
                (AbcClass::C, 0.0, 0.0)
            };

            let total_stock_value =
                candidate.record.current_stock.max(0.0) * candidate.unit_cost;

            let material = MaterialAbc {
                abc_class,
                annual_consumption: candidate.annual_consumption,
                annual_value: candidate.annual_value,
                ranking_value: candidate.ranking_value,
                revenue_percentage,
                cumulative_revenue,
                total_stock_value,
                record: candidate.record,
            };

            match abc_class {
                AbcClass::A => result.class_a.push(material),
                AbcClass::B => result.class_b.push(material),
                AbcClass::C => result.class_c.push(material),
            }
        }

        result
    }

    // ==========================================
    // 排名值计算
    // ==========================================

    /// 按主准则计算排名值
    ///
    /// 口径:
    /// - revenue: annual_consumption × unit_cost
    /// - quantity: annual_consumption
    /// - frequency: consumption_frequency (缺失按 0)
    /// - cost: unit_cost
    fn ranking_value(
        record: &InventoryRecord,
        annual_consumption: f64,
        unit_cost: f64,
        criteria: AbcCriteria,
    ) -> f64 {
        let value = match criteria {
            AbcCriteria::Revenue => annual_consumption * unit_cost,
            AbcCriteria::Quantity => annual_consumption,
            AbcCriteria::Frequency => record.consumption_frequency.unwrap_or(0.0),
            AbcCriteria::Cost => unit_cost,
        };

        if value.is_finite() {
            value.max(0.0)
        } else {
            0.0
        }
    }
}

// 过滤后的候选物料 (排序/走查中间产物)
struct Candidate {
    record: InventoryRecord,
    annual_consumption: f64,
    annual_value: f64,
    unit_cost: f64,
    ranking_value: f64,
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AbcClassifier {
    fn default() -> Self {
        Self::new()
    }
}
