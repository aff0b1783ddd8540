// ==========================================
// 采购后台 - 采购单领域模型
// ==========================================
// 职责: 导入中间结构（ImportedRow / PoPreview）与落库实体（PurchaseOrder）
// 红线: 含错误行的分组永不转为 PurchaseOrder
// ==========================================

use crate::domain::types::{PoStatus, PurchaseType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RawImportRecord - 列位置映射结果
// ==========================================
// 用途: 文件解析 → 字段映射 → 此结构（全部为原始文本，未做类型转换）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImportRecord {
    pub row_index: usize,
    pub purchase_type: String,
    pub priority: String,
    pub supplier_name: String,
    pub supplier_code: String,
    pub warehouse: String,
    pub expected_delivery_date: String,
    pub latest_ship_time: String,
    pub shipping_method: String,
    pub trade_term: String,
    pub po_notes: String,
    pub sku_code: String,
    pub product_name: String,
    pub specification: String,
    pub quantity: String,
    pub unit: String,
    pub currency: String,
    pub unit_price: String,
    pub tax_rate: String,
    pub line_notes: String,
}

// ==========================================
// ImportedRow - 导入中间结构体
// ==========================================
// 用途: CSV 一行数据（已按列位置映射为具名字段）
// 生命周期: 仅在导入预览流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportedRow {
    // 元信息
    pub row_index: usize,    // 数据行号（1 起，不含表头）
    pub errors: Vec<String>, // 校验错误（空 = 通过）

    // ===== 采购单表头字段 =====
    pub purchase_type: String,
    pub priority: String,
    pub supplier_name: String,
    pub supplier_code: String,
    pub warehouse: String,
    pub expected_delivery_date: String, // YYYY-MM-DD
    pub latest_ship_time: String,
    pub shipping_method: String,
    pub trade_term: String,
    pub po_notes: String,

    // ===== 采购单行字段 =====
    pub sku_code: String,
    pub product_name: String,
    pub specification: String,
    pub quantity: u32, // 非法值归一为 0（同时带错误）
    pub unit: String,
    pub currency: String,
    pub unit_price: f64, // 非法值归一为 0（同时带错误）
    pub tax_rate: f64,   // 百分比，非法值取默认税率（不报错）
    pub line_notes: String,
}

impl ImportedRow {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// 分组键: (采购类型, 供应商名称, 收货仓库, 期望到货日期)
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            purchase_type: self.purchase_type.clone(),
            supplier_name: self.supplier_name.clone(),
            warehouse: self.warehouse.clone(),
            expected_delivery_date: self.expected_delivery_date.clone(),
        }
    }

    /// 含税行金额 = 数量 × 单价 × (1 + 税率/100)
    pub fn line_amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price * (1.0 + self.tax_rate / 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub purchase_type: String,
    pub supplier_name: String,
    pub warehouse: String,
    pub expected_delivery_date: String,
}

// ==========================================
// PoPreview - 采购单预览（一个分组）
// ==========================================
// 表头字段取自组内首行；has_errors 为组内任一行有错
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoPreview {
    pub purchase_type: String,
    pub priority: String,
    pub supplier_name: String,
    pub supplier_code: String,
    pub warehouse: String,
    pub expected_delivery_date: String,
    pub latest_ship_time: String,
    pub shipping_method: String,
    pub trade_term: String,
    pub po_notes: String,
    pub lines: Vec<ImportedRow>,
    pub has_errors: bool,
}

impl PoPreview {
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }

    pub fn total_price(&self) -> f64 {
        round_cents(self.lines.iter().map(ImportedRow::line_amount).sum())
    }

    pub fn error_row_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_valid()).count()
    }

    /// 可提交: 标记与逐行错误均为空，且数值满足行/合计约束
    ///
    /// 预览可能经调用方回传，提交前不信任 has_errors 标记。
    pub fn is_importable(&self) -> bool {
        !self.has_errors
            && !self.lines.is_empty()
            && self.lines.iter().all(|l| {
                l.is_valid()
                    && l.quantity > 0
                    && l.unit_price.is_finite()
                    && l.unit_price >= 0.0
                    && l.line_amount().is_finite()
            })
            && self
                .lines
                .iter()
                .map(ImportedRow::line_amount)
                .sum::<f64>()
                .is_finite()
    }
}

// ==========================================
// PurchaseOrder - 采购单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    // ===== 主键 =====
    pub po_id: String,     // UUID
    pub po_number: String, // 单号（按时间生成）

    // ===== 表头 =====
    pub purchase_type: PurchaseType,
    pub priority: Option<String>,
    pub supplier_name: String,
    pub supplier_code: Option<String>,
    pub warehouse: String,
    pub expected_delivery_date: NaiveDate,
    pub latest_ship_time: Option<String>,
    pub shipping_method: Option<String>,
    pub trade_term: Option<String>,
    pub notes: Option<String>,
    pub currency: String,

    // ===== 状态与汇总 =====
    pub status: PoStatus,
    pub total_quantity: u64,
    pub total_price: f64, // 含税总额，保留两位小数
    pub item_count: usize,
    pub lines: Vec<PurchaseOrderLine>,

    // ===== 审计字段 =====
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub line_no: usize,
    pub sku_code: String,
    pub product_name: String,
    pub specification: Option<String>,
    pub quantity: u32,
    pub unit: Option<String>,
    pub unit_price: f64,
    pub tax_rate: f64,
    pub amount: f64, // 含税行金额
    pub notes: Option<String>,
}

// ==========================================
// CommitSummary - 导入提交结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub created: usize,
    pub skipped: usize,
    pub po_numbers: Vec<String>,
}

/// 金额保留两位小数
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 空白字符串 → None
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
