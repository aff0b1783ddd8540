// ==========================================
// 采购后台 - 导入提交器实现
// ==========================================
// 阶段 4: 无错误分组 → 采购单
// 规则:
// - 仅可提交的分组生成采购单（重新核对逐行错误与金额，不只看 has_errors）
// - 全部分组含错误时报错，不生成任何记录
// - 币种取首行（为空时取默认币种）
// - 状态 DRAFT，时间戳统一为提交时刻
// - 单号流水号 = 已有采购单数 + 批内序号，跨批次不重复
// ==========================================

use crate::domain::purchase_order::{
    non_empty, round_cents, ImportedRow, PoPreview, PurchaseOrder, PurchaseOrderLine,
};
use crate::domain::types::{PoStatus, PurchaseType};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::po_importer_trait::ImportCommitter as ImportCommitterTrait;
use crate::importer::row_validator::is_iso_date;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub struct ImportCommitter {
    po_number_prefix: String,
    default_currency: String,
    existing_count: usize, // 已落库采购单数（流水号起点）
}

impl ImportCommitter {
    pub fn new(po_number_prefix: impl Into<String>, default_currency: impl Into<String>) -> Self {
        Self {
            po_number_prefix: po_number_prefix.into(),
            default_currency: default_currency.into(),
            existing_count: 0,
        }
    }

    /// 流水号从 existing_count + 1 开始
    pub fn after_existing(mut self, existing_count: usize) -> Self {
        self.existing_count = existing_count;
        self
    }

    /// 单号: <前缀><YYYYMMDDHHMMSS><流水号:03>
    fn po_number(&self, now: DateTime<Utc>, seq: usize) -> String {
        format!(
            "{}{}{:03}",
            self.po_number_prefix,
            now.format("%Y%m%d%H%M%S"),
            self.existing_count + seq
        )
    }

    fn build_order(
        &self,
        group: &PoPreview,
        now: DateTime<Utc>,
        seq: usize,
    ) -> ImportResult<PurchaseOrder> {
        let purchase_type = group
            .purchase_type
            .parse::<PurchaseType>()
            .map_err(ImportError::InvalidGroup)?;

        if !is_iso_date(&group.expected_delivery_date) {
            return Err(ImportError::InvalidGroup(format!(
                "期望到货日期格式错误: {}",
                group.expected_delivery_date
            )));
        }
        let expected_delivery_date =
            NaiveDate::parse_from_str(&group.expected_delivery_date, "%Y-%m-%d")
                .map_err(|e| ImportError::InvalidGroup(e.to_string()))?;

        let currency = group
            .lines
            .first()
            .and_then(|l| non_empty(&l.currency))
            .unwrap_or_else(|| self.default_currency.clone());

        let lines: Vec<PurchaseOrderLine> = group
            .lines
            .iter()
            .enumerate()
            .map(|(idx, row)| to_order_line(idx + 1, row))
            .collect();

        Ok(PurchaseOrder {
            po_id: Uuid::new_v4().to_string(),
            po_number: self.po_number(now, seq),
            purchase_type,
            priority: non_empty(&group.priority),
            supplier_name: group.supplier_name.clone(),
            supplier_code: non_empty(&group.supplier_code),
            warehouse: group.warehouse.clone(),
            expected_delivery_date,
            latest_ship_time: non_empty(&group.latest_ship_time),
            shipping_method: non_empty(&group.shipping_method),
            trade_term: non_empty(&group.trade_term),
            notes: non_empty(&group.po_notes),
            currency,
            status: PoStatus::Draft,
            total_quantity: group.total_quantity(),
            total_price: group.total_price(),
            item_count: lines.len(),
            lines,
            order_date: now,
            created_at: now,
            updated_at: now,
        })
    }
}

impl ImportCommitterTrait for ImportCommitter {
    fn build_orders(
        &self,
        groups: &[PoPreview],
        now: DateTime<Utc>,
    ) -> ImportResult<(Vec<PurchaseOrder>, usize)> {
        let valid: Vec<&PoPreview> = groups.iter().filter(|g| g.is_importable()).collect();
        let skipped = groups.len() - valid.len();

        if valid.is_empty() {
            return Err(ImportError::NoImportableGroups { skipped });
        }

        let orders = valid
            .into_iter()
            .enumerate()
            .map(|(idx, group)| self.build_order(group, now, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok((orders, skipped))
    }
}

fn to_order_line(line_no: usize, row: &ImportedRow) -> PurchaseOrderLine {
    PurchaseOrderLine {
        line_no,
        sku_code: row.sku_code.clone(),
        product_name: row.product_name.clone(),
        specification: non_empty(&row.specification),
        quantity: row.quantity,
        unit: non_empty(&row.unit),
        unit_price: row.unit_price,
        tax_rate: row.tax_rate,
        amount: round_cents(row.line_amount()),
        notes: non_empty(&row.line_notes),
    }
}
