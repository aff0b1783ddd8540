// ==========================================
// 采购后台 - 分组聚合器实现
// ==========================================
// 阶段 3: 行 → 采购单预览
// 分组键: (采购类型, 供应商名称, 收货仓库, 期望到货日期)
// 表头一致性: 同组非首行的表头字段与首行不一致时，在该行追加错误
// 合计金额: 组内含税合计溢出时，在末行追加错误
// ==========================================

use crate::domain::purchase_order::{GroupKey, ImportedRow, PoPreview};
use crate::importer::po_importer_trait::GroupAggregator as GroupAggregatorTrait;
use std::collections::HashMap;

pub struct GroupAggregator;

impl GroupAggregatorTrait for GroupAggregator {
    fn group(&self, rows: Vec<ImportedRow>) -> Vec<PoPreview> {
        let mut index_by_key: HashMap<GroupKey, usize> = HashMap::new();
        let mut buckets: Vec<Vec<ImportedRow>> = Vec::new();

        for row in rows {
            let key = row.group_key();
            match index_by_key.get(&key) {
                Some(&idx) => buckets[idx].push(row),
                None => {
                    index_by_key.insert(key, buckets.len());
                    buckets.push(vec![row]);
                }
            }
        }

        buckets.into_iter().filter_map(build_preview).collect()
    }
}

/// 表头专属字段（分组键以外、要求组内一致的字段）
/// 币种属于明细列，不参与一致性检查（采购单币种取首行）
fn header_fields(row: &ImportedRow) -> [(&'static str, &str); 6] {
    [
        ("优先级", row.priority.as_str()),
        ("供应商编码", row.supplier_code.as_str()),
        ("最晚发货时间", row.latest_ship_time.as_str()),
        ("运输方式", row.shipping_method.as_str()),
        ("贸易条款", row.trade_term.as_str()),
        ("采购单备注", row.po_notes.as_str()),
    ]
}

/// 列出与首行不一致的表头字段名
fn divergent_fields(first: &ImportedRow, row: &ImportedRow) -> Vec<&'static str> {
    header_fields(first)
        .iter()
        .zip(header_fields(row).iter())
        .filter(|((_, a), (_, b))| a != b)
        .map(|((name, _), _)| *name)
        .collect()
}

fn build_preview(mut lines: Vec<ImportedRow>) -> Option<PoPreview> {
    let first = lines.first()?.clone();

    for line in lines.iter_mut().skip(1) {
        let divergent = divergent_fields(&first, line);
        if !divergent.is_empty() {
            line.errors.push(format!(
                "表头字段与同组第 {} 行不一致: {}",
                first.row_index,
                divergent.join("、")
            ));
        }
    }

    let total: f64 = lines.iter().map(ImportedRow::line_amount).sum();
    if !total.is_finite() {
        if let Some(last) = lines.last_mut() {
            last.errors.push("采购单合计金额超出范围".to_string());
        }
    }

    let has_errors = lines.iter().any(|l| !l.is_valid());

    Some(PoPreview {
        purchase_type: first.purchase_type,
        priority: first.priority,
        supplier_name: first.supplier_name,
        supplier_code: first.supplier_code,
        warehouse: first.warehouse,
        expected_delivery_date: first.expected_delivery_date,
        latest_ship_time: first.latest_ship_time,
        shipping_method: first.shipping_method,
        trade_term: first.trade_term,
        po_notes: first.po_notes,
        lines,
        has_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_row(row_index: usize, supplier: &str, date: &str) -> ImportedRow {
        ImportedRow {
            row_index,
            purchase_type: "NORMAL".to_string(),
            supplier_name: supplier.to_string(),
            warehouse: "Main Warehouse".to_string(),
            expected_delivery_date: date.to_string(),
            sku_code: format!("SKU-{}", row_index),
            product_name: "Widget".to_string(),
            quantity: 1,
            unit_price: 1.0,
            tax_rate: 13.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_by_key_in_first_seen_order() {
        let rows = vec![
            create_test_row(1, "B", "2024-04-30"),
            create_test_row(2, "A", "2024-04-30"),
            create_test_row(3, "B", "2024-04-30"),
            create_test_row(4, "B", "2024-05-01"),
        ];

        let groups = GroupAggregator.group(rows);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].supplier_name, "B");
        assert_eq!(groups[0].lines.len(), 2);
        assert_eq!(groups[1].supplier_name, "A");
        assert_eq!(groups[2].expected_delivery_date, "2024-05-01");
    }

    #[test]
    fn test_grouping_ignores_row_order() {
        let forward = vec![
            create_test_row(1, "A", "2024-04-30"),
            create_test_row(2, "B", "2024-04-30"),
            create_test_row(3, "A", "2024-04-30"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let members = |groups: Vec<PoPreview>, supplier: &str| -> Vec<usize> {
            let mut idx: Vec<usize> = groups
                .into_iter()
                .find(|g| g.supplier_name == supplier)
                .map(|g| g.lines.iter().map(|l| l.row_index).collect())
                .unwrap_or_default();
            idx.sort();
            idx
        };

        assert_eq!(
            members(GroupAggregator.group(forward), "A"),
            members(GroupAggregator.group(reversed), "A")
        );
    }

    #[test]
    fn test_has_errors_when_any_member_errored() {
        let mut bad = create_test_row(2, "A", "2024-04-30");
        bad.errors.push("数量必须为正整数".to_string());

        let groups = GroupAggregator.group(vec![
            create_test_row(1, "A", "2024-04-30"),
            bad,
            create_test_row(3, "C", "2024-04-30"),
        ]);

        assert!(groups[0].has_errors);
        assert!(!groups[1].has_errors);
    }

    #[test]
    fn test_divergent_header_flags_later_row() {
        let first = create_test_row(1, "A", "2024-04-30");
        let mut second = create_test_row(2, "A", "2024-04-30");
        second.priority = "URGENT".to_string();
        second.trade_term = "CIF".to_string();

        let groups = GroupAggregator.group(vec![first, second]);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].has_errors);
        assert!(groups[0].lines[0].errors.is_empty());
        let message = &groups[0].lines[1].errors[0];
        assert!(message.contains("优先级"));
        assert!(message.contains("贸易条款"));
    }

    #[test]
    fn test_mixed_currency_is_not_a_header_conflict() {
        let mut first = create_test_row(1, "A", "2024-04-30");
        first.currency = "USD".to_string();
        let mut second = create_test_row(2, "A", "2024-04-30");
        second.currency = "EUR".to_string();

        let groups = GroupAggregator.group(vec![first, second]);

        assert!(!groups[0].has_errors);
        assert!(groups[0].lines.iter().all(|l| l.errors.is_empty()));
    }

    #[test]
    fn test_overflowing_group_total_is_flagged() {
        let mut first = create_test_row(1, "A", "2024-04-30");
        first.quantity = 1_000_000;
        first.unit_price = 1.0e302;
        let mut second = first.clone();
        second.row_index = 2;

        // 单行有限，合计溢出
        assert!(first.line_amount().is_finite());

        let groups = GroupAggregator.group(vec![first, second]);

        assert!(groups[0].has_errors);
        assert!(groups[0].lines[0].errors.is_empty());
        assert_eq!(groups[0].lines[1].errors, vec!["采购单合计金额超出范围"]);
    }

    #[test]
    fn test_header_copied_from_first_row() {
        let mut first = create_test_row(1, "A", "2024-04-30");
        first.shipping_method = "SEA".to_string();
        let mut second = create_test_row(2, "A", "2024-04-30");
        second.shipping_method = "SEA".to_string();

        let groups = GroupAggregator.group(vec![first, second]);

        assert_eq!(groups[0].shipping_method, "SEA");
        assert!(!groups[0].has_errors);
    }
}
