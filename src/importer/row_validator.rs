// ==========================================
// 采购后台 - 行校验器实现
// ==========================================
// 阶段 2: 行级校验 + 类型转换
// 规则:
// - 采购类型 ∈ {NORMAL, DIRECT, FACTORY_DIRECT}
// - 供应商名称 / 收货仓库 / SKU编码 / 产品名称 必填
// - 期望到货日期 YYYY-MM-DD
// - 数量为正整数（非法归一为 0 并报错）
// - 单价为非负数（非法归一为 0 并报错）
// - 税率非法时取默认税率，不报错
// - 含税行金额必须为有限数
// ==========================================

use crate::domain::purchase_order::{ImportedRow, RawImportRecord};
use crate::domain::types::PurchaseType;
use crate::importer::po_importer_trait::RowValidator as RowValidatorTrait;
use chrono::NaiveDate;

pub struct RowValidator {
    default_tax_rate: f64, // 默认税率（%）
}

impl RowValidator {
    pub fn new(default_tax_rate: f64) -> Self {
        Self { default_tax_rate }
    }
}

impl RowValidatorTrait for RowValidator {
    fn validate(&self, record: RawImportRecord) -> ImportedRow {
        let mut errors = Vec::new();

        if let Err(message) = record.purchase_type.parse::<PurchaseType>() {
            errors.push(message);
        }

        require(&mut errors, &record.supplier_name, "供应商名称");
        require(&mut errors, &record.warehouse, "收货仓库");

        if !is_iso_date(&record.expected_delivery_date) {
            errors.push(format!(
                "期望到货日期格式错误，应为 YYYY-MM-DD，实际: '{}'",
                record.expected_delivery_date
            ));
        }

        require(&mut errors, &record.sku_code, "SKU编码");
        require(&mut errors, &record.product_name, "产品名称");

        let quantity = match record.quantity.parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => {
                errors.push(format!("数量必须为正整数，实际: '{}'", record.quantity));
                0
            }
        };

        let unit_price = match record.unit_price.parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => p,
            _ => {
                errors.push(format!("单价必须为非负数，实际: '{}'", record.unit_price));
                0.0
            }
        };

        let tax_rate = record
            .tax_rate
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .unwrap_or(self.default_tax_rate);

        let line_amount = quantity as f64 * unit_price * (1.0 + tax_rate / 100.0);
        if !line_amount.is_finite() {
            errors.push(format!(
                "行金额超出范围: 数量 '{}' × 单价 '{}'",
                record.quantity, record.unit_price
            ));
        }

        ImportedRow {
            row_index: record.row_index,
            errors,
            purchase_type: record.purchase_type,
            priority: record.priority,
            supplier_name: record.supplier_name,
            supplier_code: record.supplier_code,
            warehouse: record.warehouse,
            expected_delivery_date: record.expected_delivery_date,
            latest_ship_time: record.latest_ship_time,
            shipping_method: record.shipping_method,
            trade_term: record.trade_term,
            po_notes: record.po_notes,
            sku_code: record.sku_code,
            product_name: record.product_name,
            specification: record.specification,
            quantity,
            unit: record.unit,
            currency: record.currency,
            unit_price,
            tax_rate,
            line_notes: record.line_notes,
        }
    }
}

fn require(errors: &mut Vec<String>, value: &str, field: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{}不能为空", field));
    }
}

/// 固定格式 YYYY-MM-DD 且为合法日历日期
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    shape_ok && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> RawImportRecord {
        RawImportRecord {
            row_index: 1,
            purchase_type: "NORMAL".to_string(),
            supplier_name: "ABC Suppliers Inc.".to_string(),
            warehouse: "Main Warehouse".to_string(),
            expected_delivery_date: "2024-04-30".to_string(),
            sku_code: "SKU-001".to_string(),
            product_name: "Laptop".to_string(),
            quantity: "100".to_string(),
            unit_price: "999.00".to_string(),
            tax_rate: "13".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_row_has_no_errors() {
        let row = RowValidator::new(13.0).validate(valid_record());

        assert!(row.errors.is_empty(), "unexpected errors: {:?}", row.errors);
        assert_eq!(row.quantity, 100);
        assert_eq!(row.unit_price, 999.0);
        assert_eq!(row.tax_rate, 13.0);
    }

    #[test]
    fn test_bogus_purchase_type() {
        let mut record = valid_record();
        record.purchase_type = "BOGUS".to_string();

        let row = RowValidator::new(13.0).validate(record);

        assert_eq!(row.errors.len(), 1);
        assert!(row.errors[0].contains("NORMAL"));
        assert!(row.errors[0].contains("DIRECT"));
        assert!(row.errors[0].contains("FACTORY_DIRECT"));
    }

    #[test]
    fn test_missing_required_fields() {
        let mut record = valid_record();
        record.supplier_name.clear();
        record.warehouse.clear();
        record.sku_code.clear();
        record.product_name.clear();

        let row = RowValidator::new(13.0).validate(record);

        assert_eq!(row.errors.len(), 4);
        assert!(row.errors.iter().any(|e| e.contains("供应商名称")));
        assert!(row.errors.iter().any(|e| e.contains("收货仓库")));
        assert!(row.errors.iter().any(|e| e.contains("SKU编码")));
        assert!(row.errors.iter().any(|e| e.contains("产品名称")));
    }

    #[test]
    fn test_invalid_quantity_normalizes_to_zero() {
        for raw in ["0", "-5", "abc", "", "2.5"] {
            let mut record = valid_record();
            record.quantity = raw.to_string();

            let row = RowValidator::new(13.0).validate(record);

            assert_eq!(row.quantity, 0, "raw={}", raw);
            assert!(row.errors.iter().any(|e| e.contains("数量")), "raw={}", raw);
        }
    }

    #[test]
    fn test_invalid_price_normalizes_to_zero() {
        for raw in ["-1", "abc", "", "NaN"] {
            let mut record = valid_record();
            record.unit_price = raw.to_string();

            let row = RowValidator::new(13.0).validate(record);

            assert_eq!(row.unit_price, 0.0, "raw={}", raw);
            assert!(row.errors.iter().any(|e| e.contains("单价")), "raw={}", raw);
        }
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let mut record = valid_record();
        record.unit_price = "0".to_string();

        let row = RowValidator::new(13.0).validate(record);
        assert!(row.is_valid());
    }

    #[test]
    fn test_invalid_tax_defaults_without_error() {
        let mut record = valid_record();
        record.tax_rate = "n/a".to_string();

        let row = RowValidator::new(9.0).validate(record);

        assert!(row.is_valid());
        assert_eq!(row.tax_rate, 9.0);
    }

    #[test]
    fn test_overflowing_line_amount_is_rejected() {
        let mut record = valid_record();
        record.quantity = "10".to_string();
        record.unit_price = "1e308".to_string();

        let row = RowValidator::new(13.0).validate(record);

        assert_eq!(row.errors.len(), 1, "errors: {:?}", row.errors);
        assert!(row.errors[0].contains("行金额超出范围"));
    }

    #[test]
    fn test_huge_tax_rate_overflow_is_rejected() {
        let mut record = valid_record();
        record.tax_rate = "1e308".to_string();

        let row = RowValidator::new(13.0).validate(record);
        assert!(!row.is_valid());
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_iso_date("2024-04-30"));
        assert!(!is_iso_date("2024/04/30"));
        assert!(!is_iso_date("2024-4-30"));
        assert!(!is_iso_date("20240430"));
        assert!(!is_iso_date("2024-02-30"));
        assert!(!is_iso_date(""));
    }
}
