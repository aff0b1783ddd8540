// ==========================================
// 采购后台 - 字段映射器实现
// ==========================================
// 阶段 1: 列位置 → 具名字段
// 约定: 19 列固定顺序，缺列视为空，多余列忽略
// ==========================================

use crate::domain::purchase_order::RawImportRecord;
use crate::importer::po_importer_trait::FieldMapper as FieldMapperTrait;

/// 导入文件列定义（顺序即列位置）
pub const COLUMNS: [&str; 19] = [
    "采购类型*",
    "优先级",
    "供应商名称*",
    "供应商编码",
    "收货仓库*",
    "期望到货日期*",
    "最晚发货时间",
    "运输方式",
    "贸易条款",
    "采购单备注",
    "SKU编码*",
    "产品名称*",
    "规格",
    "数量*",
    "单位",
    "币种",
    "单价*",
    "税率(%)",
    "行备注",
];

pub mod col {
    pub const PURCHASE_TYPE: usize = 0;
    pub const PRIORITY: usize = 1;
    pub const SUPPLIER_NAME: usize = 2;
    pub const SUPPLIER_CODE: usize = 3;
    pub const WAREHOUSE: usize = 4;
    pub const EXPECTED_DELIVERY_DATE: usize = 5;
    pub const LATEST_SHIP_TIME: usize = 6;
    pub const SHIPPING_METHOD: usize = 7;
    pub const TRADE_TERM: usize = 8;
    pub const PO_NOTES: usize = 9;
    pub const SKU_CODE: usize = 10;
    pub const PRODUCT_NAME: usize = 11;
    pub const SPECIFICATION: usize = 12;
    pub const QUANTITY: usize = 13;
    pub const UNIT: usize = 14;
    pub const CURRENCY: usize = 15;
    pub const UNIT_PRICE: usize = 16;
    pub const TAX_RATE: usize = 17;
    pub const LINE_NOTES: usize = 18;
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_record(&self, fields: &[String], row_index: usize) -> RawImportRecord {
        let get = |idx: usize| -> String {
            fields
                .get(idx)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        RawImportRecord {
            row_index,
            purchase_type: get(col::PURCHASE_TYPE),
            priority: get(col::PRIORITY),
            supplier_name: get(col::SUPPLIER_NAME),
            supplier_code: get(col::SUPPLIER_CODE),
            warehouse: get(col::WAREHOUSE),
            expected_delivery_date: get(col::EXPECTED_DELIVERY_DATE),
            latest_ship_time: get(col::LATEST_SHIP_TIME),
            shipping_method: get(col::SHIPPING_METHOD),
            trade_term: get(col::TRADE_TERM),
            po_notes: get(col::PO_NOTES),
            sku_code: get(col::SKU_CODE),
            product_name: get(col::PRODUCT_NAME),
            specification: get(col::SPECIFICATION),
            quantity: get(col::QUANTITY),
            unit: get(col::UNIT),
            currency: get(col::CURRENCY),
            unit_price: get(col::UNIT_PRICE),
            tax_rate: get(col::TAX_RATE),
            line_notes: get(col::LINE_NOTES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_field_mapper_positional() {
        let row = fields(&[
            "NORMAL", "HIGH", "ABC", "SUP-001", "Main", "2024-04-30", "", "SEA", "FOB", "n",
            "SKU-1", "Widget", "10cm", "100", "pcs", "USD", "9.5", "13", "line",
        ]);

        let record = FieldMapper.map_to_record(&row, 3);

        assert_eq!(record.row_index, 3);
        assert_eq!(record.purchase_type, "NORMAL");
        assert_eq!(record.supplier_code, "SUP-001");
        assert_eq!(record.sku_code, "SKU-1");
        assert_eq!(record.quantity, "100");
        assert_eq!(record.line_notes, "line");
    }

    #[test]
    fn test_field_mapper_short_row_pads_empty() {
        let record = FieldMapper.map_to_record(&fields(&["NORMAL", "  ", "ABC"]), 1);

        assert_eq!(record.supplier_name, "ABC");
        assert_eq!(record.priority, "");
        assert_eq!(record.warehouse, "");
        assert_eq!(record.line_notes, "");
    }

    #[test]
    fn test_columns_match_indices() {
        assert_eq!(COLUMNS.len(), col::LINE_NOTES + 1);
        assert_eq!(COLUMNS[col::QUANTITY], "数量*");
    }
}
