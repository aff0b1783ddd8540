// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、CSV 文本构造、样例采购单
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use po_backoffice::db::{init_schema, open_sqlite_connection};
use po_backoffice::domain::{PoStatus, PurchaseOrder, PurchaseOrderLine, PurchaseType};
use po_backoffice::importer::field_mapper::{col, COLUMNS};
use std::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时路径不是 UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 写入临时 CSV 文件（保留 .csv 后缀）
pub fn write_temp_csv(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// 一行合法数据（NORMAL / Acme / WH-A / 2024-06-01）
pub fn valid_row(sku: &str, quantity: &str, unit_price: &str) -> Vec<String> {
    let mut row = vec![String::new(); COLUMNS.len()];
    row[col::PURCHASE_TYPE] = "NORMAL".to_string();
    row[col::SUPPLIER_NAME] = "Acme".to_string();
    row[col::WAREHOUSE] = "WH-A".to_string();
    row[col::EXPECTED_DELIVERY_DATE] = "2024-06-01".to_string();
    row[col::SKU_CODE] = sku.to_string();
    row[col::PRODUCT_NAME] = format!("Product {}", sku);
    row[col::QUANTITY] = quantity.to_string();
    row[col::UNIT_PRICE] = unit_price.to_string();
    row[col::TAX_RATE] = "13".to_string();
    row
}

/// 覆盖某一列
pub fn with_col(mut row: Vec<String>, idx: usize, value: &str) -> Vec<String> {
    row[idx] = value.to_string();
    row
}

/// 表头 + 数据行 → CSV 文本
pub fn build_csv(rows: &[Vec<String>]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS).expect("写入表头失败");
    for row in rows {
        writer.write_record(row).expect("写入数据行失败");
    }
    String::from_utf8(writer.into_inner().expect("flush 失败")).expect("非 UTF-8")
}

/// 构造样例采购单
pub fn sample_order(po_id: &str, po_number: &str) -> PurchaseOrder {
    let ts = Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap();

    PurchaseOrder {
        po_id: po_id.to_string(),
        po_number: po_number.to_string(),
        purchase_type: PurchaseType::Normal,
        priority: Some("HIGH".to_string()),
        supplier_name: "Acme".to_string(),
        supplier_code: None,
        warehouse: "WH-A".to_string(),
        expected_delivery_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        latest_ship_time: None,
        shipping_method: Some("SEA".to_string()),
        trade_term: None,
        notes: None,
        currency: "CNY".to_string(),
        status: PoStatus::Draft,
        total_quantity: 10,
        total_price: 113.0,
        item_count: 1,
        lines: vec![PurchaseOrderLine {
            line_no: 1,
            sku_code: "SKU-1".to_string(),
            product_name: "Widget".to_string(),
            specification: None,
            quantity: 10,
            unit: Some("pcs".to_string()),
            unit_price: 10.0,
            tax_rate: 13.0,
            amount: 113.0,
            notes: None,
        }],
        order_date: ts,
        created_at: ts,
        updated_at: ts,
    }
}
