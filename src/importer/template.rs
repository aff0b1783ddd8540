// ==========================================
// 采购后台 - 导入模板生成
// ==========================================
// 输出: 带 BOM 的 UTF-8 CSV（便于表格软件直接打开）
// 示例: 前两行共用分组键 → 合并为 1 张采购单；第三行单独成单
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::COLUMNS;
use csv::WriterBuilder;

const EXAMPLE_ROWS: [[&str; 19]; 3] = [
    [
        "NORMAL",
        "HIGH",
        "ABC Suppliers Inc.",
        "SUP-001",
        "Main Warehouse",
        "2024-04-30",
        "2024-04-20 18:00",
        "SEA",
        "FOB",
        "Q2 replenishment, batch 1",
        "SKU-LAPTOP-01",
        "Laptop",
        "14 inch, 16GB",
        "100",
        "pcs",
        "USD",
        "999.00",
        "13",
        "",
    ],
    [
        "NORMAL",
        "HIGH",
        "ABC Suppliers Inc.",
        "SUP-001",
        "Main Warehouse",
        "2024-04-30",
        "2024-04-20 18:00",
        "SEA",
        "FOB",
        "Q2 replenishment, batch 1",
        "SKU-LAPTOP-02",
        "Laptop Pro",
        "16 inch, 32GB",
        "50",
        "pcs",
        "USD",
        "1999.00",
        "13",
        "same order as the row above",
    ],
    [
        "DIRECT",
        "NORMAL",
        "XYZ Trading Co.",
        "SUP-002",
        "East Warehouse",
        "2024-05-15",
        "",
        "EXPRESS",
        "DAP",
        "",
        "SKU-MOUSE-01",
        "Wireless Mouse",
        "",
        "500",
        "pcs",
        "CNY",
        "59.90",
        "13",
        "",
    ],
];

/// 生成导入模板 CSV 文本
pub fn generate_template() -> ImportResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for row in EXAMPLE_ROWS.iter() {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::InternalError(format!("模板写入失败: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| ImportError::InternalError(format!("模板编码失败: {}", e)))?;

    Ok(format!("\u{feff}{}", body))
}

/// 模板中不同分组键的数量
pub fn template_group_count() -> usize {
    let mut keys: Vec<(&str, &str, &str, &str)> = EXAMPLE_ROWS
        .iter()
        .map(|r| (r[0], r[2], r[4], r[5]))
        .collect();
    keys.sort();
    keys.dedup();
    keys.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_bom_and_header() {
        let text = generate_template().unwrap();

        assert!(text.starts_with('\u{feff}'));
        let header = text.trim_start_matches('\u{feff}').lines().next().unwrap();
        assert_eq!(header.split(',').count(), COLUMNS.len());
    }

    #[test]
    fn test_template_quotes_embedded_commas() {
        let text = generate_template().unwrap();
        assert!(text.contains("\"14 inch, 16GB\""));
    }

    #[test]
    fn test_template_group_count() {
        assert_eq!(template_group_count(), 2);
    }
}
