// ==========================================
// 采购后台 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: CSV (.csv)，UTF-8，可带 BOM
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::po_importer_trait::{FileParser, ParsedRow};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 校验上传内容（扩展名 / 空文件 / 编码），返回去 BOM 后的文本
    ///
    /// # 参数
    /// - file_name: 原始文件名（仅用于扩展名判断与报错）
    /// - bytes: 文件内容
    pub fn decode_upload(&self, file_name: &str, bytes: &[u8]) -> ImportResult<String> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(file_name.to_string()));
        }

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| ImportError::Encoding(format!("{}: {}", file_name, e)))?;
        let text = strip_bom(&text);

        if text.trim().is_empty() {
            return Err(ImportError::EmptyFile(file_name.to_string()));
        }

        Ok(text.to_string())
    }
}

impl FileParser for CsvParser {
    fn parse_text(&self, text: &str) -> ImportResult<Vec<ParsedRow>> {
        let text = strip_bom(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true) // 首行为表头，丢弃
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let fields: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            // 跳过完全空白的行（行号仍计入）
            if fields.iter().all(|v| v.is_empty()) {
                continue;
            }

            // 文件行号 - 表头行
            let row_index = record
                .position()
                .map(|p| (p.line() as usize).saturating_sub(1))
                .unwrap_or(rows.len() + 1);

            rows.push(ParsedRow { row_index, fields });
        }

        if rows.is_empty() {
            return Err(ImportError::NoDataRows);
        }

        debug!(rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }

    fn parse_file(&self, file_path: &Path) -> ImportResult<Vec<ParsedRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let bytes = std::fs::read(file_path)?;
        let file_name = file_path.display().to_string();
        let text = self.decode_upload(&file_name, &bytes)?;

        self.parse_text(&text)
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_parse_text_drops_header_and_blank_lines() {
        let text = "类型,供应商\nNORMAL,ABC\n\n,\nDIRECT,XYZ\n";
        let rows = CsvParser.parse_text(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["NORMAL", "ABC"]);
        assert_eq!(rows[1].fields, vec!["DIRECT", "XYZ"]);
    }

    #[test]
    fn test_row_index_counts_blank_lines() {
        let text = "类型,供应商\nNORMAL,ABC\n\n,\nDIRECT,XYZ\n";
        let rows = CsvParser.parse_text(text).unwrap();

        assert_eq!(rows[0].row_index, 1);
        assert_eq!(rows[1].row_index, 4);
    }

    #[test]
    fn test_parse_text_quoted_comma() {
        let text = "a,b,c\nNORMAL,\"ABC Suppliers, Inc.\",\"say \"\"hi\"\"\"\n";
        let rows = CsvParser.parse_text(text).unwrap();

        assert_eq!(rows[0].fields[1], "ABC Suppliers, Inc.");
        assert_eq!(rows[0].fields[2], "say \"hi\"");
    }

    #[test]
    fn test_parse_text_strips_bom() {
        let text = "\u{feff}a,b\n1,2\n";
        let rows = CsvParser.parse_text(text).unwrap();

        assert_eq!(rows[0].fields, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(rows[0].row_index, 1);
    }

    #[test]
    fn test_parse_text_header_only_fails() {
        let result = CsvParser.parse_text("a,b,c\n");
        assert!(matches!(result, Err(ImportError::NoDataRows)));
    }

    #[test]
    fn test_decode_upload_rejects_extension() {
        let result = CsvParser.decode_upload("orders.xlsx", b"a,b\n1,2\n");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_upload_rejects_empty() {
        let result = CsvParser.decode_upload("orders.csv", "\u{feff}  \n".as_bytes());
        assert!(matches!(result, Err(ImportError::EmptyFile(_))));
    }

    #[test]
    fn test_decode_upload_rejects_invalid_utf8() {
        let result = CsvParser.decode_upload("orders.csv", &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ImportError::Encoding(_))));
    }

    #[test]
    fn test_parse_file_valid() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "采购类型,供应商名称").unwrap();
        writeln!(temp_file, "NORMAL,ABC").unwrap();

        let rows = CsvParser.parse_file(temp_file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = CsvParser.parse_file(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
