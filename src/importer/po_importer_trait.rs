// ==========================================
// 采购后台 - 采购单导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解析 → 列映射 → 行校验 → 分组 → （人工确认）→ 提交
// ==========================================

use crate::domain::purchase_order::{
    CommitSummary, ImportedRow, PoPreview, PurchaseOrder, RawImportRecord,
};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

// ==========================================
// PurchaseOrderImporter Trait
// ==========================================
// 用途: 采购单批量导入主接口
// 实现者: PurchaseOrderImporterImpl
#[async_trait]
pub trait PurchaseOrderImporter: Send + Sync {
    /// 从 CSV 文件生成导入预览
    ///
    /// # 返回
    /// - Ok(ImportPreview): 分组预览（含逐行错误）
    /// - Err: 文件格式错误（扩展名/空文件/编码/无数据行）
    async fn preview_csv_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportPreview>;

    /// 从已读取的文件内容生成导入预览
    async fn preview_csv_text(&self, text: &str) -> ImportResult<ImportPreview>;

    /// 提交预览结果（仅无错误分组落库）
    ///
    /// # 返回
    /// - Ok(CommitSummary): 创建数 / 跳过数 / 单号
    /// - Err(NoImportableGroups): 没有任何可导入分组，未写入任何数据
    async fn commit(&self, groups: Vec<PoPreview>) -> ImportResult<CommitSummary>;
}

/// 导入预览
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportPreview {
    pub total_rows: usize,
    pub error_rows: usize,
    pub groups: Vec<PoPreview>,
}

impl ImportPreview {
    pub fn valid_group_count(&self) -> usize {
        self.groups.iter().filter(|g| g.is_importable()).count()
    }

    pub fn invalid_group_count(&self) -> usize {
        self.groups.len() - self.valid_group_count()
    }
}

/// 解析出的数据行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// 数据行号（1 起，不含表头；空白行也占号，与文件行对应）
    pub row_index: usize,
    pub fields: Vec<String>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文本为数据行（已去 BOM、去表头、去空行）
    fn parse_text(&self, text: &str) -> ImportResult<Vec<ParsedRow>>;

    /// 校验文件（扩展名 / 空文件 / 编码）后解析
    fn parse_file(&self, file_path: &Path) -> ImportResult<Vec<ParsedRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 列位置 → 具名字段（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// # 参数
    /// - fields: 一行的全部列（缺列视为空字符串）
    /// - row_index: 数据行号（1 起）
    fn map_to_record(&self, fields: &[String], row_index: usize) -> RawImportRecord;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 行级校验 + 类型转换（阶段 2）
// 实现者: RowValidatorImpl
// 约束: 纯函数，不抛错，错误累积在 ImportedRow.errors
pub trait RowValidator: Send + Sync {
    fn validate(&self, record: RawImportRecord) -> ImportedRow;
}

// ==========================================
// GroupAggregator Trait
// ==========================================
// 用途: 按 (采购类型, 供应商, 仓库, 期望到货日期) 分组（阶段 3）
// 实现者: GroupAggregatorImpl
pub trait GroupAggregator: Send + Sync {
    /// 分组顺序 = 分组键首次出现顺序
    fn group(&self, rows: Vec<ImportedRow>) -> Vec<PoPreview>;
}

// ==========================================
// ImportCommitter Trait
// ==========================================
// 用途: 无错误分组 → 采购单（阶段 4，不含落库）
// 实现者: ImportCommitterImpl
pub trait ImportCommitter: Send + Sync {
    /// 构建待落库的采购单
    ///
    /// # 返回
    /// - Ok((orders, skipped)): 按分组顺序的采购单 + 跳过的分组数
    /// - Err(NoImportableGroups): 全部分组含错误
    fn build_orders(
        &self,
        groups: &[PoPreview],
        now: DateTime<Utc>,
    ) -> ImportResult<(Vec<PurchaseOrder>, usize)>;
}
