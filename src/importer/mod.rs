// ==========================================
// 采购后台 - 导入层
// ==========================================
// 职责: CSV 批量创建采购单
// 流程: 解析 → 列映射 → 行校验 → 分组 → 提交
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod group_aggregator;
pub mod import_committer;
pub mod po_importer_impl;
pub mod po_importer_trait;
pub mod row_validator;
pub mod template;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::CsvParser;
pub use group_aggregator::GroupAggregator as GroupAggregatorImpl;
pub use import_committer::ImportCommitter as ImportCommitterImpl;
pub use po_importer_impl::PurchaseOrderImporterImpl;
pub use row_validator::RowValidator as RowValidatorImpl;
pub use template::generate_template;

// 重导出 Trait 接口
pub use po_importer_trait::{
    FieldMapper, FileParser, GroupAggregator, ImportCommitter, ImportPreview, ParsedRow,
    PurchaseOrderImporter, RowValidator,
};
