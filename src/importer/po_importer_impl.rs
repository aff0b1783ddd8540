// ==========================================
// 采购后台 - 采购单导入器实现
// ==========================================
// 职责: 整合导入流程
// 流程: 解析 → 列映射 → 行校验 → 分组 →（人工确认）→ 构建采购单 → 落库
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::purchase_order::{CommitSummary, ImportedRow, PoPreview};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::CsvParser;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::group_aggregator::GroupAggregator as GroupAggregatorImpl;
use crate::importer::import_committer::ImportCommitter as ImportCommitterImpl;
use crate::importer::po_importer_trait::{
    FieldMapper, FileParser, GroupAggregator, ImportCommitter, ImportPreview, ParsedRow,
    PurchaseOrderImporter, RowValidator,
};
use crate::importer::row_validator::RowValidator as RowValidatorImpl;
use crate::repository::PurchaseOrderRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

// ==========================================
// PurchaseOrderImporterImpl - 采购单导入器实现
// ==========================================
pub struct PurchaseOrderImporterImpl {
    // 数据访问层
    repo: Arc<dyn PurchaseOrderRepository>,

    // 配置读取器
    config: Arc<dyn ImportConfigReader>,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    group_aggregator: Box<dyn GroupAggregator>,

    // 提交串行化（流水号取自已有单数）
    commit_lock: Mutex<()>,
}

impl PurchaseOrderImporterImpl {
    /// 使用默认组件创建导入器
    pub fn new(
        repo: Arc<dyn PurchaseOrderRepository>,
        config: Arc<dyn ImportConfigReader>,
    ) -> Self {
        Self::with_components(
            repo,
            config,
            Box::new(CsvParser),
            Box::new(FieldMapperImpl),
            Box::new(GroupAggregatorImpl),
        )
    }

    /// 注入自定义组件
    pub fn with_components(
        repo: Arc<dyn PurchaseOrderRepository>,
        config: Arc<dyn ImportConfigReader>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        group_aggregator: Box<dyn GroupAggregator>,
    ) -> Self {
        Self {
            repo,
            config,
            file_parser,
            field_mapper,
            group_aggregator,
            commit_lock: Mutex::new(()),
        }
    }

    /// 行数据 → 预览（阶段 1-3）
    async fn build_preview(&self, raw_rows: Vec<ParsedRow>) -> ImportResult<ImportPreview> {
        let validator = RowValidatorImpl::new(self.config.get_default_tax_rate().await?);

        // === 步骤 1-2: 列映射 + 行校验 ===
        let rows: Vec<ImportedRow> = raw_rows
            .iter()
            .map(|row| {
                validator.validate(self.field_mapper.map_to_record(&row.fields, row.row_index))
            })
            .collect();

        let total_rows = rows.len();
        for row in rows.iter().filter(|r| !r.is_valid()) {
            debug!(row_index = row.row_index, errors = ?row.errors, "行校验未通过");
        }

        // === 步骤 3: 分组 ===
        let groups = self.group_aggregator.group(rows);
        let error_rows = groups.iter().map(PoPreview::error_row_count).sum();

        let preview = ImportPreview {
            total_rows,
            error_rows,
            groups,
        };

        info!(
            total_rows = preview.total_rows,
            error_rows = preview.error_rows,
            groups = preview.groups.len(),
            valid_groups = preview.valid_group_count(),
            "导入预览生成完成"
        );

        Ok(preview)
    }
}

#[async_trait]
impl PurchaseOrderImporter for PurchaseOrderImporterImpl {
    #[instrument(skip(self, file_path))]
    async fn preview_csv_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportPreview> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "开始解析导入文件");

        // === 步骤 0: 解析文件 ===
        let raw_rows = self.file_parser.parse_file(path).map_err(|e| {
            warn!(error = %e, "文件解析失败");
            e
        })?;

        self.build_preview(raw_rows).await
    }

    #[instrument(skip(self, text), fields(bytes = text.len()))]
    async fn preview_csv_text(&self, text: &str) -> ImportResult<ImportPreview> {
        let raw_rows = self.file_parser.parse_text(text).map_err(|e| {
            warn!(error = %e, "文本解析失败");
            e
        })?;

        self.build_preview(raw_rows).await
    }

    #[instrument(skip(self, groups), fields(groups = groups.len()))]
    async fn commit(&self, groups: Vec<PoPreview>) -> ImportResult<CommitSummary> {
        let prefix = self.config.get_po_number_prefix().await?;
        let default_currency = self.config.get_default_currency().await?;

        let _guard = self.commit_lock.lock().await;
        let existing = self.repo.count().await?;
        let committer = ImportCommitterImpl::new(prefix, default_currency).after_existing(existing);

        // === 步骤 4: 构建采购单（全部分组含错误时在此返回，不触碰仓储）===
        let (orders, skipped) = committer.build_orders(&groups, Utc::now()).map_err(|e| {
            warn!(error = %e, "导入提交被拒绝");
            e
        })?;

        let po_numbers: Vec<String> = orders.iter().map(|o| o.po_number.clone()).collect();

        // === 步骤 5: 落库（单事务）===
        let created = self.repo.prepend_batch(orders).await?;

        info!(created = created, skipped = skipped, "采购单导入完成");

        Ok(CommitSummary {
            created,
            skipped,
            po_numbers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultImportConfig;
    use crate::importer::error::ImportError;
    use crate::repository::InMemoryPurchaseOrderRepository;

    const HEADER: &str = "采购类型,优先级,供应商名称,供应商编码,收货仓库,期望到货日期,最晚发货时间,运输方式,贸易条款,备注,SKU,产品名称,规格,数量,单位,币种,单价,税率,行备注";

    fn create_test_importer() -> (Arc<InMemoryPurchaseOrderRepository>, PurchaseOrderImporterImpl) {
        let repo = Arc::new(InMemoryPurchaseOrderRepository::new());
        let importer = PurchaseOrderImporterImpl::new(repo.clone(), Arc::new(DefaultImportConfig));
        (repo, importer)
    }

    #[tokio::test]
    async fn test_preview_and_commit() {
        let (repo, importer) = create_test_importer();
        let text = format!(
            "{}\n{}\n{}\n{}\n",
            HEADER,
            "NORMAL,,ABC Suppliers Inc.,,Main Warehouse,2024-04-30,,,,,SKU-1,Laptop,,100,pcs,USD,999.00,13,",
            "NORMAL,,ABC Suppliers Inc.,,Main Warehouse,2024-04-30,,,,,SKU-2,Laptop Pro,,50,pcs,USD,1999.00,13,",
            "BOGUS,,XYZ,,East,2024-05-01,,,,,SKU-3,Mouse,,1,pcs,USD,1,13,",
        );

        let preview = importer.preview_csv_text(&text).await.unwrap();
        assert_eq!(preview.total_rows, 3);
        assert_eq!(preview.error_rows, 1);
        assert_eq!(preview.groups.len(), 2);

        let summary = importer.commit(preview.groups).await.unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.skipped, 1);

        let orders = repo.list().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total_quantity, 150);
    }

    #[tokio::test]
    async fn test_commit_nothing_importable_leaves_repo_untouched() {
        let (repo, importer) = create_test_importer();
        let text = format!(
            "{}\n{}\n",
            HEADER, "NORMAL,,ABC,,Main,2024-04-30,,,,,SKU-1,Laptop,,0,pcs,USD,1,13,"
        );

        let preview = importer.preview_csv_text(&text).await.unwrap();
        let result = importer.commit(preview.groups).await;

        assert!(matches!(
            result,
            Err(ImportError::NoImportableGroups { skipped: 1 })
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
