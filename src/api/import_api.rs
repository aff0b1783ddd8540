// ==========================================
// 采购单批量导入API
// ==========================================
// 职责: 封装导入预览 / 确认提交 / 模板下载
// 约定: message 字段即前端提示文案
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::purchase_order::PoPreview;
use crate::importer::{
    generate_template, CsvParser, ImportPreview, PurchaseOrderImporter,
    PurchaseOrderImporterImpl,
};
use crate::repository::PurchaseOrderRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 导入预览响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreviewResponse {
    /// 数据行数（不含表头/空行）
    pub total_rows: usize,
    /// 含错误的行数
    pub error_rows: usize,
    /// 可导入的分组数
    pub valid_groups: usize,
    /// 含错误的分组数（提交时跳过）
    pub invalid_groups: usize,
    /// 分组预览（含逐行错误）
    pub groups: Vec<PoPreview>,
}

impl From<ImportPreview> for ImportPreviewResponse {
    fn from(preview: ImportPreview) -> Self {
        Self {
            total_rows: preview.total_rows,
            error_rows: preview.error_rows,
            valid_groups: preview.valid_group_count(),
            invalid_groups: preview.invalid_group_count(),
            groups: preview.groups,
        }
    }
}

/// 导入提交响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommitResponse {
    /// 新建的采购单数量
    pub created: usize,
    /// 跳过的分组数量（含错误）
    pub skipped: usize,
    /// 新建的采购单号
    pub po_numbers: Vec<String>,
    /// 提示文案
    pub message: String,
}

/// 导入API
pub struct ImportApi {
    importer: PurchaseOrderImporterImpl,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(
        repo: Arc<dyn PurchaseOrderRepository>,
        config: Arc<dyn ImportConfigReader>,
    ) -> Self {
        Self {
            importer: PurchaseOrderImporterImpl::new(repo, config),
        }
    }

    /// 上传文件并生成预览
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于扩展名校验）
    /// - content: 文件内容
    ///
    /// # 返回
    /// - Ok(ImportPreviewResponse): 分组预览
    /// - Err(ApiError::FileFormatError): 扩展名/空文件/编码/无数据行
    pub async fn preview_import(
        &self,
        file_name: &str,
        content: &[u8],
    ) -> ApiResult<ImportPreviewResponse> {
        let text = CsvParser.decode_upload(file_name, content)?;
        let preview = self.importer.preview_csv_text(&text).await?;
        Ok(preview.into())
    }

    /// 按路径读取文件并生成预览
    pub async fn preview_import_file(&self, file_path: &str) -> ApiResult<ImportPreviewResponse> {
        let preview = self.importer.preview_csv_file(file_path).await?;
        Ok(preview.into())
    }

    /// 确认导入（仅无错误分组落库）
    ///
    /// # 返回
    /// - Ok(ImportCommitResponse): 创建数 / 跳过数 / 提示文案
    /// - Err(ApiError::NothingToImport): 全部分组含错误
    pub async fn confirm_import(&self, groups: Vec<PoPreview>) -> ApiResult<ImportCommitResponse> {
        if groups.is_empty() {
            return Err(ApiError::InvalidInput("没有待提交的分组".to_string()));
        }

        let summary = self.importer.commit(groups).await?;

        let message = if summary.skipped == 0 {
            format!("成功创建 {} 个采购单", summary.created)
        } else {
            format!(
                "成功创建 {} 个采购单，跳过 {} 个含错误的分组",
                summary.created, summary.skipped
            )
        };

        Ok(ImportCommitResponse {
            created: summary.created,
            skipped: summary.skipped,
            po_numbers: summary.po_numbers,
            message,
        })
    }

    /// 下载导入模板
    pub fn download_template(&self) -> ApiResult<String> {
        Ok(generate_template()?)
    }
}
