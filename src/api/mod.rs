// ==========================================
// 采购后台 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI / 前端调用
// ==========================================

pub mod error;
pub mod import_api;
pub mod purchase_order_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportCommitResponse, ImportPreviewResponse};
pub use purchase_order_api::{PurchaseOrderApi, PurchaseOrderDetail};
