// ==========================================
// 采购后台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、派生规则
// 红线: 不含数据访问逻辑,不含导入流程
// ==========================================

pub mod progress;
pub mod purchase_order;
pub mod types;

// 重导出核心类型
pub use progress::{progress_steps, ProgressStep, StepState, StepStatus};
pub use purchase_order::{
    CommitSummary, GroupKey, ImportedRow, PoPreview, PurchaseOrder, PurchaseOrderLine,
    RawImportRecord,
};
pub use types::{PoStatus, PurchaseType, ShippingMode};
