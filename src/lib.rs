// ==========================================
// 采购后台 - 核心库
// ==========================================
// 职责: 采购单 CSV 批量导入、查询与状态维护
// 技术栈: Rust + SQLite
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 批量创建
pub mod importer;

// 配置层 - 导入默认值
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 实例装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PoStatus, PurchaseType, ShippingMode};

// 领域实体
pub use domain::{
    CommitSummary, ImportedRow, PoPreview, ProgressStep, PurchaseOrder, PurchaseOrderLine,
    StepState, StepStatus,
};

// API
pub use api::{ApiError, ApiResult, ImportApi, PurchaseOrderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "采购后台";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
