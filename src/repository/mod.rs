// ==========================================
// 采购后台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽存储细节（SQLite / 内存）
// ==========================================

pub mod error;
pub mod memory_repo;
pub mod purchase_order_repo;
pub mod purchase_order_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use memory_repo::InMemoryPurchaseOrderRepository;
pub use purchase_order_repo::PurchaseOrderRepository;
pub use purchase_order_repo_impl::SqlitePurchaseOrderRepository;
