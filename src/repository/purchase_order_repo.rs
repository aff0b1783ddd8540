// ==========================================
// 采购后台 - 采购单 Repository Trait
// ==========================================
// 职责: 定义采购单数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 顺序: list() 新单在前；prepend_batch 整批置于最前且保持批内顺序
// ==========================================

use crate::domain::purchase_order::PurchaseOrder;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// PurchaseOrderRepository Trait
// ==========================================
// 实现者: SqlitePurchaseOrderRepository, InMemoryPurchaseOrderRepository
#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    /// 新建单个采购单（置于最前）
    async fn create(&self, order: PurchaseOrder) -> RepositoryResult<()>;

    /// 批量新建（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 写入条数
    /// - Err: 任一写入失败则整批回滚
    async fn prepend_batch(&self, orders: Vec<PurchaseOrder>) -> RepositoryResult<usize>;

    /// 全部采购单（新单在前）
    async fn list(&self) -> RepositoryResult<Vec<PurchaseOrder>>;

    /// 按 po_id 查询
    async fn get(&self, po_id: &str) -> RepositoryResult<Option<PurchaseOrder>>;

    /// 整单更新（按 po_id）
    ///
    /// # 返回
    /// - Err(NotFound): po_id 不存在
    async fn update(&self, order: PurchaseOrder) -> RepositoryResult<()>;

    /// 采购单总数
    async fn count(&self) -> RepositoryResult<usize>;
}
