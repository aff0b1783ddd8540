// ==========================================
// 采购后台 - 采购单 Repository 内存实现
// ==========================================
// 用途: 测试替身 / 无需落库的会话级列表
// ==========================================

use crate::domain::purchase_order::PurchaseOrder;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::purchase_order_repo::PurchaseOrderRepository;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct InMemoryPurchaseOrderRepository {
    orders: Mutex<Vec<PurchaseOrder>>, // 新单在前
}

impl InMemoryPurchaseOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有列表初始化（顺序即展示顺序）
    pub fn with_orders(orders: Vec<PurchaseOrder>) -> Self {
        Self {
            orders: Mutex::new(orders),
        }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Vec<PurchaseOrder>>> {
        self.orders
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl PurchaseOrderRepository for InMemoryPurchaseOrderRepository {
    async fn create(&self, order: PurchaseOrder) -> RepositoryResult<()> {
        self.prepend_batch(vec![order]).await.map(|_| ())
    }

    async fn prepend_batch(&self, orders: Vec<PurchaseOrder>) -> RepositoryResult<usize> {
        let mut current = self.lock()?;

        for order in &orders {
            if current.iter().any(|o| o.po_id == order.po_id) {
                return Err(RepositoryError::UniqueConstraintViolation(format!(
                    "po_id={}",
                    order.po_id
                )));
            }
        }

        let count = orders.len();
        current.splice(0..0, orders);
        Ok(count)
    }

    async fn list(&self) -> RepositoryResult<Vec<PurchaseOrder>> {
        Ok(self.lock()?.clone())
    }

    async fn get(&self, po_id: &str) -> RepositoryResult<Option<PurchaseOrder>> {
        Ok(self.lock()?.iter().find(|o| o.po_id == po_id).cloned())
    }

    async fn update(&self, order: PurchaseOrder) -> RepositoryResult<()> {
        let mut current = self.lock()?;
        let position = current.iter().position(|o| o.po_id == order.po_id);
        match position {
            Some(idx) => {
                current[idx] = order;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "PurchaseOrder".to_string(),
                id: order.po_id,
            }),
        }
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.lock()?.len())
    }
}
