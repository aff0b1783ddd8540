// ==========================================
// 采购单查询/维护API
// ==========================================
// 职责: 列表、详情（含状态文案与进度条）、状态流转、承运商候选
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::progress::{progress_steps, StepStatus};
use crate::domain::purchase_order::PurchaseOrder;
use crate::domain::types::{PoStatus, ShippingMode};
use crate::repository::PurchaseOrderRepository;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// 采购单详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderDetail {
    pub order: PurchaseOrder,
    pub status_label: String,
    /// 运输方式文案（未填或无法识别时为 None）
    pub shipping_label: Option<String>,
    pub progress: Vec<StepStatus>,
}

impl From<PurchaseOrder> for PurchaseOrderDetail {
    fn from(order: PurchaseOrder) -> Self {
        Self {
            status_label: order.status.label().to_string(),
            shipping_label: order
                .shipping_method
                .as_deref()
                .and_then(|m| m.parse::<ShippingMode>().ok())
                .map(|m| m.label().to_string()),
            progress: progress_steps(order.status),
            order,
        }
    }
}

/// 采购单API
pub struct PurchaseOrderApi {
    repo: Arc<dyn PurchaseOrderRepository>,
}

impl PurchaseOrderApi {
    pub fn new(repo: Arc<dyn PurchaseOrderRepository>) -> Self {
        Self { repo }
    }

    /// 采购单列表（新单在前），可按状态过滤
    pub async fn list_purchase_orders(
        &self,
        status: Option<PoStatus>,
    ) -> ApiResult<Vec<PurchaseOrder>> {
        let orders = self.repo.list().await?;
        Ok(match status {
            Some(s) => orders.into_iter().filter(|o| o.status == s).collect(),
            None => orders,
        })
    }

    /// 采购单详情
    pub async fn get_purchase_order_detail(&self, po_id: &str) -> ApiResult<PurchaseOrderDetail> {
        let order = self
            .repo
            .get(po_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("采购单不存在: {}", po_id)))?;

        Ok(order.into())
    }

    /// 状态流转
    ///
    /// # 返回
    /// - Err(InvalidStateTransition): 不允许的流转
    pub async fn update_status(
        &self,
        po_id: &str,
        next: PoStatus,
    ) -> ApiResult<PurchaseOrderDetail> {
        let mut order = self
            .repo
            .get(po_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("采购单不存在: {}", po_id)))?;

        if !order.status.can_transition_to(next) {
            return Err(ApiError::InvalidStateTransition {
                from: order.status.to_string(),
                to: next.to_string(),
            });
        }

        info!(po_id = %po_id, from = %order.status, to = %next, "采购单状态变更");

        order.status = next;
        order.updated_at = Utc::now();
        self.repo.update(order.clone()).await?;

        Ok(order.into())
    }

    /// 运输方式对应的承运商候选
    pub fn list_carriers(&self, shipping_mode: &str) -> ApiResult<Vec<String>> {
        let mode = shipping_mode
            .parse::<ShippingMode>()
            .map_err(ApiError::InvalidInput)?;

        Ok(mode.carriers().iter().map(|c| c.to_string()).collect())
    }
}
