// ==========================================
// 采购后台 - 采购单 Repository 实现（SQLite）
// ==========================================
// 职责: 实现采购单数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::purchase_order::{PurchaseOrder, PurchaseOrderLine};
use crate::domain::types::{PoStatus, PurchaseType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::purchase_order_repo::PurchaseOrderRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    po_id, po_number, purchase_type, priority, supplier_name, supplier_code,
    warehouse, expected_delivery_date, latest_ship_time, shipping_method,
    trade_term, notes, currency, status, total_quantity, total_price,
    item_count, lines_json, order_date, created_at, updated_at
"#;

// 数据库行（未做枚举/JSON 转换）
struct PurchaseOrderRow {
    po_id: String,
    po_number: String,
    purchase_type: String,
    priority: Option<String>,
    supplier_name: String,
    supplier_code: Option<String>,
    warehouse: String,
    expected_delivery_date: NaiveDate,
    latest_ship_time: Option<String>,
    shipping_method: Option<String>,
    trade_term: Option<String>,
    notes: Option<String>,
    currency: String,
    status: String,
    total_quantity: i64,
    total_price: f64,
    item_count: i64,
    lines_json: String,
    order_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseOrderRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            po_id: row.get(0)?,
            po_number: row.get(1)?,
            purchase_type: row.get(2)?,
            priority: row.get(3)?,
            supplier_name: row.get(4)?,
            supplier_code: row.get(5)?,
            warehouse: row.get(6)?,
            expected_delivery_date: row.get(7)?,
            latest_ship_time: row.get(8)?,
            shipping_method: row.get(9)?,
            trade_term: row.get(10)?,
            notes: row.get(11)?,
            currency: row.get(12)?,
            status: row.get(13)?,
            total_quantity: row.get(14)?,
            total_price: row.get(15)?,
            item_count: row.get(16)?,
            lines_json: row.get(17)?,
            order_date: row.get(18)?,
            created_at: row.get(19)?,
            updated_at: row.get(20)?,
        })
    }

    fn into_domain(self) -> RepositoryResult<PurchaseOrder> {
        let purchase_type = self
            .purchase_type
            .parse::<PurchaseType>()
            .map_err(|message| RepositoryError::FieldValueError {
                field: "purchase_type".to_string(),
                message,
            })?;
        let status = self
            .status
            .parse::<PoStatus>()
            .map_err(|message| RepositoryError::FieldValueError {
                field: "status".to_string(),
                message,
            })?;
        let lines: Vec<PurchaseOrderLine> = serde_json::from_str(&self.lines_json)?;

        Ok(PurchaseOrder {
            po_id: self.po_id,
            po_number: self.po_number,
            purchase_type,
            priority: self.priority,
            supplier_name: self.supplier_name,
            supplier_code: self.supplier_code,
            warehouse: self.warehouse,
            expected_delivery_date: self.expected_delivery_date,
            latest_ship_time: self.latest_ship_time,
            shipping_method: self.shipping_method,
            trade_term: self.trade_term,
            notes: self.notes,
            currency: self.currency,
            status,
            total_quantity: self.total_quantity.max(0) as u64,
            total_price: self.total_price,
            item_count: self.item_count.max(0) as usize,
            lines,
            order_date: self.order_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ==========================================
// SqlitePurchaseOrderRepository
// ==========================================
pub struct SqlitePurchaseOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePurchaseOrderRepository {
    /// 打开数据库并确保表结构存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn insert_tx(tx: &Transaction, order: &PurchaseOrder) -> RepositoryResult<()> {
        let lines_json = serde_json::to_string(&order.lines)?;

        tx.execute(
            r#"
            INSERT INTO purchase_order (
                po_id, po_number, purchase_type, priority, supplier_name, supplier_code,
                warehouse, expected_delivery_date, latest_ship_time, shipping_method,
                trade_term, notes, currency, status, total_quantity, total_price,
                item_count, lines_json, order_date, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21
            )
            "#,
            params![
                order.po_id,
                order.po_number,
                order.purchase_type.as_str(),
                order.priority,
                order.supplier_name,
                order.supplier_code,
                order.warehouse,
                order.expected_delivery_date,
                order.latest_ship_time,
                order.shipping_method,
                order.trade_term,
                order.notes,
                order.currency,
                order.status.as_str(),
                order.total_quantity as i64,
                order.total_price,
                order.item_count as i64,
                lines_json,
                order.order_date,
                order.created_at,
                order.updated_at,
            ],
        )?;

        Ok(())
    }
}

#[async_trait]
impl PurchaseOrderRepository for SqlitePurchaseOrderRepository {
    async fn create(&self, order: PurchaseOrder) -> RepositoryResult<()> {
        self.prepend_batch(vec![order]).await.map(|_| ())
    }

    async fn prepend_batch(&self, orders: Vec<PurchaseOrder>) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 倒序写入: 批内首单 seq 最大，list() 时排在最前
        for order in orders.iter().rev() {
            Self::insert_tx(&tx, order)?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(orders.len())
    }

    async fn list(&self) -> RepositoryResult<Vec<PurchaseOrder>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM purchase_order ORDER BY seq DESC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt
            .query_map([], PurchaseOrderRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(PurchaseOrderRow::into_domain).collect()
    }

    async fn get(&self, po_id: &str) -> RepositoryResult<Option<PurchaseOrder>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM purchase_order WHERE po_id = ?1",
                    SELECT_COLUMNS
                ),
                params![po_id],
                PurchaseOrderRow::from_row,
            )
            .optional()?;

        row.map(PurchaseOrderRow::into_domain).transpose()
    }

    async fn update(&self, order: PurchaseOrder) -> RepositoryResult<()> {
        let lines_json = serde_json::to_string(&order.lines)?;
        let conn = self.lock()?;

        let affected = conn.execute(
            r#"
            UPDATE purchase_order SET
                po_number = ?2, purchase_type = ?3, priority = ?4, supplier_name = ?5,
                supplier_code = ?6, warehouse = ?7, expected_delivery_date = ?8,
                latest_ship_time = ?9, shipping_method = ?10, trade_term = ?11,
                notes = ?12, currency = ?13, status = ?14, total_quantity = ?15,
                total_price = ?16, item_count = ?17, lines_json = ?18,
                order_date = ?19, updated_at = ?20
            WHERE po_id = ?1
            "#,
            params![
                order.po_id,
                order.po_number,
                order.purchase_type.as_str(),
                order.priority,
                order.supplier_name,
                order.supplier_code,
                order.warehouse,
                order.expected_delivery_date,
                order.latest_ship_time,
                order.shipping_method,
                order.trade_term,
                order.notes,
                order.currency,
                order.status.as_str(),
                order.total_quantity as i64,
                order.total_price,
                order.item_count as i64,
                lines_json,
                order.order_date,
                order.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "PurchaseOrder".to_string(),
                id: order.po_id,
            });
        }

        Ok(())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM purchase_order", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }
}
