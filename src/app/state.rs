// ==========================================
// 采购后台 - 应用状态
// ==========================================
// 职责: 管理共享数据库连接和API实例
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{ImportApi, PurchaseOrderApi};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{
    PurchaseOrderRepository, RepositoryError, RepositoryResult, SqlitePurchaseOrderRepository,
};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "PO_BACKOFFICE_DB_PATH";

/// 应用状态
///
/// 采购单仓储与配置共用同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 采购单API
    pub purchase_order_api: Arc<PurchaseOrderApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 打开数据库并建表,随后装配仓储与API
    pub fn new(db_path: String) -> RepositoryResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e))
        })?;
        init_schema(&conn)?;

        Ok(Self::from_connection(db_path, Arc::new(Mutex::new(conn))))
    }

    /// 基于已初始化的连接装配
    pub fn from_connection(db_path: String, conn: Arc<Mutex<Connection>>) -> Self {
        let repo: Arc<dyn PurchaseOrderRepository> =
            Arc::new(SqlitePurchaseOrderRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));
        let config: Arc<dyn ImportConfigReader> = config_manager.clone();

        Self {
            db_path,
            import_api: Arc::new(ImportApi::new(repo.clone(), config)),
            purchase_order_api: Arc::new(PurchaseOrderApi::new(repo)),
            config_manager,
        }
    }
}

/// 获取默认数据库路径
///
/// 优先读取 `PO_BACKOFFICE_DB_PATH`,否则落在用户数据目录下
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./po_backoffice.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("po-backoffice");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("po_backoffice.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[tokio::test]
    async fn test_app_state_on_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("po.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);

        let orders = state
            .purchase_order_api
            .list_purchase_orders(None)
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[test]
    fn test_app_state_unreachable_path() {
        let result = AppState::new("/nonexistent-dir/sub/po.db".to_string());
        assert!(matches!(
            result,
            Err(RepositoryError::DatabaseConnectionError(_))
        ));
    }
}
