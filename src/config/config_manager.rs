// ==========================================
// 采购后台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value, scope_id='global')
// ==========================================

use crate::config::import_config_trait::{
    ImportConfigReader, DEFAULT_CURRENCY, DEFAULT_PO_NUMBER_PREFIX, DEFAULT_TAX_RATE,
};
use crate::db::open_sqlite_connection;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::RepositoryError;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 配置键
pub mod config_keys {
    pub const DEFAULT_TAX_RATE: &str = "import/default_tax_rate";
    pub const DEFAULT_CURRENCY: &str = "import/default_currency";
    pub const PO_NUMBER_PREFIX: &str = "import/po_number_prefix";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    pub fn new(db_path: &str) -> ImportResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e))
        })?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取 global scope 的配置值
    pub fn get_config_value(&self, key: &str) -> ImportResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(RepositoryError::from)?;

        Ok(value)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> ImportResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ImportResult<String> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_default_tax_rate(&self) -> ImportResult<f64> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_TAX_RATE,
            &DEFAULT_TAX_RATE.to_string(),
        )?;

        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| ImportError::ConfigValueError {
                key: config_keys::DEFAULT_TAX_RATE.to_string(),
                value: value.clone(),
                message: "税率必须为非负数".to_string(),
            })
    }

    async fn get_default_currency(&self) -> ImportResult<String> {
        self.get_config_or_default(config_keys::DEFAULT_CURRENCY, DEFAULT_CURRENCY)
    }

    async fn get_po_number_prefix(&self) -> ImportResult<String> {
        self.get_config_or_default(config_keys::PO_NUMBER_PREFIX, DEFAULT_PO_NUMBER_PREFIX)
    }
}
