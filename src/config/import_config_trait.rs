// ==========================================
// 采购后台 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::importer::error::ImportResult;
use async_trait::async_trait;

/// 默认税率（%）
pub const DEFAULT_TAX_RATE: f64 = 13.0;
/// 默认币种
pub const DEFAULT_CURRENCY: &str = "CNY";
/// 默认单号前缀
pub const DEFAULT_PO_NUMBER_PREFIX: &str = "PO";

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表）, DefaultImportConfig（常量）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 税率列非法时使用的默认税率
    ///
    /// # 默认值
    /// - 13.0
    async fn get_default_tax_rate(&self) -> ImportResult<f64>;

    /// 币种列为空时使用的默认币种
    ///
    /// # 默认值
    /// - CNY
    async fn get_default_currency(&self) -> ImportResult<String>;

    /// 采购单号前缀
    ///
    /// # 默认值
    /// - PO
    async fn get_po_number_prefix(&self) -> ImportResult<String>;
}

// ==========================================
// DefaultImportConfig - 内置默认配置
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImportConfig;

#[async_trait]
impl ImportConfigReader for DefaultImportConfig {
    async fn get_default_tax_rate(&self) -> ImportResult<f64> {
        Ok(DEFAULT_TAX_RATE)
    }

    async fn get_default_currency(&self) -> ImportResult<String> {
        Ok(DEFAULT_CURRENCY.to_string())
    }

    async fn get_po_number_prefix(&self) -> ImportResult<String> {
        Ok(DEFAULT_PO_NUMBER_PREFIX.to_string())
    }
}
