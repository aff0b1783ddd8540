// ==========================================
// 采购后台 - 领域类型定义
// ==========================================
// 职责: 采购类型 / 采购单状态 / 运输方式等封闭枚举
// 约束: 状态文案、承运商列表均为穷举 match，新增成员必须补齐映射
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 采购类型 (Purchase Type)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE（与导入模板一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseType {
    Normal,        // 普通采购
    Direct,        // 直发采购
    FactoryDirect, // 工厂直发
}

impl PurchaseType {
    /// 导入模板允许的全部取值
    pub const ALLOWED: [&'static str; 3] = ["NORMAL", "DIRECT", "FACTORY_DIRECT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::Normal => "NORMAL",
            PurchaseType::Direct => "DIRECT",
            PurchaseType::FactoryDirect => "FACTORY_DIRECT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PurchaseType::Normal => "普通采购",
            PurchaseType::Direct => "直发采购",
            PurchaseType::FactoryDirect => "工厂直发",
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PurchaseType {
    type Err = String;

    /// 严格匹配（区分大小写），与导入校验口径一致
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NORMAL" => Ok(PurchaseType::Normal),
            "DIRECT" => Ok(PurchaseType::Direct),
            "FACTORY_DIRECT" => Ok(PurchaseType::FactoryDirect),
            other => Err(format!(
                "采购类型必须为 {} 之一，实际: '{}'",
                PurchaseType::ALLOWED.join(" / "),
                other
            )),
        }
    }
}

// ==========================================
// 采购单状态 (PO Status)
// ==========================================
// 生命周期: DRAFT → PENDING_APPROVAL → APPROVED → CONFIRMED
//           → PARTIALLY_SHIPPED → SHIPPED → PARTIALLY_RECEIVED → RECEIVED → CLOSED
// 任意未发货状态可进入 CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoStatus {
    Draft,
    PendingApproval,
    Approved,
    Confirmed,
    PartiallyShipped,
    Shipped,
    PartiallyReceived,
    Received,
    Closed,
    Cancelled,
}

impl PoStatus {
    pub const ALL: [PoStatus; 10] = [
        PoStatus::Draft,
        PoStatus::PendingApproval,
        PoStatus::Approved,
        PoStatus::Confirmed,
        PoStatus::PartiallyShipped,
        PoStatus::Shipped,
        PoStatus::PartiallyReceived,
        PoStatus::Received,
        PoStatus::Closed,
        PoStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoStatus::Draft => "DRAFT",
            PoStatus::PendingApproval => "PENDING_APPROVAL",
            PoStatus::Approved => "APPROVED",
            PoStatus::Confirmed => "CONFIRMED",
            PoStatus::PartiallyShipped => "PARTIALLY_SHIPPED",
            PoStatus::Shipped => "SHIPPED",
            PoStatus::PartiallyReceived => "PARTIALLY_RECEIVED",
            PoStatus::Received => "RECEIVED",
            PoStatus::Closed => "CLOSED",
            PoStatus::Cancelled => "CANCELLED",
        }
    }

    /// 状态展示文案
    pub fn label(&self) -> &'static str {
        match self {
            PoStatus::Draft => "草稿",
            PoStatus::PendingApproval => "待审批",
            PoStatus::Approved => "已审批",
            PoStatus::Confirmed => "供应商已确认",
            PoStatus::PartiallyShipped => "部分发货",
            PoStatus::Shipped => "已发货",
            PoStatus::PartiallyReceived => "部分收货",
            PoStatus::Received => "已收货",
            PoStatus::Closed => "已关闭",
            PoStatus::Cancelled => "已取消",
        }
    }

    /// 允许的状态流转
    pub fn can_transition_to(&self, next: PoStatus) -> bool {
        use PoStatus::*;
        matches!(
            (*self, next),
            (Draft, PendingApproval)
                | (Draft, Cancelled)
                | (PendingApproval, Approved)
                | (PendingApproval, Draft)
                | (PendingApproval, Cancelled)
                | (Approved, Confirmed)
                | (Approved, Cancelled)
                | (Confirmed, PartiallyShipped)
                | (Confirmed, Shipped)
                | (Confirmed, Cancelled)
                | (PartiallyShipped, Shipped)
                | (Shipped, PartiallyReceived)
                | (Shipped, Received)
                | (PartiallyReceived, Received)
                | (Received, Closed)
        )
    }
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        PoStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("未知的采购单状态: {}", s))
    }
}

// ==========================================
// 运输方式 (Shipping Mode)
// ==========================================
// 用途: ASN 表单按运输方式给出承运商候选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingMode {
    Sea,     // 海运
    Air,     // 空运
    Express, // 快递
    Land,    // 陆运
    Rail,    // 铁路
}

impl ShippingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMode::Sea => "SEA",
            ShippingMode::Air => "AIR",
            ShippingMode::Express => "EXPRESS",
            ShippingMode::Land => "LAND",
            ShippingMode::Rail => "RAIL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingMode::Sea => "海运",
            ShippingMode::Air => "空运",
            ShippingMode::Express => "快递",
            ShippingMode::Land => "陆运",
            ShippingMode::Rail => "铁路",
        }
    }

    /// 承运商候选列表
    pub fn carriers(&self) -> &'static [&'static str] {
        match self {
            ShippingMode::Sea => &["COSCO", "Maersk", "MSC", "CMA CGM", "Evergreen"],
            ShippingMode::Air => &["Cathay Cargo", "Lufthansa Cargo", "Emirates SkyCargo"],
            ShippingMode::Express => &["DHL", "FedEx", "UPS", "SF Express"],
            ShippingMode::Land => &["Deppon", "ZTO Freight", "Local Trucking"],
            ShippingMode::Rail => &["China Railway Express", "DB Cargo"],
        }
    }
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShippingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SEA" => Ok(ShippingMode::Sea),
            "AIR" => Ok(ShippingMode::Air),
            "EXPRESS" => Ok(ShippingMode::Express),
            "LAND" | "TRUCK" => Ok(ShippingMode::Land),
            "RAIL" => Ok(ShippingMode::Rail),
            _ => Err(format!("未知的运输方式: {}", s)),
        }
    }
}
