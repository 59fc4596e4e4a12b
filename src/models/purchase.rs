//! Purchase model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::device::DeviceBrief;

/// Purchase record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Purchase {
    pub purchase_id: i32,
    /// Purchase order number, unique when present
    pub purchase_order: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub vendor: Option<String>,
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Short purchase representation embedded in device details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PurchaseBrief {
    pub purchase_id: i32,
    pub purchase_order: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub vendor: Option<String>,
}

/// Purchase with the devices bought under it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseDetail {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub devices: Vec<DeviceBrief>,
}

/// Create purchase request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePurchase {
    pub purchase_order: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub vendor: Option<String>,
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Update purchase request.
///
/// Absent fields are left unchanged; explicit `null` clears nullable columns.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePurchase {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub purchase_order: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub vendor: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub total_amount: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

/// Purchase list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct PurchaseQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
