//! Device type model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Device type record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DeviceType {
    pub device_type_id: i32,
    pub type_name: String,
    pub description: Option<String>,
    /// Recommended replacement cycle in months
    pub refresh_cycle_months: Option<i32>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Short device type representation embedded in device details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DeviceTypeBrief {
    pub device_type_id: i32,
    pub type_name: String,
}

/// Create device type request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeviceType {
    pub type_name: String,
    pub description: Option<String>,
    pub refresh_cycle_months: Option<i32>,
}

/// Update device type request.
///
/// Absent fields are left unchanged; explicit `null` clears nullable columns.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDeviceType {
    pub type_name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub refresh_cycle_months: Option<Option<i32>>,
}

/// Device type list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeviceTypeQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
