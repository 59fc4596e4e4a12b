//! Device model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::assignment::AssignmentBrief;
use super::device_type::DeviceTypeBrief;
use super::purchase::PurchaseBrief;

/// Device record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Device {
    pub device_id: i32,
    pub device_type_id: i32,
    pub serial_number: String,
    pub device_name: Option<String>,
    pub model: Option<String>,
    /// Maintained by the assignment lifecycle, true iff an open assignment exists
    pub is_checked_out: bool,
    /// One-way retirement flag, set via the retire operation only
    pub is_retired: bool,
    pub purchase_id: Option<i32>,
    pub warranty_expiration: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Short device representation embedded in detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DeviceBrief {
    pub device_id: i32,
    pub serial_number: String,
    pub device_name: Option<String>,
    pub model: Option<String>,
    pub is_checked_out: bool,
    pub is_retired: bool,
}

/// Device with its type, purchase and active assignment
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceDetail {
    #[serde(flatten)]
    pub device: Device,
    pub device_type: DeviceTypeBrief,
    pub purchase: Option<PurchaseBrief>,
    pub active_assignment: Option<AssignmentBrief>,
}

/// Create device request.
///
/// `is_checked_out` and `is_retired` are owned by the lifecycle operations
/// and cannot be supplied here; new devices start available.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDevice {
    pub device_type_id: i32,
    pub serial_number: String,
    pub device_name: Option<String>,
    pub model: Option<String>,
    pub purchase_id: Option<i32>,
    pub warranty_expiration: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update device request.
///
/// Absent fields are left unchanged; explicit `null` clears nullable columns.
/// Lifecycle flags are not updatable here (see the retire operation).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDevice {
    pub device_type_id: Option<i32>,
    pub serial_number: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub device_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub purchase_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub warranty_expiration: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

/// Device list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeviceQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub device_type_id: Option<i32>,
    pub is_checked_out: Option<bool>,
    pub is_retired: Option<bool>,
    /// Case-insensitive substring search over serial number, name and model
    pub search: Option<String>,
}
