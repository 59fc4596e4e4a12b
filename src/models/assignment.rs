//! Device assignment (checkout) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::device::DeviceBrief;
use super::user::UserBrief;

/// Assignment record linking a device to its holding user.
///
/// An assignment with no `actual_return_date` is active; the owning device's
/// `is_checked_out` flag is kept in sync by the lifecycle operations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub assignment_id: i32,
    pub device_id: i32,
    pub user_id: i32,
    pub checkout_date: NaiveDate,
    pub expected_return_date: Option<NaiveDate>,
    /// Null while the assignment is active
    pub actual_return_date: Option<NaiveDate>,
    pub checkout_condition: Option<String>,
    pub return_condition: Option<String>,
    pub notes: Option<String>,
    /// User who recorded the checkout
    pub created_by: Option<i32>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Short assignment representation embedded in detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentBrief {
    pub assignment_id: i32,
    pub checkout_date: NaiveDate,
    pub expected_return_date: Option<NaiveDate>,
    pub actual_return_date: Option<NaiveDate>,
}

/// Assignment with device, holder and creator details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub device: DeviceBrief,
    pub user: UserBrief,
    pub created_by_user: Option<UserBrief>,
}

/// Create assignment (checkout) request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssignment {
    pub device_id: i32,
    pub user_id: i32,
    /// Defaults to today when omitted
    pub checkout_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub checkout_condition: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
}

/// Update assignment request, limited to non-lifecycle fields.
///
/// Checkout and return state move exclusively through the assign/return
/// operations. Absent fields are left unchanged; explicit `null` clears.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAssignment {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expected_return_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub checkout_condition: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

/// Return (check in) request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReturnAssignment {
    /// Defaults to today when omitted
    pub actual_return_date: Option<NaiveDate>,
    pub return_condition: Option<String>,
    /// Appended to the assignment notes under a "Return Notes:" prefix
    pub notes: Option<String>,
}

/// Assignment list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct AssignmentQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub device_id: Option<i32>,
    pub user_id: Option<i32>,
    /// Only assignments with no recorded return
    #[serde(default)]
    pub active_only: bool,
}
