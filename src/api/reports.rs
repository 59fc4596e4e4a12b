//! Reporting endpoints (read-only aggregations)

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;

/// Non-retired device count for one device type
#[derive(Serialize, ToSchema)]
pub struct DeviceTypeCount {
    pub device_type: String,
    pub count: i64,
}

/// Device count for one lifecycle bucket
#[derive(Serialize, ToSchema)]
pub struct DeviceStatusCount {
    /// "Available", "Checked Out" or "Retired"
    pub status: String,
    pub count: i64,
}

/// Active assignment count for one user
#[derive(Serialize, ToSchema)]
pub struct UserAssignmentCount {
    pub user_id: i32,
    /// Full name rendered "First Last"
    pub name: String,
    pub count: i64,
}

/// Device whose warranty expires within the requested window
#[derive(Serialize, ToSchema)]
pub struct ExpiringWarranty {
    pub device_id: i32,
    pub serial_number: String,
    pub device_name: Option<String>,
    pub model: Option<String>,
    pub warranty_expiration: NaiveDate,
}

/// Query parameters for the user assignment report
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserAssignmentsQuery {
    /// Maximum number of users to return (default 10)
    pub limit: Option<i64>,
}

/// Query parameters for the expiring warranty report
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExpiringWarrantiesQuery {
    /// Window size in days from today, inclusive (default 90)
    pub days: Option<i64>,
}

/// Count of non-retired devices grouped by type
#[utoipa::path(
    get,
    path = "/reports/devices-by-type",
    tag = "reports",
    responses(
        (status = 200, description = "Device counts per type", body = Vec<DeviceTypeCount>)
    )
)]
pub async fn devices_by_type(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<DeviceTypeCount>>> {
    let report = state.services.reports.devices_by_type().await?;
    Ok(Json(report))
}

/// Device counts in the Available / Checked Out / Retired buckets
#[utoipa::path(
    get,
    path = "/reports/device-status",
    tag = "reports",
    responses(
        (status = 200, description = "Device counts per status", body = Vec<DeviceStatusCount>)
    )
)]
pub async fn device_status(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<DeviceStatusCount>>> {
    let report = state.services.reports.device_status().await?;
    Ok(Json(report))
}

/// Top users by currently active assignments
#[utoipa::path(
    get,
    path = "/reports/user-assignments",
    tag = "reports",
    params(UserAssignmentsQuery),
    responses(
        (status = 200, description = "Active assignment counts per user", body = Vec<UserAssignmentCount>)
    )
)]
pub async fn user_assignments(
    State(state): State<crate::AppState>,
    Query(query): Query<UserAssignmentsQuery>,
) -> AppResult<Json<Vec<UserAssignmentCount>>> {
    let report = state
        .services
        .reports
        .user_assignments(query.limit.unwrap_or(10))
        .await?;
    Ok(Json(report))
}

/// Non-retired devices with warranties expiring within the window
#[utoipa::path(
    get,
    path = "/reports/expiring-warranties",
    tag = "reports",
    params(ExpiringWarrantiesQuery),
    responses(
        (status = 200, description = "Devices with expiring warranties", body = Vec<ExpiringWarranty>)
    )
)]
pub async fn expiring_warranties(
    State(state): State<crate::AppState>,
    Query(query): Query<ExpiringWarrantiesQuery>,
) -> AppResult<Json<Vec<ExpiringWarranty>>> {
    let report = state
        .services
        .reports
        .expiring_warranties(query.days.unwrap_or(90))
        .await?;
    Ok(Json(report))
}
