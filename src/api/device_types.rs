//! Device type endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::device_type::{CreateDeviceType, DeviceType, DeviceTypeQuery, UpdateDeviceType},
};

/// List device types
#[utoipa::path(
    get,
    path = "/device-types",
    tag = "device types",
    params(DeviceTypeQuery),
    responses(
        (status = 200, description = "List of device types", body = Vec<DeviceType>)
    )
)]
pub async fn list_device_types(
    State(state): State<crate::AppState>,
    Query(query): Query<DeviceTypeQuery>,
) -> AppResult<Json<Vec<DeviceType>>> {
    let types = state.services.device_types.list(&query).await?;
    Ok(Json(types))
}

/// Get device type by ID
#[utoipa::path(
    get,
    path = "/device-types/{id}",
    tag = "device types",
    params(("id" = i32, Path, description = "Device type ID")),
    responses(
        (status = 200, description = "Device type details", body = DeviceType),
        (status = 404, description = "Device type not found")
    )
)]
pub async fn get_device_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeviceType>> {
    let device_type = state.services.device_types.get_by_id(id).await?;
    Ok(Json(device_type))
}

/// Create a new device type
#[utoipa::path(
    post,
    path = "/device-types",
    tag = "device types",
    request_body = CreateDeviceType,
    responses(
        (status = 200, description = "Device type created", body = DeviceType),
        (status = 400, description = "Duplicate type name")
    )
)]
pub async fn create_device_type(
    State(state): State<crate::AppState>,
    Json(device_type): Json<CreateDeviceType>,
) -> AppResult<Json<DeviceType>> {
    let created = state.services.device_types.create(device_type).await?;
    Ok(Json(created))
}

/// Update an existing device type
#[utoipa::path(
    put,
    path = "/device-types/{id}",
    tag = "device types",
    params(("id" = i32, Path, description = "Device type ID")),
    request_body = UpdateDeviceType,
    responses(
        (status = 200, description = "Device type updated", body = DeviceType),
        (status = 404, description = "Device type not found"),
        (status = 400, description = "Duplicate type name")
    )
)]
pub async fn update_device_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(device_type): Json<UpdateDeviceType>,
) -> AppResult<Json<DeviceType>> {
    let updated = state.services.device_types.update(id, device_type).await?;
    Ok(Json(updated))
}
