//! Device endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::device::{CreateDevice, Device, DeviceDetail, DeviceQuery, UpdateDevice},
};

/// List devices with optional filters and pagination
#[utoipa::path(
    get,
    path = "/devices",
    tag = "devices",
    params(DeviceQuery),
    responses(
        (status = 200, description = "List of devices", body = Vec<Device>)
    )
)]
pub async fn list_devices(
    State(state): State<crate::AppState>,
    Query(query): Query<DeviceQuery>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = state.services.devices.list(&query).await?;
    Ok(Json(devices))
}

/// Get a device with its type, purchase and active assignment
#[utoipa::path(
    get,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device details", body = DeviceDetail),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeviceDetail>> {
    let device = state.services.devices.get_detail(id).await?;
    Ok(Json(device))
}

/// Create a new device
#[utoipa::path(
    post,
    path = "/devices",
    tag = "devices",
    request_body = CreateDevice,
    responses(
        (status = 200, description = "Device created", body = Device),
        (status = 400, description = "Duplicate serial number"),
        (status = 404, description = "Device type or purchase not found")
    )
)]
pub async fn create_device(
    State(state): State<crate::AppState>,
    Json(device): Json<CreateDevice>,
) -> AppResult<Json<Device>> {
    let created = state.services.devices.create(device).await?;
    Ok(Json(created))
}

/// Update an existing device
#[utoipa::path(
    put,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Device ID")),
    request_body = UpdateDevice,
    responses(
        (status = 200, description = "Device updated", body = Device),
        (status = 404, description = "Device, type or purchase not found"),
        (status = 400, description = "Duplicate serial number")
    )
)]
pub async fn update_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(device): Json<UpdateDevice>,
) -> AppResult<Json<Device>> {
    let updated = state.services.devices.update(id, device).await?;
    Ok(Json(updated))
}

/// Retire a device (one-way transition)
#[utoipa::path(
    put,
    path = "/devices/{id}/retire",
    tag = "devices",
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device retired", body = Device),
        (status = 404, description = "Device not found"),
        (status = 400, description = "Device is checked out")
    )
)]
pub async fn retire_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Device>> {
    let retired = state.services.devices.retire(id).await?;
    Ok(Json(retired))
}
