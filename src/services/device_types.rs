//! Device type management service

use crate::{
    error::{AppError, AppResult},
    models::device_type::{CreateDeviceType, DeviceType, DeviceTypeQuery, UpdateDeviceType},
    repository::Repository,
};

#[derive(Clone)]
pub struct DeviceTypesService {
    repository: Repository,
}

impl DeviceTypesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &DeviceTypeQuery) -> AppResult<Vec<DeviceType>> {
        self.repository.device_types.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DeviceType> {
        self.repository.device_types.get_by_id(id).await
    }

    /// Create a device type after checking name uniqueness
    pub async fn create(&self, data: CreateDeviceType) -> AppResult<DeviceType> {
        if self
            .repository
            .device_types
            .get_by_name(&data.type_name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Device type already registered".to_string(),
            ));
        }

        self.repository.device_types.create(&data).await
    }

    /// Update a device type; the name is re-checked excluding the type itself
    pub async fn update(&self, id: i32, data: UpdateDeviceType) -> AppResult<DeviceType> {
        self.repository.device_types.get_by_id(id).await?;

        if let Some(ref type_name) = data.type_name {
            if let Some(existing) = self.repository.device_types.get_by_name(type_name).await? {
                if existing.device_type_id != id {
                    return Err(AppError::Conflict(
                        "Device type name already exists".to_string(),
                    ));
                }
            }
        }

        self.repository.device_types.update(id, &data).await
    }
}
