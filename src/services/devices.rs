//! Device management service

use crate::{
    error::{AppError, AppResult},
    models::device::{CreateDevice, Device, DeviceDetail, DeviceQuery, UpdateDevice},
    repository::Repository,
};

#[derive(Clone)]
pub struct DevicesService {
    repository: Repository,
}

impl DevicesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &DeviceQuery) -> AppResult<Vec<Device>> {
        self.repository.devices.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Device> {
        self.repository.devices.get_by_id(id).await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<DeviceDetail> {
        self.repository.devices.get_detail(id).await
    }

    /// Create a device after checking serial uniqueness and that the
    /// referenced type (and purchase, when given) exist
    pub async fn create(&self, data: CreateDevice) -> AppResult<Device> {
        if self
            .repository
            .devices
            .get_by_serial(&data.serial_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Serial number already registered".to_string(),
            ));
        }

        self.repository
            .device_types
            .get_by_id(data.device_type_id)
            .await?;

        if let Some(purchase_id) = data.purchase_id {
            self.repository.purchases.get_by_id(purchase_id).await?;
        }

        self.repository.devices.create(&data).await
    }

    /// Update a device; the serial is re-checked excluding the device
    /// itself, and changed references must exist
    pub async fn update(&self, id: i32, data: UpdateDevice) -> AppResult<Device> {
        self.repository.devices.get_by_id(id).await?;

        if let Some(ref serial_number) = data.serial_number {
            if let Some(existing) = self.repository.devices.get_by_serial(serial_number).await? {
                if existing.device_id != id {
                    return Err(AppError::Conflict(
                        "Serial number already registered".to_string(),
                    ));
                }
            }
        }

        if let Some(device_type_id) = data.device_type_id {
            self.repository
                .device_types
                .get_by_id(device_type_id)
                .await?;
        }

        if let Some(Some(purchase_id)) = data.purchase_id {
            self.repository.purchases.get_by_id(purchase_id).await?;
        }

        self.repository.devices.update(id, &data).await
    }

    /// Retire a device (one-way; rejected while checked out)
    pub async fn retire(&self, id: i32) -> AppResult<Device> {
        self.repository.devices.retire(id).await
    }
}
