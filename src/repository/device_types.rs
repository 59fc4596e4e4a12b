//! Device types repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::device_type::{CreateDeviceType, DeviceType, DeviceTypeQuery, UpdateDeviceType},
};

#[derive(Clone)]
pub struct DeviceTypesRepository {
    pool: Pool<Postgres>,
}

impl DeviceTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get device type by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<DeviceType> {
        sqlx::query_as::<_, DeviceType>("SELECT * FROM device_types WHERE device_type_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device type with id {} not found", id)))
    }

    /// Get device type by name
    pub async fn get_by_name(&self, type_name: &str) -> AppResult<Option<DeviceType>> {
        let device_type = sqlx::query_as::<_, DeviceType>(
            "SELECT * FROM device_types WHERE type_name = $1",
        )
        .bind(type_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device_type)
    }

    /// List device types with pagination
    pub async fn list(&self, query: &DeviceTypeQuery) -> AppResult<Vec<DeviceType>> {
        let types = sqlx::query_as::<_, DeviceType>(
            "SELECT * FROM device_types ORDER BY type_name LIMIT $1 OFFSET $2",
        )
        .bind(query.limit.unwrap_or(100))
        .bind(query.skip.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    /// Create a device type
    pub async fn create(&self, data: &CreateDeviceType) -> AppResult<DeviceType> {
        let device_type = sqlx::query_as::<_, DeviceType>(
            r#"
            INSERT INTO device_types (type_name, description, refresh_cycle_months)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.type_name)
        .bind(&data.description)
        .bind(data.refresh_cycle_months)
        .fetch_one(&self.pool)
        .await?;
        Ok(device_type)
    }

    /// Update a device type, only touching supplied fields
    pub async fn update(&self, id: i32, data: &UpdateDeviceType) -> AppResult<DeviceType> {
        let mut sets = vec!["last_modified_date = NOW()".to_string()];
        let mut idx = 0;

        macro_rules! set_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    idx += 1;
                    sets.push(format!("{} = ${}", $name, idx));
                }
            };
        }

        set_field!(data.type_name, "type_name");
        set_field!(data.description, "description");
        set_field!(data.refresh_cycle_months, "refresh_cycle_months");

        let sql = format!(
            "UPDATE device_types SET {} WHERE device_type_id = ${} RETURNING *",
            sets.join(", "),
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, DeviceType>(&sql);
        if let Some(ref v) = data.type_name {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.description {
            builder = builder.bind(v.clone());
        }
        if let Some(ref v) = data.refresh_cycle_months {
            builder = builder.bind(*v);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device type with id {} not found", id)))
    }
}
