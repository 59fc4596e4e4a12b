//! Devices repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::AssignmentBrief,
        device::{CreateDevice, Device, DeviceDetail, DeviceQuery, UpdateDevice},
        device_type::DeviceTypeBrief,
        purchase::PurchaseBrief,
    },
};

#[derive(Clone)]
pub struct DevicesRepository {
    pool: Pool<Postgres>,
}

impl DevicesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get device by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Device> {
        sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE device_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device with id {} not found", id)))
    }

    /// Get device by serial number
    pub async fn get_by_serial(&self, serial_number: &str) -> AppResult<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE serial_number = $1",
        )
        .bind(serial_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }

    /// Get device with its type, purchase and active assignment
    pub async fn get_detail(&self, id: i32) -> AppResult<DeviceDetail> {
        let device = self.get_by_id(id).await?;

        let device_type = sqlx::query_as::<_, DeviceTypeBrief>(
            "SELECT device_type_id, type_name FROM device_types WHERE device_type_id = $1",
        )
        .bind(device.device_type_id)
        .fetch_one(&self.pool)
        .await?;

        let purchase = if let Some(purchase_id) = device.purchase_id {
            sqlx::query_as::<_, PurchaseBrief>(
                "SELECT purchase_id, purchase_order, purchase_date, vendor FROM purchases WHERE purchase_id = $1",
            )
            .bind(purchase_id)
            .fetch_optional(&self.pool)
            .await?
        } else {
            None
        };

        // At most one open assignment exists per device
        let active_assignment = sqlx::query_as::<_, AssignmentBrief>(
            r#"
            SELECT assignment_id, checkout_date, expected_return_date, actual_return_date
            FROM device_assignments
            WHERE device_id = $1 AND actual_return_date IS NULL
            ORDER BY checkout_date DESC
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(DeviceDetail {
            device,
            device_type,
            purchase,
            active_assignment,
        })
    }

    /// List devices with optional filters and pagination
    pub async fn list(&self, query: &DeviceQuery) -> AppResult<Vec<Device>> {
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(100);

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.device_type_id.is_some() {
            idx += 1;
            conditions.push(format!("device_type_id = ${}", idx));
        }
        if query.is_checked_out.is_some() {
            idx += 1;
            conditions.push(format!("is_checked_out = ${}", idx));
        }
        if query.is_retired.is_some() {
            idx += 1;
            conditions.push(format!("is_retired = ${}", idx));
        }
        if query.search.is_some() {
            idx += 1;
            conditions.push(format!(
                "(serial_number ILIKE ${i} OR device_name ILIKE ${i} OR model ILIKE ${i})",
                i = idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM devices {} ORDER BY device_id LIMIT ${} OFFSET ${}",
            where_clause,
            idx + 1,
            idx + 2
        );

        let mut builder = sqlx::query_as::<_, Device>(&sql);
        if let Some(v) = query.device_type_id {
            builder = builder.bind(v);
        }
        if let Some(v) = query.is_checked_out {
            builder = builder.bind(v);
        }
        if let Some(v) = query.is_retired {
            builder = builder.bind(v);
        }
        if let Some(ref s) = query.search {
            builder = builder.bind(format!("%{}%", s));
        }

        let devices = builder.bind(limit).bind(skip).fetch_all(&self.pool).await?;
        Ok(devices)
    }

    /// Create a device; new devices start available (not checked out, not retired)
    pub async fn create(&self, data: &CreateDevice) -> AppResult<Device> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (device_type_id, serial_number, device_name, model,
                                 purchase_id, warranty_expiration, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.device_type_id)
        .bind(&data.serial_number)
        .bind(&data.device_name)
        .bind(&data.model)
        .bind(data.purchase_id)
        .bind(data.warranty_expiration)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(device)
    }

    /// Update a device, only touching supplied fields
    pub async fn update(&self, id: i32, data: &UpdateDevice) -> AppResult<Device> {
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

        set_field!(data.device_type_id, "device_type_id");
        set_field!(data.serial_number, "serial_number");
        set_field!(data.device_name, "device_name");
        set_field!(data.model, "model");
        set_field!(data.purchase_id, "purchase_id");
        set_field!(data.warranty_expiration, "warranty_expiration");
        set_field!(data.notes, "notes");

        let sql = format!(
            "UPDATE devices SET {} WHERE device_id = ${} RETURNING *",
            sets.join(", "),
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Device>(&sql);
        if let Some(v) = data.device_type_id {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.serial_number {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.device_name {
            builder = builder.bind(v.clone());
        }
        if let Some(ref v) = data.model {
            builder = builder.bind(v.clone());
        }
        if let Some(ref v) = data.purchase_id {
            builder = builder.bind(*v);
        }
        if let Some(ref v) = data.warranty_expiration {
            builder = builder.bind(*v);
        }
        if let Some(ref v) = data.notes {
            builder = builder.bind(v.clone());
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device with id {} not found", id)))
    }

    /// Retire a device.
    ///
    /// Rejected while the device is checked out; retiring an already retired
    /// device succeeds (the flag is simply re-applied). The checkout gate and
    /// the flag write happen in one transaction with the row locked, so a
    /// concurrent assignment cannot slip between check and write.
    pub async fn retire(&self, id: i32) -> AppResult<Device> {
        let mut tx = self.pool.begin().await?;

        let device = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE device_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Device with id {} not found", id)))?;

        if device.is_checked_out {
            return Err(AppError::Conflict(
                "Cannot retire a device that is checked out".to_string(),
            ));
        }

        let retired = sqlx::query_as::<_, Device>(
            r#"
            UPDATE devices SET is_retired = TRUE, last_modified_date = NOW()
            WHERE device_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(retired)
    }
}
