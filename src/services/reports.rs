//! Reporting service: read-only aggregation queries

use chrono::{Duration, Utc};
use sqlx::Row;

use crate::{
    api::reports::{DeviceStatusCount, DeviceTypeCount, ExpiringWarranty, UserAssignmentCount},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Count non-retired devices per device type
    pub async fn devices_by_type(&self) -> AppResult<Vec<DeviceTypeCount>> {
        let rows = sqlx::query(
            r#"
            SELECT dt.type_name, COUNT(d.device_id) AS count
            FROM device_types dt
            JOIN devices d ON d.device_type_id = dt.device_type_id
            WHERE d.is_retired = FALSE
            GROUP BY dt.type_name
            ORDER BY dt.type_name
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| DeviceTypeCount {
                device_type: row.get("type_name"),
                count: row.get("count"),
            })
            .collect())
    }

    /// Device counts in the three lifecycle buckets
    pub async fn device_status(&self) -> AppResult<Vec<DeviceStatusCount>> {
        let pool = &self.repository.pool;

        let available: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM devices WHERE is_checked_out = FALSE AND is_retired = FALSE",
        )
        .fetch_one(pool)
        .await?;

        let checked_out: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM devices WHERE is_checked_out = TRUE AND is_retired = FALSE",
        )
        .fetch_one(pool)
        .await?;

        let retired: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM devices WHERE is_retired = TRUE")
                .fetch_one(pool)
                .await?;

        Ok(vec![
            DeviceStatusCount {
                status: "Available".to_string(),
                count: available,
            },
            DeviceStatusCount {
                status: "Checked Out".to_string(),
                count: checked_out,
            },
            DeviceStatusCount {
                status: "Retired".to_string(),
                count: retired,
            },
        ])
    }

    /// Top users by number of currently active assignments
    pub async fn user_assignments(&self, limit: i64) -> AppResult<Vec<UserAssignmentCount>> {
        let rows = sqlx::query(
            r#"
            SELECT u.user_id, u.first_name, u.last_name, COUNT(a.assignment_id) AS count
            FROM users u
            JOIN device_assignments a ON a.user_id = u.user_id
            WHERE a.actual_return_date IS NULL
            GROUP BY u.user_id, u.first_name, u.last_name
            ORDER BY count DESC, u.user_id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let first_name: String = row.get("first_name");
                let last_name: String = row.get("last_name");
                UserAssignmentCount {
                    user_id: row.get("user_id"),
                    name: format!("{} {}", first_name, last_name),
                    count: row.get("count"),
                }
            })
            .collect())
    }

    /// Non-retired devices whose warranty expires within the next `days`
    /// days (inclusive window from today)
    pub async fn expiring_warranties(&self, days: i64) -> AppResult<Vec<ExpiringWarranty>> {
        let today = Utc::now().date_naive();
        let horizon = today + Duration::days(days);

        let rows = sqlx::query(
            r#"
            SELECT device_id, serial_number, device_name, model, warranty_expiration
            FROM devices
            WHERE is_retired = FALSE
              AND warranty_expiration BETWEEN $1 AND $2
            ORDER BY warranty_expiration
            "#,
        )
        .bind(today)
        .bind(horizon)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ExpiringWarranty {
                device_id: row.get("device_id"),
                serial_number: row.get("serial_number"),
                device_name: row.get("device_name"),
                model: row.get("model"),
                warranty_expiration: row.get("warranty_expiration"),
            })
            .collect())
    }
}
