//! Assignments repository: checkout and return lifecycle operations
//!
//! Assign and return each write two tables (the assignment row and the
//! device's checked-out flag). Both writes run in a single transaction with
//! the device row locked, keeping the invariant that `is_checked_out` is
//! true exactly when an open assignment exists.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{
            Assignment, AssignmentDetail, AssignmentQuery, CreateAssignment, ReturnAssignment,
            UpdateAssignment,
        },
        device::{Device, DeviceBrief},
        user::{User, UserBrief},
    },
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>(
            "SELECT * FROM device_assignments WHERE assignment_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))
    }

    /// Get assignment with device, holder and creator details
    pub async fn get_detail(&self, id: i32) -> AppResult<AssignmentDetail> {
        let assignment = self.get_by_id(id).await?;

        let device = sqlx::query_as::<_, DeviceBrief>(
            r#"
            SELECT device_id, serial_number, device_name, model, is_checked_out, is_retired
            FROM devices WHERE device_id = $1
            "#,
        )
        .bind(assignment.device_id)
        .fetch_one(&self.pool)
        .await?;

        let user = sqlx::query_as::<_, UserBrief>(
            r#"
            SELECT user_id, first_name, last_name, username, email, is_active
            FROM users WHERE user_id = $1
            "#,
        )
        .bind(assignment.user_id)
        .fetch_one(&self.pool)
        .await?;

        let created_by_user = if let Some(created_by) = assignment.created_by {
            sqlx::query_as::<_, UserBrief>(
                r#"
                SELECT user_id, first_name, last_name, username, email, is_active
                FROM users WHERE user_id = $1
                "#,
            )
            .bind(created_by)
            .fetch_optional(&self.pool)
            .await?
        } else {
            None
        };

        Ok(AssignmentDetail {
            assignment,
            device,
            user,
            created_by_user,
        })
    }

    /// List assignments with optional filters, most recent checkout first
    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<Assignment>> {
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(100);

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.device_id.is_some() {
            idx += 1;
            conditions.push(format!("device_id = ${}", idx));
        }
        if query.user_id.is_some() {
            idx += 1;
            conditions.push(format!("user_id = ${}", idx));
        }
        if query.active_only {
            conditions.push("actual_return_date IS NULL".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM device_assignments {} ORDER BY checkout_date DESC LIMIT ${} OFFSET ${}",
            where_clause,
            idx + 1,
            idx + 2
        );

        let mut builder = sqlx::query_as::<_, Assignment>(&sql);
        if let Some(v) = query.device_id {
            builder = builder.bind(v);
        }
        if let Some(v) = query.user_id {
            builder = builder.bind(v);
        }

        let assignments = builder.bind(limit).bind(skip).fetch_all(&self.pool).await?;
        Ok(assignments)
    }

    /// Check a device out to a user.
    ///
    /// Preconditions checked under the device row lock: the device exists,
    /// is not checked out and not retired; the holder exists and is active.
    /// The assignment insert and the device flag update commit together.
    pub async fn create(&self, data: &CreateAssignment) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await?;

        let device = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE device_id = $1 FOR UPDATE",
        )
        .bind(data.device_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Device with id {} not found", data.device_id))
        })?;

        if device.is_checked_out {
            return Err(AppError::Conflict(
                "Device is already checked out".to_string(),
            ));
        }
        if device.is_retired {
            return Err(AppError::Conflict(
                "Cannot assign a retired device".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(data.user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with id {} not found", data.user_id))
            })?;

        if !user.is_active {
            return Err(AppError::Conflict(
                "Cannot assign to inactive user".to_string(),
            ));
        }

        if let Some(created_by) = data.created_by {
            sqlx::query_scalar::<_, i32>("SELECT user_id FROM users WHERE user_id = $1")
                .bind(created_by)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("User with id {} not found", created_by))
                })?;
        }

        let checkout_date = data
            .checkout_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO device_assignments (device_id, user_id, checkout_date,
                                            expected_return_date, checkout_condition,
                                            notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.device_id)
        .bind(data.user_id)
        .bind(checkout_date)
        .bind(data.expected_return_date)
        .bind(&data.checkout_condition)
        .bind(&data.notes)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE devices SET is_checked_out = TRUE, last_modified_date = NOW() WHERE device_id = $1",
        )
        .bind(data.device_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Return a checked-out device.
    ///
    /// Fails with a conflict when the assignment was already returned. The
    /// assignment update and the device flag update commit together.
    pub async fn return_device(
        &self,
        id: i32,
        data: &ReturnAssignment,
    ) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await?;

        let assignment = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM device_assignments WHERE assignment_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))?;

        if assignment.actual_return_date.is_some() {
            return Err(AppError::Conflict(
                "Device has already been returned".to_string(),
            ));
        }

        let actual_return_date = data
            .actual_return_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let notes = merge_return_notes(assignment.notes.as_deref(), data.notes.as_deref());

        let returned = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE device_assignments
            SET actual_return_date = $2, return_condition = $3, notes = $4,
                last_modified_date = NOW()
            WHERE assignment_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actual_return_date)
        .bind(&data.return_condition)
        .bind(&notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE devices SET is_checked_out = FALSE, last_modified_date = NOW() WHERE device_id = $1",
        )
        .bind(assignment.device_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(returned)
    }

    /// Update an assignment's non-lifecycle fields
    pub async fn update(&self, id: i32, data: &UpdateAssignment) -> AppResult<Assignment> {
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

        set_field!(data.expected_return_date, "expected_return_date");
        set_field!(data.checkout_condition, "checkout_condition");
        set_field!(data.notes, "notes");

        let sql = format!(
            "UPDATE device_assignments SET {} WHERE assignment_id = ${} RETURNING *",
            sets.join(", "),
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Assignment>(&sql);
        if let Some(ref v) = data.expected_return_date {
            builder = builder.bind(*v);
        }
        if let Some(ref v) = data.checkout_condition {
            builder = builder.bind(v.clone());
        }
        if let Some(ref v) = data.notes {
            builder = builder.bind(v.clone());
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))
    }
}

/// Merge return notes into the stored assignment notes.
///
/// Incoming notes get a literal "Return Notes: " prefix; prior notes are
/// kept above them, separated by a blank line.
fn merge_return_notes(existing: Option<&str>, incoming: Option<&str>) -> Option<String> {
    match incoming {
        None => existing.map(String::from),
        Some(new_notes) => match existing {
            Some(prior) => Some(format!("{}\n\nReturn Notes: {}", prior, new_notes)),
            None => Some(format!("Return Notes: {}", new_notes)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::merge_return_notes;

    #[test]
    fn no_incoming_notes_keeps_existing() {
        assert_eq!(merge_return_notes(None, None), None);
        assert_eq!(
            merge_return_notes(Some("scratched lid"), None),
            Some("scratched lid".to_string())
        );
    }

    #[test]
    fn incoming_notes_without_prior_get_prefix_only() {
        assert_eq!(
            merge_return_notes(None, Some("charger missing")),
            Some("Return Notes: charger missing".to_string())
        );
    }

    #[test]
    fn incoming_notes_append_after_blank_line() {
        assert_eq!(
            merge_return_notes(Some("scratched lid"), Some("charger missing")),
            Some("scratched lid\n\nReturn Notes: charger missing".to_string())
        );
    }
}
