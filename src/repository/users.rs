//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::AssignmentBrief,
        user::{CreateUser, UpdateUser, User, UserDetail, UserQuery},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Get user with their active assignments
    pub async fn get_detail(&self, id: i32) -> AppResult<UserDetail> {
        let user = self.get_by_id(id).await?;

        let active_assignments = sqlx::query_as::<_, AssignmentBrief>(
            r#"
            SELECT assignment_id, checkout_date, expected_return_date, actual_return_date
            FROM device_assignments
            WHERE user_id = $1 AND actual_return_date IS NULL
            ORDER BY checkout_date DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserDetail {
            user,
            active_assignments,
        })
    }

    /// List users with optional filters and pagination
    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(100);

        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.is_active.is_some() {
            idx += 1;
            conditions.push(format!("is_active = ${}", idx));
        }
        if query.search.is_some() {
            idx += 1;
            conditions.push(format!(
                "(first_name ILIKE ${i} OR last_name ILIKE ${i} OR username ILIKE ${i} OR email ILIKE ${i})",
                i = idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM users {} ORDER BY last_name, first_name LIMIT ${} OFFSET ${}",
            where_clause,
            idx + 1,
            idx + 2
        );

        let mut builder = sqlx::query_as::<_, User>(&sql);
        if let Some(v) = query.is_active {
            builder = builder.bind(v);
        }
        if let Some(ref s) = query.search {
            builder = builder.bind(format!("%{}%", s));
        }

        let users = builder.bind(limit).bind(skip).fetch_all(&self.pool).await?;
        Ok(users)
    }

    /// Create a user. The password, if any, arrives pre-hashed.
    pub async fn create(
        &self,
        data: &CreateUser,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, username, email, password_hash,
                               is_active, is_admin, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.username)
        .bind(&data.email)
        .bind(password_hash)
        .bind(data.is_active)
        .bind(data.is_admin)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Update a user, only touching supplied fields
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateUser,
        password_hash: Option<String>,
    ) -> AppResult<User> {
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

        set_field!(data.first_name, "first_name");
        set_field!(data.last_name, "last_name");
        set_field!(data.username, "username");
        set_field!(data.email, "email");
        set_field!(password_hash, "password_hash");
        set_field!(data.is_active, "is_active");
        set_field!(data.is_admin, "is_admin");
        set_field!(data.start_date, "start_date");
        set_field!(data.end_date, "end_date");

        let sql = format!(
            "UPDATE users SET {} WHERE user_id = ${} RETURNING *",
            sets.join(", "),
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, User>(&sql);
        if let Some(ref v) = data.first_name {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.last_name {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.username {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.email {
            builder = builder.bind(v);
        }
        if let Some(ref v) = password_hash {
            builder = builder.bind(v);
        }
        if let Some(v) = data.is_active {
            builder = builder.bind(v);
        }
        if let Some(v) = data.is_admin {
            builder = builder.bind(v);
        }
        if let Some(ref v) = data.start_date {
            builder = builder.bind(*v);
        }
        if let Some(ref v) = data.end_date {
            builder = builder.bind(*v);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }
}
