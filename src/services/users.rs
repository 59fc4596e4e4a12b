//! User management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User, UserDetail, UserQuery},
    repository::Repository,
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        self.repository.users.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<UserDetail> {
        self.repository.users.get_detail(id).await
    }

    /// Create a user after checking username and email uniqueness
    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .users
            .get_by_username(&data.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already registered".to_string()));
        }

        if self
            .repository
            .users
            .get_by_email(&data.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = match data.password.as_deref() {
            Some(password) => Some(AuthService::hash_password(password)?),
            None => None,
        };

        self.repository.users.create(&data, password_hash).await
    }

    /// Update a user; unique fields are re-checked excluding the user itself
    pub async fn update(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Existence first, so a missing user is a 404 rather than a conflict
        self.repository.users.get_by_id(id).await?;

        if let Some(ref username) = data.username {
            if let Some(existing) = self.repository.users.get_by_username(username).await? {
                if existing.user_id != id {
                    return Err(AppError::Conflict(
                        "Username already registered".to_string(),
                    ));
                }
            }
        }

        if let Some(ref email) = data.email {
            if let Some(existing) = self.repository.users.get_by_email(email).await? {
                if existing.user_id != id {
                    return Err(AppError::Conflict("Email already registered".to_string()));
                }
            }
        }

        let password_hash = match data.password.as_deref() {
            Some(password) => Some(AuthService::hash_password(password)?),
            None => None,
        };

        self.repository.users.update(id, &data, password_hash).await
    }
}
