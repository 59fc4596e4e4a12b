//! Business logic services

pub mod assignments;
pub mod auth;
pub mod device_types;
pub mod devices;
pub mod purchases;
pub mod reports;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub device_types: device_types::DeviceTypesService,
    pub purchases: purchases::PurchasesService,
    pub devices: devices::DevicesService,
    pub assignments: assignments::AssignmentsService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            users: users::UsersService::new(repository.clone()),
            device_types: device_types::DeviceTypesService::new(repository.clone()),
            purchases: purchases::PurchasesService::new(repository.clone()),
            devices: devices::DevicesService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(repository.clone()),
            reports: reports::ReportsService::new(repository),
        }
    }
}
