//! Repository layer for database operations

pub mod assignments;
pub mod device_types;
pub mod devices;
pub mod purchases;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub device_types: device_types::DeviceTypesRepository,
    pub purchases: purchases::PurchasesRepository,
    pub devices: devices::DevicesRepository,
    pub assignments: assignments::AssignmentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            device_types: device_types::DeviceTypesRepository::new(pool.clone()),
            purchases: purchases::PurchasesRepository::new(pool.clone()),
            devices: devices::DevicesRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            pool,
        }
    }
}
