//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, auth, device_types, devices, health, purchases, reports, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventra API",
        version = "0.3.0",
        description = "IT Asset Inventory REST API",
        license(name = "MIT")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        // Device types
        device_types::list_device_types,
        device_types::get_device_type,
        device_types::create_device_type,
        device_types::update_device_type,
        // Purchases
        purchases::list_purchases,
        purchases::get_purchase,
        purchases::create_purchase,
        purchases::update_purchase,
        // Devices
        devices::list_devices,
        devices::get_device,
        devices::create_device,
        devices::update_device,
        devices::retire_device,
        // Assignments
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::create_assignment,
        assignments::update_assignment,
        assignments::return_device,
        // Reports
        reports::devices_by_type,
        reports::device_status,
        reports::user_assignments,
        reports::expiring_warranties,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            crate::models::user::User,
            crate::models::user::UserBrief,
            crate::models::user::UserDetail,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Device types
            crate::models::device_type::DeviceType,
            crate::models::device_type::DeviceTypeBrief,
            crate::models::device_type::CreateDeviceType,
            crate::models::device_type::UpdateDeviceType,
            // Purchases
            crate::models::purchase::Purchase,
            crate::models::purchase::PurchaseBrief,
            crate::models::purchase::PurchaseDetail,
            crate::models::purchase::CreatePurchase,
            crate::models::purchase::UpdatePurchase,
            // Devices
            crate::models::device::Device,
            crate::models::device::DeviceBrief,
            crate::models::device::DeviceDetail,
            crate::models::device::CreateDevice,
            crate::models::device::UpdateDevice,
            // Assignments
            crate::models::assignment::Assignment,
            crate::models::assignment::AssignmentBrief,
            crate::models::assignment::AssignmentDetail,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::UpdateAssignment,
            crate::models::assignment::ReturnAssignment,
            // Reports
            reports::DeviceTypeCount,
            reports::DeviceStatusCount,
            reports::UserAssignmentCount,
            reports::ExpiringWarranty,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication placeholder"),
        (name = "users", description = "User management"),
        (name = "device types", description = "Device type management"),
        (name = "purchases", description = "Purchase management"),
        (name = "devices", description = "Device registry and lifecycle"),
        (name = "assignments", description = "Checkout and return"),
        (name = "reports", description = "Inventory reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
