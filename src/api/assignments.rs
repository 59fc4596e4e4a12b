//! Assignment (checkout/return) endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::assignment::{
        Assignment, AssignmentDetail, AssignmentQuery, CreateAssignment, ReturnAssignment,
        UpdateAssignment,
    },
};

use super::CurrentUser;

/// List assignments with optional filters, most recent checkout first
#[utoipa::path(
    get,
    path = "/assignments",
    tag = "assignments",
    params(AssignmentQuery),
    responses(
        (status = 200, description = "List of assignments", body = Vec<Assignment>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<Json<Vec<Assignment>>> {
    let assignments = state.services.assignments.list(&query).await?;
    Ok(Json(assignments))
}

/// Get an assignment with device, holder and creator details
#[utoipa::path(
    get,
    path = "/assignments/{id}",
    tag = "assignments",
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment details", body = AssignmentDetail),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn get_assignment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AssignmentDetail>> {
    let assignment = state.services.assignments.get_detail(id).await?;
    Ok(Json(assignment))
}

/// Check a device out to a user
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "assignments",
    request_body = CreateAssignment,
    responses(
        (status = 200, description = "Assignment created", body = Assignment),
        (status = 404, description = "Device or user not found"),
        (status = 400, description = "Device already checked out, retired, or user inactive")
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    CurrentUser(claims): CurrentUser,
    Json(mut assignment): Json<CreateAssignment>,
) -> AppResult<Json<Assignment>> {
    // Default the recorder to the caller when a token was supplied
    if assignment.created_by.is_none() {
        assignment.created_by = claims.map(|c| c.user_id);
    }

    let created = state.services.assignments.create(assignment).await?;
    Ok(Json(created))
}

/// Update an assignment's non-lifecycle fields
#[utoipa::path(
    put,
    path = "/assignments/{id}",
    tag = "assignments",
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = Assignment),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn update_assignment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(assignment): Json<UpdateAssignment>,
) -> AppResult<Json<Assignment>> {
    let updated = state.services.assignments.update(id, assignment).await?;
    Ok(Json(updated))
}

/// Return a checked-out device
#[utoipa::path(
    put,
    path = "/assignments/{id}/return",
    tag = "assignments",
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = ReturnAssignment,
    responses(
        (status = 200, description = "Device returned", body = Assignment),
        (status = 404, description = "Assignment not found"),
        (status = 400, description = "Device has already been returned")
    )
)]
pub async fn return_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(return_info): Json<ReturnAssignment>,
) -> AppResult<Json<Assignment>> {
    let returned = state
        .services
        .assignments
        .return_device(id, return_info)
        .await?;
    Ok(Json(returned))
}
