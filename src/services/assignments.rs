//! Assignment lifecycle service
//!
//! The checkout and return preconditions live in the repository, inside the
//! transaction that performs the paired writes; this service is the thin
//! entry point the API layer calls.

use crate::{
    error::AppResult,
    models::assignment::{
        Assignment, AssignmentDetail, AssignmentQuery, CreateAssignment, ReturnAssignment,
        UpdateAssignment,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
}

impl AssignmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<Assignment>> {
        self.repository.assignments.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Assignment> {
        self.repository.assignments.get_by_id(id).await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<AssignmentDetail> {
        self.repository.assignments.get_detail(id).await
    }

    /// Check a device out to a user
    pub async fn create(&self, data: CreateAssignment) -> AppResult<Assignment> {
        self.repository.assignments.create(&data).await
    }

    /// Return a checked-out device
    pub async fn return_device(&self, id: i32, data: ReturnAssignment) -> AppResult<Assignment> {
        self.repository.assignments.return_device(id, &data).await
    }

    /// Update an assignment's non-lifecycle fields
    pub async fn update(&self, id: i32, data: UpdateAssignment) -> AppResult<Assignment> {
        self.repository.assignments.update(id, &data).await
    }
}
