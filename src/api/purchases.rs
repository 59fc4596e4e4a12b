//! Purchase endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::purchase::{CreatePurchase, Purchase, PurchaseDetail, PurchaseQuery, UpdatePurchase},
};

/// List purchases, most recent first
#[utoipa::path(
    get,
    path = "/purchases",
    tag = "purchases",
    params(PurchaseQuery),
    responses(
        (status = 200, description = "List of purchases", body = Vec<Purchase>)
    )
)]
pub async fn list_purchases(
    State(state): State<crate::AppState>,
    Query(query): Query<PurchaseQuery>,
) -> AppResult<Json<Vec<Purchase>>> {
    let purchases = state.services.purchases.list(&query).await?;
    Ok(Json(purchases))
}

/// Get a purchase with the devices bought under it
#[utoipa::path(
    get,
    path = "/purchases/{id}",
    tag = "purchases",
    params(("id" = i32, Path, description = "Purchase ID")),
    responses(
        (status = 200, description = "Purchase details", body = PurchaseDetail),
        (status = 404, description = "Purchase not found")
    )
)]
pub async fn get_purchase(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PurchaseDetail>> {
    let purchase = state.services.purchases.get_detail(id).await?;
    Ok(Json(purchase))
}

/// Create a new purchase
#[utoipa::path(
    post,
    path = "/purchases",
    tag = "purchases",
    request_body = CreatePurchase,
    responses(
        (status = 200, description = "Purchase created", body = Purchase),
        (status = 400, description = "Duplicate purchase order")
    )
)]
pub async fn create_purchase(
    State(state): State<crate::AppState>,
    Json(purchase): Json<CreatePurchase>,
) -> AppResult<Json<Purchase>> {
    let created = state.services.purchases.create(purchase).await?;
    Ok(Json(created))
}

/// Update an existing purchase
#[utoipa::path(
    put,
    path = "/purchases/{id}",
    tag = "purchases",
    params(("id" = i32, Path, description = "Purchase ID")),
    request_body = UpdatePurchase,
    responses(
        (status = 200, description = "Purchase updated", body = Purchase),
        (status = 404, description = "Purchase not found"),
        (status = 400, description = "Duplicate purchase order")
    )
)]
pub async fn update_purchase(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(purchase): Json<UpdatePurchase>,
) -> AppResult<Json<Purchase>> {
    let updated = state.services.purchases.update(id, purchase).await?;
    Ok(Json(updated))
}
