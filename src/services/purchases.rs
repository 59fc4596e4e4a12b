//! Purchase management service

use crate::{
    error::{AppError, AppResult},
    models::purchase::{CreatePurchase, Purchase, PurchaseDetail, PurchaseQuery, UpdatePurchase},
    repository::Repository,
};

#[derive(Clone)]
pub struct PurchasesService {
    repository: Repository,
}

impl PurchasesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PurchaseQuery) -> AppResult<Vec<Purchase>> {
        self.repository.purchases.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Purchase> {
        self.repository.purchases.get_by_id(id).await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<PurchaseDetail> {
        self.repository.purchases.get_detail(id).await
    }

    /// Create a purchase; the order number, when present, must be unique
    pub async fn create(&self, data: CreatePurchase) -> AppResult<Purchase> {
        if let Some(ref purchase_order) = data.purchase_order {
            if self
                .repository
                .purchases
                .get_by_purchase_order(purchase_order)
                .await?
                .is_some()
            {
                return Err(AppError::Conflict(
                    "Purchase order already exists".to_string(),
                ));
            }
        }

        self.repository.purchases.create(&data).await
    }

    /// Update a purchase; a new order number is re-checked excluding the
    /// purchase itself
    pub async fn update(&self, id: i32, data: UpdatePurchase) -> AppResult<Purchase> {
        self.repository.purchases.get_by_id(id).await?;

        if let Some(Some(ref purchase_order)) = data.purchase_order {
            if let Some(existing) = self
                .repository
                .purchases
                .get_by_purchase_order(purchase_order)
                .await?
            {
                if existing.purchase_id != id {
                    return Err(AppError::Conflict(
                        "Purchase order already exists".to_string(),
                    ));
                }
            }
        }

        self.repository.purchases.update(id, &data).await
    }
}
