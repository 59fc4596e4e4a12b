//! Purchases repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        device::DeviceBrief,
        purchase::{CreatePurchase, Purchase, PurchaseDetail, PurchaseQuery, UpdatePurchase},
    },
};

#[derive(Clone)]
pub struct PurchasesRepository {
    pool: Pool<Postgres>,
}

impl PurchasesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get purchase by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Purchase> {
        sqlx::query_as::<_, Purchase>("SELECT * FROM purchases WHERE purchase_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Purchase with id {} not found", id)))
    }

    /// Get purchase by purchase order number
    pub async fn get_by_purchase_order(&self, purchase_order: &str) -> AppResult<Option<Purchase>> {
        let purchase = sqlx::query_as::<_, Purchase>(
            "SELECT * FROM purchases WHERE purchase_order = $1",
        )
        .bind(purchase_order)
        .fetch_optional(&self.pool)
        .await?;
        Ok(purchase)
    }

    /// Get purchase with the devices bought under it
    pub async fn get_detail(&self, id: i32) -> AppResult<PurchaseDetail> {
        let purchase = self.get_by_id(id).await?;

        let devices = sqlx::query_as::<_, DeviceBrief>(
            r#"
            SELECT device_id, serial_number, device_name, model, is_checked_out, is_retired
            FROM devices
            WHERE purchase_id = $1
            ORDER BY device_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(PurchaseDetail { purchase, devices })
    }

    /// List purchases, most recent purchase date first
    pub async fn list(&self, query: &PurchaseQuery) -> AppResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(
            "SELECT * FROM purchases ORDER BY purchase_date DESC NULLS LAST LIMIT $1 OFFSET $2",
        )
        .bind(query.limit.unwrap_or(100))
        .bind(query.skip.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(purchases)
    }

    /// Create a purchase
    pub async fn create(&self, data: &CreatePurchase) -> AppResult<Purchase> {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (purchase_order, purchase_date, vendor, total_amount, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.purchase_order)
        .bind(data.purchase_date)
        .bind(&data.vendor)
        .bind(data.total_amount)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(purchase)
    }

    /// Update a purchase, only touching supplied fields
    pub async fn update(&self, id: i32, data: &UpdatePurchase) -> AppResult<Purchase> {
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

        set_field!(data.purchase_order, "purchase_order");
        set_field!(data.purchase_date, "purchase_date");
        set_field!(data.vendor, "vendor");
        set_field!(data.total_amount, "total_amount");
        set_field!(data.notes, "notes");

        let sql = format!(
            "UPDATE purchases SET {} WHERE purchase_id = ${} RETURNING *",
            sets.join(", "),
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Purchase>(&sql);
        if let Some(ref v) = data.purchase_order {
            builder = builder.bind(v.clone());
        }
        if let Some(ref v) = data.purchase_date {
            builder = builder.bind(*v);
        }
        if let Some(ref v) = data.vendor {
            builder = builder.bind(v.clone());
        }
        if let Some(ref v) = data.total_amount {
            builder = builder.bind(*v);
        }
        if let Some(ref v) = data.notes {
            builder = builder.bind(v.clone());
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Purchase with id {} not found", id)))
    }
}
