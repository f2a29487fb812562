use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entities::product::{
        self, Column as ProductColumn, Currency, Entity as Product, LocationStatus, ProductStatus,
    },
    entities::report::{self, Entity as Report},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Quantity at or below which a product counts toward the low-stock alert.
const LOW_STOCK_THRESHOLD: i32 = 5;

/// Manual product creation input. Spanish aliases keep the legacy frontend
/// payloads working unmodified.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductInput {
    #[serde(alias = "nombre")]
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub sku: String,

    #[serde(alias = "cantidad")]
    #[validate(range(min = 0))]
    pub quantity: i32,

    #[serde(default, alias = "precio")]
    pub price: Option<Decimal>,

    #[serde(default, alias = "categoria")]
    pub category: Option<String>,

    #[serde(default, alias = "unidad")]
    pub unit: Option<String>,

    #[serde(default, alias = "moneda")]
    pub currency: Option<Currency>,

    #[serde(default, alias = "estado")]
    pub status: Option<ProductStatus>,

    #[serde(default, alias = "ubicacion")]
    pub location: Option<String>,
}

/// Partial product update. Only the whitelisted fields are mutable;
/// unspecified fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductInput {
    #[serde(default, alias = "nombre")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,

    #[serde(default, alias = "cantidad")]
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,

    #[serde(default, alias = "precio")]
    pub price: Option<Decimal>,

    #[serde(default, alias = "categoria")]
    pub category: Option<String>,

    #[serde(default, alias = "unidad")]
    pub unit: Option<String>,

    #[serde(default, alias = "moneda")]
    pub currency: Option<Currency>,

    #[serde(default, alias = "estado")]
    pub status: Option<ProductStatus>,

    #[serde(default, alias = "ubicacion")]
    pub location: Option<String>,
}

/// One purchase line item. Every field is optional; missing values take
/// per-item defaults rather than failing the batch.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct PurchaseLineItem {
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,

    #[serde(default)]
    pub qty: Option<i32>,

    #[serde(default, alias = "unidad")]
    pub unit: Option<String>,

    #[serde(default)]
    pub subtotal: Option<Decimal>,

    #[serde(default, alias = "moneda")]
    pub currency: Option<Currency>,

    #[serde(default)]
    pub diameter: Option<String>,

    #[serde(default)]
    pub series: Option<String>,

    #[serde(default)]
    pub material_type: Option<String>,

    #[serde(default)]
    pub amount_pen: Option<Decimal>,
}

/// Batch intake payload sent by the purchasing module once a purchase is
/// paid out.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PurchaseIntakeInput {
    #[validate(length(min = 1, message = "there are no items to add"))]
    pub items: Vec<PurchaseLineItem>,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub batch_id: Option<String>,
}

/// Warehouse slot assignment request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignLocationInput {
    pub product_id: i64,

    #[serde(alias = "zona")]
    #[validate(length(min = 1, max = 1, message = "zone must be a single character"))]
    pub zone: String,

    #[serde(alias = "nivel")]
    #[validate(range(min = 1, max = 4))]
    pub level: i32,

    #[serde(alias = "posicion")]
    #[validate(range(min = 1, max = 8))]
    pub position: i32,
}

/// Inventory statistics computed in one pass over every product row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryStats {
    pub total_products: u64,
    pub active_products: u64,
    pub total_value_usd: f64,
    pub stock_alert: u64,
}

/// Service owning all product-store access: catalog CRUD, statistics,
/// purchase intake, the reserved backlog, slot assignment and verification.
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
    usd_exchange_rate: Decimal,
}

impl InventoryService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: EventSender,
        usd_exchange_rate: Decimal,
    ) -> Self {
        Self {
            db,
            event_sender,
            usd_exchange_rate,
        }
    }

    async fn publish(&self, event: Event) -> Result<(), ServiceError> {
        self.event_sender
            .send(event)
            .await
            .map_err(ServiceError::EventError)
    }

    /// All non-reserved products, newest first. Reserved rows only surface
    /// through the reserved-items backlog.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        let products = Product::find()
            .filter(
                Condition::any()
                    .add(ProductColumn::Reserved.eq(false))
                    .add(ProductColumn::Reserved.is_null()),
            )
            .order_by_desc(ProductColumn::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(products)
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> Result<Option<product::Model>, ServiceError> {
        let product = Product::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(product)
    }

    /// Create a product from manual entry.
    #[instrument(skip(self, input))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let existing = Product::find()
            .filter(ProductColumn::Sku.eq(&input.sku))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Product with SKU '{}' already exists",
                input.sku
            )));
        }

        let location_status = input.location.as_ref().map(|_| LocationStatus::Assigned);
        let model = product::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            sku: Set(input.sku),
            quantity: Set(input.quantity),
            price: Set(input.price.unwrap_or(Decimal::ZERO)),
            currency: Set(input.currency.unwrap_or(Currency::Pen)),
            category: Set(input.category.unwrap_or_else(|| "Other".to_string())),
            unit: Set(input.unit.unwrap_or_else(|| "UND".to_string())),
            status: Set(input.status.unwrap_or(ProductStatus::Active)),
            location: Set(input.location),
            location_status: Set(location_status),
            reserved: Set(false),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await?;
        self.publish(Event::ProductCreated(created.id)).await?;

        info!(product_id = created.id, sku = %created.sku, "product created");
        Ok(created)
    }

    /// Partial update over the mutable field whitelist.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i64,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let product = Product::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let mut product: product::ActiveModel = product.into();

        if let Some(name) = input.name {
            product.name = Set(name);
        }
        if let Some(description) = input.description {
            product.description = Set(Some(description));
        }
        if let Some(sku) = input.sku {
            product.sku = Set(sku);
        }
        if let Some(quantity) = input.quantity {
            product.quantity = Set(quantity);
        }
        if let Some(price) = input.price {
            product.price = Set(price);
        }
        if let Some(category) = input.category {
            product.category = Set(category);
        }
        if let Some(unit) = input.unit {
            product.unit = Set(unit);
        }
        if let Some(currency) = input.currency {
            product.currency = Set(currency);
        }
        if let Some(status) = input.status {
            product.status = Set(status);
        }
        if let Some(location) = input.location {
            product.location = Set(Some(location));
        }

        let updated = product.update(self.db.as_ref()).await?;
        self.publish(Event::ProductUpdated(updated.id)).await?;

        info!(product_id = updated.id, "product updated");
        Ok(updated)
    }

    /// Lenient delete: a missing row is still a success. An existing product
    /// takes its reports with it in the same transaction.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let Some(product) = Product::find_by_id(id).one(self.db.as_ref()).await? else {
            return Ok(());
        };

        let txn = self.db.begin().await?;
        Report::delete_many()
            .filter(report::Column::ProductId.eq(product.id))
            .exec(&txn)
            .await?;
        Product::delete_by_id(product.id).exec(&txn).await?;
        txn.commit().await?;

        self.publish(Event::ProductDeleted(id)).await?;

        info!(product_id = id, "product deleted");
        Ok(())
    }

    /// Inventory statistics: counts plus total value converted to USD at the
    /// injected exchange rate, rounded to 2 decimals. Scans every row on
    /// every call; there is no cached or incremental total.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<InventoryStats, ServiceError> {
        let products = Product::find().all(self.db.as_ref()).await?;

        let mut active: u64 = 0;
        let mut stock_alert: u64 = 0;
        let mut total_value = Decimal::ZERO;

        for p in &products {
            if p.status == ProductStatus::Active {
                active += 1;
            }
            if p.quantity <= LOW_STOCK_THRESHOLD {
                stock_alert += 1;
            }
            let qty = Decimal::from(p.quantity);
            total_value += match p.currency {
                Currency::Usd => p.price * qty,
                Currency::Pen => (p.price / self.usd_exchange_rate) * qty,
            };
        }

        Ok(InventoryStats {
            total_products: products.len() as u64,
            active_products: active,
            total_value_usd: total_value.round_dp(2).to_f64().unwrap_or(0.0),
            stock_alert,
        })
    }

    /// Ingest paid purchase line items as reserved stock awaiting placement.
    ///
    /// Each item gets a synthesized `INV-` SKU; the improbable collision is
    /// skipped rather than failing the batch.
    #[instrument(skip(self, input))]
    pub async fn add_purchased_items(
        &self,
        input: PurchaseIntakeInput,
    ) -> Result<Vec<product::Model>, ServiceError> {
        if input.items.is_empty() {
            return Err(ServiceError::InvalidInput(
                "There are no items to add".to_string(),
            ));
        }

        let mut added = Vec::with_capacity(input.items.len());

        for item in &input.items {
            let description = item.description.clone().unwrap_or_default();
            let sku = intake_sku(input.batch_id.as_deref(), &description);

            let exists = Product::find()
                .filter(ProductColumn::Sku.eq(&sku))
                .one(self.db.as_ref())
                .await?;
            if exists.is_some() {
                warn!(%sku, "intake SKU collision, skipping item");
                continue;
            }

            let name = if description.is_empty() {
                "Material sin descripción".to_string()
            } else {
                description.clone()
            };

            let model = product::ActiveModel {
                name: Set(name),
                sku: Set(sku),
                description: Set(Some(description)),
                quantity: Set(item.qty.unwrap_or(1)),
                unit: Set(item.unit.clone().unwrap_or_else(|| "UND".to_string())),
                price: Set(item.subtotal.unwrap_or(Decimal::ZERO)),
                currency: Set(item.currency.unwrap_or(Currency::Pen)),
                category: Set("Purchased Materials".to_string()),
                location: Set(None),
                status: Set(ProductStatus::Active),
                reserved: Set(true),
                project_name: Set(input.project_name.clone()),
                location_status: Set(Some(LocationStatus::Pending)),
                project_id: Set(input.project_id.clone()),
                batch_id: Set(input.batch_id.clone()),
                diameter: Set(item.diameter.clone()),
                series: Set(item.series.clone()),
                material_type: Set(item.material_type.clone()),
                amount: Set(item.subtotal),
                amount_pen: Set(item.amount_pen.or(item.subtotal)),
                ..Default::default()
            };

            added.push(model.insert(self.db.as_ref()).await?);
        }

        self.publish(Event::PurchaseItemsReceived {
            batch_id: input.batch_id.clone(),
            count: added.len(),
        })
        .await?;

        info!(
            batch_id = ?input.batch_id,
            project_id = ?input.project_id,
            items_count = added.len(),
            "items added to inventory from purchasing"
        );

        Ok(added)
    }

    /// Reserved products awaiting a warehouse slot, newest first.
    #[instrument(skip(self))]
    pub async fn reserved_items(&self) -> Result<Vec<product::Model>, ServiceError> {
        let items = Product::find()
            .filter(ProductColumn::Reserved.eq(true))
            .order_by_desc(ProductColumn::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(items)
    }

    /// Assign a warehouse slot to a product.
    ///
    /// The collision check and the write run inside one transaction, and the
    /// unique index on the location column backstops a concurrent assignment
    /// of the same code: the loser surfaces the identical conflict error.
    /// Assignment clears the reservation flag, returning the item to the
    /// main catalog listing.
    #[instrument(skip(self))]
    pub async fn assign_location(&self, input: AssignLocationInput) -> Result<String, ServiceError> {
        let code = format!("{}-{}-{}", input.zone, input.level, input.position);

        let txn = self.db.begin().await?;

        let occupied = Product::find()
            .filter(ProductColumn::Location.eq(&code))
            .filter(ProductColumn::Id.ne(input.product_id))
            .one(&txn)
            .await?;
        if occupied.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Location {} is already occupied",
                code
            )));
        }

        let product = Product::find_by_id(input.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product {} not found", input.product_id))
            })?;

        let mut product: product::ActiveModel = product.into();
        product.location = Set(Some(code.clone()));
        product.location_status = Set(Some(LocationStatus::Assigned));
        product.reserved = Set(false);

        product
            .update(&txn)
            .await
            .map_err(|e| location_conflict_or_db(&code, e))?;
        txn.commit()
            .await
            .map_err(|e| location_conflict_or_db(&code, e))?;

        self.publish(Event::LocationAssigned {
            product_id: input.product_id,
            location: code.clone(),
        })
        .await?;

        info!(product_id = input.product_id, location = %code, "location assigned");
        Ok(code)
    }

    /// Stamp a product as verified by the acting user. Re-verification
    /// overwrites the previous stamp.
    #[instrument(skip(self))]
    pub async fn verify_product(
        &self,
        id: i64,
        user: String,
    ) -> Result<product::Model, ServiceError> {
        let product = Product::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let mut product: product::ActiveModel = product.into();
        product.verified_at = Set(Some(chrono::Utc::now()));
        product.verified_by = Set(Some(user.clone()));
        let updated = product.update(self.db.as_ref()).await?;

        self.publish(Event::ProductVerified {
            product_id: id,
            verified_by: user,
        })
        .await?;

        info!(product_id = id, "product verified");
        Ok(updated)
    }
}

/// Maps a unique-constraint violation on the location column to the same
/// conflict error the explicit check produces.
fn location_conflict_or_db(code: &str, err: sea_orm::DbErr) -> ServiceError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        ServiceError::Conflict(format!("Location {} is already occupied", code))
    } else {
        ServiceError::DatabaseError(err)
    }
}

/// Synthesizes an intake SKU: `INV-` plus the first 8 hex characters of a
/// hash over the batch id, the item description and a high-resolution clock
/// reading, so identical descriptions within one batch still get distinct
/// codes.
fn intake_sku(batch_id: Option<&str>, description: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(batch_id.unwrap_or_default().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(nanos.to_le_bytes());

    let digest = hex::encode(hasher.finalize());
    format!("INV-{}", &digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_sku_shape() {
        let sku = intake_sku(Some("batch-7"), "steel pipe 2in");
        assert!(sku.starts_with("INV-"));
        assert_eq!(sku.len(), 12);
        assert!(sku[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn intake_sku_differs_for_identical_items() {
        let a = intake_sku(Some("batch-7"), "steel pipe 2in");
        let b = intake_sku(Some("batch-7"), "steel pipe 2in");
        assert_ne!(a, b);
    }
}
