use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Price currency. Closed set so invalid values never reach storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Currency {
    #[sea_orm(string_value = "USD")]
    #[serde(rename = "USD")]
    Usd,
    #[sea_orm(string_value = "PEN")]
    #[serde(rename = "PEN")]
    Pen,
}

/// Product lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[sea_orm(string_value = "active")]
    #[serde(alias = "activo")]
    Active,
    #[sea_orm(string_value = "pending")]
    #[serde(alias = "pendiente")]
    Pending,
    #[sea_orm(string_value = "rejected")]
    #[serde(alias = "rechazado")]
    Rejected,
}

/// Slot-assignment state for purchased stock awaiting placement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(alias = "pendiente")]
    Pending,
    #[sea_orm(string_value = "assigned")]
    #[serde(alias = "asignada")]
    Assigned,
}

/// Inventory product.
///
/// A row is either manually created catalog stock or a line item received
/// from the purchasing module (`reserved = true` until a warehouse slot is
/// assigned). The `location` column holds a `zone-level-position` slot code
/// and is unique among non-null values.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "inventory_products")]
#[schema(as = Product)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    pub description: Option<String>,

    /// Stock Keeping Unit; intake rows carry a synthesized `INV-` code
    pub sku: String,

    pub quantity: i32,

    /// Unit price in `currency`
    pub price: Decimal,

    pub currency: Currency,

    pub category: String,

    /// Unit of measure (e.g. "UND", "KG")
    pub unit: String,

    pub status: ProductStatus,

    /// Warehouse slot code `zone-level-position`, unique among non-null values
    pub location: Option<String>,

    pub location_status: Option<LocationStatus>,

    /// Received from purchasing but not yet assigned a physical slot
    pub reserved: bool,

    pub project_id: Option<String>,

    pub project_name: Option<String>,

    /// Purchase batch that produced this row
    pub batch_id: Option<String>,

    pub diameter: Option<String>,

    pub series: Option<String>,

    pub material_type: Option<String>,

    /// Purchased amount in the original currency
    pub amount: Option<Decimal>,

    /// Purchased amount in PEN
    pub amount_pen: Option<Decimal>,

    /// Verification stamp; both fields set together, overwritten on re-verify
    pub verified_at: Option<DateTime<Utc>>,

    pub verified_by: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(Utc::now());
            }
        }
        active_model.updated_at = Set(Some(Utc::now()));

        Ok(active_model)
    }
}
