use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Report lifecycle status. Transitions only move forward:
/// pending -> reviewed -> resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(alias = "pendiente")]
    Pending,
    #[sea_orm(string_value = "reviewed")]
    #[serde(alias = "revisado")]
    Reviewed,
    #[sea_orm(string_value = "resolved")]
    #[serde(alias = "resuelto")]
    Resolved,
}

impl ReportStatus {
    /// Position in the forward-only lifecycle.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Reviewed => 1,
            Self::Resolved => 2,
        }
    }
}

/// Materials-non-receipt report tied to one product.
///
/// Product name/SKU/project are denormalized at creation time and do not
/// track later product edits.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "inventory_reports")]
#[schema(as = Report)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub product_id: i64,

    /// Snapshot of the product name at creation time
    pub product_name: String,

    /// Snapshot of the product SKU at creation time
    pub product_sku: String,

    /// Snapshot of the product's project at creation time
    pub project_name: String,

    pub reason: String,

    pub reported_by: String,

    pub status: ReportStatus,

    pub notes: Option<String>,

    pub solution: Option<String>,

    pub reviewed_at: Option<DateTime<Utc>>,

    pub reviewed_by: Option<String>,

    pub resolved_at: Option<DateTime<Utc>>,

    pub resolved_by: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
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
