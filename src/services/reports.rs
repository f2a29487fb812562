use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entities::product::Entity as Product,
    entities::report::{self, Column as ReportColumn, Entity as Report, ReportStatus},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Actor recorded on a transition when the caller does not name one.
const SYSTEM_ACTOR: &str = "System";

/// Materials-non-receipt report creation input.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportInput {
    #[serde(alias = "producto_id")]
    pub product_id: i64,

    #[serde(alias = "motivo")]
    #[validate(length(min = 1))]
    pub reason: String,

    #[serde(alias = "reportado_por")]
    #[validate(length(min = 1))]
    pub reported_by: String,
}

/// Partial report update over the mutable field whitelist.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReportInput {
    #[serde(default, alias = "estado")]
    pub status: Option<ReportStatus>,

    #[serde(default, alias = "notas")]
    pub notes: Option<String>,

    #[serde(default, alias = "solucion")]
    pub solution: Option<String>,

    #[serde(default, alias = "resuelto_por")]
    pub resolved_by: Option<String>,

    #[serde(default, alias = "revisado_por")]
    pub reviewed_by: Option<String>,
}

/// Service owning the report store: creation with product snapshot, listing,
/// forward-only status transitions and strict deletion.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl ReportService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    async fn publish(&self, event: Event) -> Result<(), ServiceError> {
        self.event_sender
            .send(event)
            .await
            .map_err(ServiceError::EventError)
    }

    /// Create a report against an existing product, snapshotting its
    /// name/SKU/project as they are right now.
    #[instrument(skip(self, input))]
    pub async fn create_report(
        &self,
        input: CreateReportInput,
    ) -> Result<report::Model, ServiceError> {
        let product = Product::find_by_id(input.product_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product {} not found", input.product_id))
            })?;

        let model = report::ActiveModel {
            product_id: Set(product.id),
            product_name: Set(product.name.clone()),
            product_sku: Set(product.sku.clone()),
            project_name: Set(product
                .project_name
                .clone()
                .unwrap_or_else(|| "Sin proyecto".to_string())),
            reason: Set(input.reason),
            reported_by: Set(input.reported_by),
            status: Set(ReportStatus::Pending),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await?;
        self.publish(Event::ReportCreated(created.id)).await?;

        info!(report_id = created.id, product_id = product.id, "report created");
        Ok(created)
    }

    /// All reports, newest first. Filtering is a presentation concern.
    #[instrument(skip(self))]
    pub async fn list_reports(&self) -> Result<Vec<report::Model>, ServiceError> {
        let reports = Report::find()
            .order_by_desc(ReportColumn::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(reports)
    }

    /// Update a report. Status transitions only move forward
    /// (pending -> reviewed -> resolved); reaching a state stamps the
    /// corresponding actor and timestamp server-side, ignoring any
    /// client-supplied timestamps. Re-asserting the current status
    /// overwrites its stamp.
    #[instrument(skip(self, input))]
    pub async fn update_report(
        &self,
        id: i64,
        input: UpdateReportInput,
    ) -> Result<report::Model, ServiceError> {
        let current = Report::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Report {} not found", id)))?;

        if let Some(status) = input.status {
            if status.rank() < current.status.rank() {
                return Err(ServiceError::ValidationError(format!(
                    "Report status cannot move backward from '{}' to '{}'",
                    status_label(current.status),
                    status_label(status),
                )));
            }
        }

        let mut report: report::ActiveModel = current.into();

        if let Some(notes) = input.notes {
            report.notes = Set(Some(notes));
        }
        if let Some(solution) = input.solution {
            report.solution = Set(Some(solution));
        }
        if let Some(resolved_by) = input.resolved_by.clone() {
            report.resolved_by = Set(Some(resolved_by));
        }

        if let Some(status) = input.status {
            report.status = Set(status);
            match status {
                ReportStatus::Reviewed => {
                    report.reviewed_at = Set(Some(Utc::now()));
                    report.reviewed_by = Set(Some(
                        input.reviewed_by.unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
                    ));
                }
                ReportStatus::Resolved => {
                    report.resolved_at = Set(Some(Utc::now()));
                    report.resolved_by = Set(Some(
                        input.resolved_by.unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
                    ));
                }
                ReportStatus::Pending => {}
            }
        }

        let updated = report.update(self.db.as_ref()).await?;
        self.publish(Event::ReportUpdated(updated.id)).await?;

        info!(report_id = updated.id, "report updated");
        Ok(updated)
    }

    /// Strict delete: a missing report is an error, unlike product deletion.
    #[instrument(skip(self))]
    pub async fn delete_report(&self, id: i64) -> Result<(), ServiceError> {
        let report = Report::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Report {} not found", id)))?;

        Report::delete_by_id(report.id).exec(self.db.as_ref()).await?;
        self.publish(Event::ReportDeleted(id)).await?;

        info!(report_id = id, "report deleted");
        Ok(())
    }
}

fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "pending",
        ReportStatus::Reviewed => "reviewed",
        ReportStatus::Resolved => "resolved",
    }
}
