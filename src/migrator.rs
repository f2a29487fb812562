use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_create_inventory_products_table::Migration),
            Box::new(m20260115_000002_add_verification_columns::Migration),
            Box::new(m20260115_000003_create_inventory_reports_table::Migration),
            Box::new(m20260115_000004_add_location_unique_index::Migration),
        ]
    }
}

// Migration implementations

mod m20260115_000001_create_inventory_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260115_000001_create_inventory_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryProducts::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InventoryProducts::Name).string().not_null())
                        .col(ColumnDef::new(InventoryProducts::Description).text().null())
                        .col(ColumnDef::new(InventoryProducts::Sku).string().not_null())
                        .col(
                            ColumnDef::new(InventoryProducts::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::Price)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::Currency)
                                .string()
                                .not_null()
                                .default("PEN"),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::Category)
                                .string()
                                .not_null()
                                .default("Other"),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::Unit)
                                .string()
                                .not_null()
                                .default("UND"),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::Status)
                                .string()
                                .not_null()
                                .default("active"),
                        )
                        .col(ColumnDef::new(InventoryProducts::Location).string().null())
                        .col(
                            ColumnDef::new(InventoryProducts::LocationStatus)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::Reserved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(InventoryProducts::ProjectId).string().null())
                        .col(
                            ColumnDef::new(InventoryProducts::ProjectName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryProducts::BatchId).string().null())
                        .col(ColumnDef::new(InventoryProducts::Diameter).string().null())
                        .col(ColumnDef::new(InventoryProducts::Series).string().null())
                        .col(
                            ColumnDef::new(InventoryProducts::MaterialType)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryProducts::Amount).decimal().null())
                        .col(
                            ColumnDef::new(InventoryProducts::AmountPen)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Useful indexes
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_products_sku")
                        .table(InventoryProducts::Table)
                        .col(InventoryProducts::Sku)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_products_reserved")
                        .table(InventoryProducts::Table)
                        .col(InventoryProducts::Reserved)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_products_created_at")
                        .table(InventoryProducts::Table)
                        .col(InventoryProducts::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryProducts {
        Table,
        Id,
        Name,
        Description,
        Sku,
        Quantity,
        Price,
        Currency,
        Category,
        Unit,
        Status,
        Location,
        LocationStatus,
        Reserved,
        ProjectId,
        ProjectName,
        BatchId,
        Diameter,
        Series,
        MaterialType,
        Amount,
        AmountPen,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260115_000002_add_verification_columns {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260115_000002_add_verification_columns"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // One column per statement; SQLite only supports single-column ALTERs
            manager
                .alter_table(
                    Table::alter()
                        .table(InventoryProducts::Table)
                        .add_column(
                            ColumnDef::new(InventoryProducts::VerifiedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .alter_table(
                    Table::alter()
                        .table(InventoryProducts::Table)
                        .add_column(ColumnDef::new(InventoryProducts::VerifiedBy).string().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .alter_table(
                    Table::alter()
                        .table(InventoryProducts::Table)
                        .drop_column(InventoryProducts::VerifiedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .alter_table(
                    Table::alter()
                        .table(InventoryProducts::Table)
                        .drop_column(InventoryProducts::VerifiedBy)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryProducts {
        Table,
        VerifiedAt,
        VerifiedBy,
    }
}

mod m20260115_000003_create_inventory_reports_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260115_000003_create_inventory_reports_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryReports::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryReports::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ProductName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ProductSku)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ProjectName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryReports::Reason).text().not_null())
                        .col(
                            ColumnDef::new(InventoryReports::ReportedBy)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(InventoryReports::Notes).text().null())
                        .col(ColumnDef::new(InventoryReports::Solution).text().null())
                        .col(
                            ColumnDef::new(InventoryReports::ReviewedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ReviewedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ResolvedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::ResolvedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReports::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_reports_product_id")
                                .from(InventoryReports::Table, InventoryReports::ProductId)
                                .to(InventoryProducts::Table, InventoryProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_reports_product_id")
                        .table(InventoryReports::Table)
                        .col(InventoryReports::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_reports_created_at")
                        .table(InventoryReports::Table)
                        .col(InventoryReports::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryReports::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryReports {
        Table,
        Id,
        ProductId,
        ProductName,
        ProductSku,
        ProjectName,
        Reason,
        ReportedBy,
        Status,
        Notes,
        Solution,
        ReviewedAt,
        ReviewedBy,
        ResolvedAt,
        ResolvedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryProducts {
        Table,
        Id,
    }
}

mod m20260115_000004_add_location_unique_index {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260115_000004_add_location_unique_index"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        // Unique among non-null values: SQL unique indexes treat NULLs as
        // distinct, so unplaced products never collide. This closes the
        // check-then-act window between two concurrent slot assignments.
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_products_location_unique")
                        .table(InventoryProducts::Table)
                        .col(InventoryProducts::Location)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_index(
                    Index::drop()
                        .name("idx_inventory_products_location_unique")
                        .table(InventoryProducts::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryProducts {
        Table,
        Location,
    }
}
