use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_buildings_table::Migration),
            Box::new(m20260101_000002_create_activities_table::Migration),
            Box::new(m20260101_000003_create_organizations_table::Migration),
            Box::new(m20260101_000004_create_organization_activities_table::Migration),
            Box::new(m20260101_000005_create_phone_numbers_table::Migration),
        ]
    }
}

// Migration implementations

mod m20260101_000001_create_buildings_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000001_create_buildings_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Buildings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Buildings::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Buildings::Address).text().not_null())
                        .col(ColumnDef::new(Buildings::Latitude).double().not_null())
                        .col(ColumnDef::new(Buildings::Longitude).double().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_buildings_address")
                        .table(Buildings::Table)
                        .col(Buildings::Address)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Buildings::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Buildings {
        Table,
        Id,
        Address,
        Latitude,
        Longitude,
    }
}

mod m20260101_000002_create_activities_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000002_create_activities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Activities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Activities::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Activities::Name).string().not_null())
                        .col(ColumnDef::new(Activities::ParentId).integer().null())
                        .col(
                            ColumnDef::new(Activities::Level)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_activities_parent_id")
                                .from(Activities::Table, Activities::ParentId)
                                .to(Activities::Table, Activities::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_activities_parent_id")
                        .table(Activities::Table)
                        .col(Activities::ParentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Activities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Activities {
        Table,
        Id,
        Name,
        ParentId,
        Level,
    }
}

mod m20260101_000003_create_organizations_table {

    use super::m20260101_000001_create_buildings_table::Buildings;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000003_create_organizations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Organizations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Organizations::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Organizations::Name).string().not_null())
                        .col(
                            ColumnDef::new(Organizations::BuildingId)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_organizations_building_id")
                                .from(Organizations::Table, Organizations::BuildingId)
                                .to(Buildings::Table, Buildings::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_organizations_building_id")
                        .table(Organizations::Table)
                        .col(Organizations::BuildingId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_organizations_name")
                        .table(Organizations::Table)
                        .col(Organizations::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Organizations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Organizations {
        Table,
        Id,
        Name,
        BuildingId,
    }
}

mod m20260101_000004_create_organization_activities_table {

    use super::m20260101_000002_create_activities_table::Activities;
    use super::m20260101_000003_create_organizations_table::Organizations;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000004_create_organization_activities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrganizationActivities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrganizationActivities::OrganizationId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrganizationActivities::ActivityId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(OrganizationActivities::OrganizationId)
                                .col(OrganizationActivities::ActivityId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_organization_activities_organization_id")
                                .from(
                                    OrganizationActivities::Table,
                                    OrganizationActivities::OrganizationId,
                                )
                                .to(Organizations::Table, Organizations::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_organization_activities_activity_id")
                                .from(
                                    OrganizationActivities::Table,
                                    OrganizationActivities::ActivityId,
                                )
                                .to(Activities::Table, Activities::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_organization_activities_activity_id")
                        .table(OrganizationActivities::Table)
                        .col(OrganizationActivities::ActivityId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrganizationActivities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum OrganizationActivities {
        Table,
        OrganizationId,
        ActivityId,
    }
}

mod m20260101_000005_create_phone_numbers_table {

    use super::m20260101_000003_create_organizations_table::Organizations;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000005_create_phone_numbers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PhoneNumbers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PhoneNumbers::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PhoneNumbers::Number).string().not_null())
                        .col(
                            ColumnDef::new(PhoneNumbers::OrganizationId)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_phone_numbers_organization_id")
                                .from(PhoneNumbers::Table, PhoneNumbers::OrganizationId)
                                .to(Organizations::Table, Organizations::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_phone_numbers_organization_id")
                        .table(PhoneNumbers::Table)
                        .col(PhoneNumbers::OrganizationId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PhoneNumbers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PhoneNumbers {
        Table,
        Id,
        Number,
        OrganizationId,
    }
}
