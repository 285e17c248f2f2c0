use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240110_000001_create_catalog_tables::Migration),
            Box::new(m20240110_000002_create_front_of_house_tables::Migration),
            Box::new(m20240110_000003_create_invoices_table::Migration),
            Box::new(m20240110_000004_create_orders_table::Migration),
            Box::new(m20240110_000005_create_order_items_table::Migration),
            Box::new(m20240110_000006_create_token_sequences_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240110_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240110_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Taxes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Taxes::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Taxes::Title).string().not_null())
                        .col(ColumnDef::new(Taxes::Rate).decimal().not_null())
                        .col(
                            ColumnDef::new(Taxes::Mode)
                                .string()
                                .not_null()
                                .default("percent"),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuItems::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MenuItems::Title).string().not_null())
                        .col(ColumnDef::new(MenuItems::Description).string().null())
                        .col(ColumnDef::new(MenuItems::Price).decimal().not_null())
                        .col(ColumnDef::new(MenuItems::TaxId).big_integer().null())
                        .col(
                            ColumnDef::new(MenuItems::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(MenuItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_items_tax_id")
                                .from(MenuItems::Table, MenuItems::TaxId)
                                .to(Taxes::Table, Taxes::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuItemVariants::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuItemVariants::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuItemVariants::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MenuItemVariants::Title).string().not_null())
                        .col(
                            ColumnDef::new(MenuItemVariants::Price)
                                .decimal()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_item_variants_item_id")
                                .from(MenuItemVariants::Table, MenuItemVariants::ItemId)
                                .to(MenuItems::Table, MenuItems::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MenuItemAddons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MenuItemAddons::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MenuItemAddons::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MenuItemAddons::Title).string().not_null())
                        .col(ColumnDef::new(MenuItemAddons::Price).decimal().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_menu_item_addons_item_id")
                                .from(MenuItemAddons::Table, MenuItemAddons::ItemId)
                                .to(MenuItems::Table, MenuItems::Id)
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
                        .name("idx_menu_item_variants_item_id")
                        .table(MenuItemVariants::Table)
                        .col(MenuItemVariants::ItemId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_menu_item_addons_item_id")
                        .table(MenuItemAddons::Table)
                        .col(MenuItemAddons::ItemId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MenuItemAddons::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuItemVariants::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Taxes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Taxes {
        Table,
        Id,
        Title,
        Rate,
        Mode,
    }

    #[derive(DeriveIden)]
    pub(super) enum MenuItems {
        Table,
        Id,
        Title,
        Description,
        Price,
        TaxId,
        IsActive,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum MenuItemVariants {
        Table,
        Id,
        ItemId,
        Title,
        Price,
    }

    #[derive(DeriveIden)]
    enum MenuItemAddons {
        Table,
        Id,
        ItemId,
        Title,
        Price,
    }
}

mod m20240110_000002_create_front_of_house_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240110_000002_create_front_of_house_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Phone)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StoreTables::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreTables::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StoreTables::Title).string().not_null())
                        .col(ColumnDef::new(StoreTables::Floor).string().null())
                        .col(
                            ColumnDef::new(StoreTables::SeatingCapacity)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(StoreTables::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Reservations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Reservations::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::CustomerId)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::TableId).big_integer().null())
                        .col(
                            ColumnDef::new(Reservations::ReservedFor)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::PeopleCount)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::Status).string().not_null())
                        .col(ColumnDef::new(Reservations::Notes).string().null())
                        .col(
                            ColumnDef::new(Reservations::UniqueCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_customer_id")
                                .from(Reservations::Table, Reservations::CustomerId)
                                .to(Customers::Table, Customers::Phone)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_table_id")
                                .from(Reservations::Table, Reservations::TableId)
                                .to(StoreTables::Table, StoreTables::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StoreProfile::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreProfile::Id)
                                .integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StoreProfile::StoreName).string().not_null())
                        .col(ColumnDef::new(StoreProfile::Address).string().null())
                        .col(ColumnDef::new(StoreProfile::Phone).string().null())
                        .col(ColumnDef::new(StoreProfile::Email).string().null())
                        .col(
                            ColumnDef::new(StoreProfile::Currency)
                                .string()
                                .not_null()
                                .default("USD"),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservations_reserved_for")
                        .table(Reservations::Table)
                        .col(Reservations::ReservedFor)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StoreProfile::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Reservations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StoreTables::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Phone,
        Name,
        Email,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum StoreTables {
        Table,
        Id,
        Title,
        Floor,
        SeatingCapacity,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Reservations {
        Table,
        Id,
        CustomerId,
        TableId,
        ReservedFor,
        PeopleCount,
        Status,
        Notes,
        UniqueCode,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum StoreProfile {
        Table,
        Id,
        StoreName,
        Address,
        Phone,
        Email,
        Currency,
    }
}

mod m20240110_000003_create_invoices_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240110_000003_create_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Invoices::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::SubTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::TaxTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::Total)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Invoices {
        Table,
        Id,
        SubTotal,
        TaxTotal,
        Total,
        CreatedAt,
    }
}

mod m20240110_000004_create_orders_table {

    use super::m20240110_000002_create_front_of_house_tables::{Customers, StoreTables};
    use super::m20240110_000003_create_invoices_table::Invoices;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240110_000004_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::DeliveryType).string().not_null())
                        .col(ColumnDef::new(Orders::CustomerType).string().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).string().null())
                        .col(ColumnDef::new(Orders::TableId).big_integer().null())
                        .col(ColumnDef::new(Orders::TokenNo).integer().not_null())
                        .col(
                            ColumnDef::new(Orders::PaymentStatus)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(Orders::InvoiceId).big_integer().null())
                        .col(
                            ColumnDef::new(Orders::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(Orders::PlacedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer_id")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Phone)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_table_id")
                                .from(Orders::Table, Orders::TableId)
                                .to(StoreTables::Table, StoreTables::Id)
                                .on_delete(ForeignKeyAction::SetNull)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_invoice_id")
                                .from(Orders::Table, Orders::InvoiceId)
                                .to(Invoices::Table, Invoices::Id)
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
                        .name("idx_orders_status")
                        .table(Orders::Table)
                        .col(Orders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_placed_at")
                        .table(Orders::Table)
                        .col(Orders::PlacedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Orders {
        Table,
        Id,
        DeliveryType,
        CustomerType,
        CustomerId,
        TableId,
        TokenNo,
        PaymentStatus,
        InvoiceId,
        Status,
        PlacedAt,
    }
}

mod m20240110_000005_create_order_items_table {

    use super::m20240110_000001_create_catalog_tables::MenuItems;
    use super::m20240110_000004_create_orders_table::Orders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240110_000005_create_order_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderItems::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
                        .col(ColumnDef::new(OrderItems::ItemId).big_integer().not_null())
                        .col(ColumnDef::new(OrderItems::VariantId).big_integer().null())
                        .col(ColumnDef::new(OrderItems::Price).decimal().not_null())
                        .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(OrderItems::Notes).string().null())
                        .col(ColumnDef::new(OrderItems::Addons).text().null())
                        .col(
                            ColumnDef::new(OrderItems::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(OrderItems::PlacedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order_id")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_item_id")
                                .from(OrderItems::Table, OrderItems::ItemId)
                                .to(MenuItems::Table, MenuItems::Id)
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
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrderItems {
        Table,
        Id,
        OrderId,
        ItemId,
        VariantId,
        Price,
        Quantity,
        Notes,
        Addons,
        Status,
        PlacedAt,
    }
}

mod m20240110_000006_create_token_sequences_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240110_000006_create_token_sequences_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Singleton counter row; admission inserts it lazily on first use.
            manager
                .create_table(
                    Table::create()
                        .table(TokenSequences::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TokenSequences::Id)
                                .integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TokenSequences::SequenceNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TokenSequences::LastUpdated)
                                .date()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TokenSequences::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum TokenSequences {
        Table,
        Id,
        SequenceNo,
        LastUpdated,
    }
}
