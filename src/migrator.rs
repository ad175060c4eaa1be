use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241201_000001_create_almacenes_table::Migration),
            Box::new(m20241201_000002_create_formas_pago_table::Migration),
            Box::new(m20241201_000003_create_productos_sage_table::Migration),
            Box::new(m20241201_000004_create_vendedores_table::Migration),
            Box::new(m20241201_000005_create_recetas_table::Migration),
            Box::new(m20241201_000006_create_stocks_table::Migration),
            Box::new(m20241201_000007_create_historial_proveedor_table::Migration),
        ]
    }
}

mod m20241201_000001_create_almacenes_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000001_create_almacenes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Almacenes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Almacenes::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Almacenes::Codigo).string().not_null())
                        .col(ColumnDef::new(Almacenes::Nombre).string().not_null())
                        .col(ColumnDef::new(Almacenes::Direccion).string().null())
                        .col(ColumnDef::new(Almacenes::Telefono).string().null())
                        .col(
                            ColumnDef::new(Almacenes::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Almacenes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Almacenes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_almacenes_codigo")
                        .table(Almacenes::Table)
                        .col(Almacenes::Codigo)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Almacenes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Almacenes {
        Table,
        Id,
        Codigo,
        Nombre,
        Direccion,
        Telefono,
        Activo,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20241201_000002_create_formas_pago_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000002_create_formas_pago_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FormasPago::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(FormasPago::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(FormasPago::Codigo).string().not_null())
                        .col(ColumnDef::new(FormasPago::Nombre).string().not_null())
                        .col(
                            ColumnDef::new(FormasPago::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(FormasPago::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FormasPago::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_formas_pago_codigo")
                        .table(FormasPago::Table)
                        .col(FormasPago::Codigo)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FormasPago::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FormasPago {
        Table,
        Id,
        Codigo,
        Nombre,
        Activo,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20241201_000003_create_productos_sage_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000003_create_productos_sage_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductosSage::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductosSage::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductosSage::Codigo).string().not_null())
                        .col(ColumnDef::new(ProductosSage::CodigoSage).string().null())
                        .col(ColumnDef::new(ProductosSage::Nombre).string().not_null())
                        .col(ColumnDef::new(ProductosSage::Descripcion).text().null())
                        .col(
                            ColumnDef::new(ProductosSage::Precio)
                                .decimal_len(12, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductosSage::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ProductosSage::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductosSage::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_productos_sage_codigo")
                        .table(ProductosSage::Table)
                        .col(ProductosSage::Codigo)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_productos_sage_codigo_sage")
                        .table(ProductosSage::Table)
                        .col(ProductosSage::CodigoSage)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductosSage::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductosSage {
        Table,
        Id,
        Codigo,
        CodigoSage,
        Nombre,
        Descripcion,
        Precio,
        Activo,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20241201_000004_create_vendedores_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000004_create_vendedores_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vendedores::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Vendedores::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Vendedores::Codigo).string().not_null())
                        .col(ColumnDef::new(Vendedores::Nombre).string().not_null())
                        .col(ColumnDef::new(Vendedores::Email).string().null())
                        .col(ColumnDef::new(Vendedores::Telefono).string().null())
                        .col(
                            ColumnDef::new(Vendedores::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Vendedores::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Vendedores::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vendedores_codigo")
                        .table(Vendedores::Table)
                        .col(Vendedores::Codigo)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vendedores::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Vendedores {
        Table,
        Id,
        Codigo,
        Nombre,
        Email,
        Telefono,
        Activo,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20241201_000005_create_recetas_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000005_create_recetas_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Recetas::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Recetas::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Recetas::Nombre).string().not_null())
                        .col(ColumnDef::new(Recetas::ProductoFinal).uuid().not_null())
                        .col(ColumnDef::new(Recetas::Ingredientes).json().not_null())
                        .col(
                            ColumnDef::new(Recetas::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Recetas::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_recetas_nombre")
                        .table(Recetas::Table)
                        .col(Recetas::Nombre)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_recetas_producto_final")
                        .table(Recetas::Table)
                        .col(Recetas::ProductoFinal)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Recetas::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Recetas {
        Table,
        Id,
        Nombre,
        ProductoFinal,
        Ingredientes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20241201_000006_create_stocks_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000006_create_stocks_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stocks::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Stocks::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Stocks::Producto).uuid().not_null())
                        .col(ColumnDef::new(Stocks::TiendaId).string().not_null())
                        .col(
                            ColumnDef::new(Stocks::Cantidad)
                                .decimal_len(14, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Stocks::Unidad)
                                .string()
                                .not_null()
                                .default("ud"),
                        )
                        .col(
                            ColumnDef::new(Stocks::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Stocks::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One row per product and store
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stocks_producto_tienda")
                        .table(Stocks::Table)
                        .col(Stocks::Producto)
                        .col(Stocks::TiendaId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stocks_tienda_id")
                        .table(Stocks::Table)
                        .col(Stocks::TiendaId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stocks::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Stocks {
        Table,
        Id,
        Producto,
        TiendaId,
        Cantidad,
        Unidad,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20241201_000007_create_historial_proveedor_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241201_000007_create_historial_proveedor_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(HistorialProveedorIndividual::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::TiendaId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::TiendaNombre)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::FechaPedido)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::Lineas)
                                .json()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::Proveedor)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialProveedorIndividual::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Serves the per-store, newest-first listing
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_historial_tienda_fecha")
                        .table(HistorialProveedorIndividual::Table)
                        .col(HistorialProveedorIndividual::TiendaId)
                        .col((HistorialProveedorIndividual::FechaPedido, IndexOrder::Desc))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(HistorialProveedorIndividual::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    enum HistorialProveedorIndividual {
        Table,
        Id,
        TiendaId,
        TiendaNombre,
        FechaPedido,
        Lineas,
        Proveedor,
        CreatedAt,
        UpdatedAt,
    }
}
