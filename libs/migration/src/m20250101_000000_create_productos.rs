use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Productos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Productos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Productos::Nombre, 100))
                    .col(string_len(Productos::Descripcion, 500))
                    .col(decimal_len(Productos::Precio, 12, 2))
                    .col(date_time(Productos::FechaCreacion))
                    .col(date_time(Productos::FechaActualizacion))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_nombre")
                    .table(Productos::Table)
                    .col(Productos::Nombre)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_precio")
                    .table(Productos::Table)
                    .col(Productos::Precio)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Productos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Productos {
    Table,
    Id,
    Nombre,
    Descripcion,
    Precio,
    FechaCreacion,
    FechaActualizacion,
}
