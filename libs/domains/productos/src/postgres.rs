use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductoError, ProductoResult},
    models::{NewProducto, Producto},
    repository::ProductoRepository,
};

const LIKE_ESCAPE: char = '\\';

/// PostgreSQL implementation of ProductoRepository using SeaORM
#[derive(Clone)]
pub struct PgProductoRepository {
    db: DatabaseConnection,
}

impl PgProductoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `%<lowercased needle>%` with LIKE metacharacters escaped
fn contains_pattern(nombre: &str) -> String {
    let mut pattern = String::with_capacity(nombre.len() + 2);
    pattern.push('%');
    for c in nombre.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductoRepository for PgProductoRepository {
    async fn insert(&self, nuevo: NewProducto) -> ProductoResult<Producto> {
        let model = entity::ActiveModel::from(nuevo).insert(&self.db).await?;

        tracing::info!(producto_id = model.id, "Inserted producto");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ProductoResult<Option<Producto>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> ProductoResult<Vec<Producto>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_name_contains(&self, nombre: &str) -> ProductoResult<Vec<Producto>> {
        let lower_nombre = Expr::expr(Func::lower(Expr::col((
            entity::Entity,
            entity::Column::Nombre,
        ))));

        let models = entity::Entity::find()
            .filter(lower_nombre.like(LikeExpr::new(contains_pattern(nombre)).escape(LIKE_ESCAPE)))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!(nombre, matches = models.len(), "Searched productos by name");
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists_by_id(&self, id: i64) -> ProductoResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn save(&self, producto: Producto) -> ProductoResult<Producto> {
        let id = producto.id;
        let model = match entity::ActiveModel::from(producto).update(&self.db).await {
            Ok(model) => model,
            // row deleted since it was loaded
            Err(DbErr::RecordNotUpdated) => return Err(ProductoError::not_found(id)),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(producto_id = model.id, "Updated producto");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> ProductoResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        tracing::info!(producto_id = id, rows = result.rows_affected, "Deleted producto");
        Ok(())
    }

    async fn find_by_precio_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductoResult<Vec<Producto>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Precio.between(min, max))
            .order_by_asc(entity::Column::Precio)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::str::FromStr;

    fn model(id: i64, nombre: &str, precio: &str) -> entity::Model {
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        entity::Model {
            id,
            nombre: nombre.to_string(),
            descripcion: format!("Descripción de {}", nombre),
            precio: Decimal::from_str(precio).unwrap(),
            fecha_creacion: at,
            fecha_actualizacion: at,
        }
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Mouse"), "%mouse%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[tokio::test]
    async fn test_insert_returns_storage_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(15, "Mouse", "25.99")]])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        let stored = model(0, "Mouse", "25.99");
        let producto = repo
            .insert(NewProducto {
                nombre: stored.nombre,
                descripcion: stored.descripcion,
                precio: stored.precio,
                fecha_creacion: stored.fecha_creacion,
                fecha_actualizacion: stored.fecha_actualizacion,
            })
            .await
            .unwrap();

        assert_eq!(producto.id, 15);
        assert_eq!(producto.nombre, "Mouse");
    }

    #[tokio::test]
    async fn test_find_by_id_maps_missing_row_to_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Mouse", "10.00")]])
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().id, 1);
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "Mouse", "10.00")]])
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        assert!(repo.exists_by_id(3).await.unwrap());
        assert!(!repo.exists_by_id(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_name_contains_uses_lower_and_escape() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Mouse Pro", "10.00")]])
            .into_connection();
        let repo = PgProductoRepository::new(db.clone());

        let found = repo.find_by_name_contains("MOUSE").await.unwrap();
        assert_eq!(found.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("LOWER"), "unexpected SQL: {log}");
        assert!(log.contains("ESCAPE"), "unexpected SQL: {log}");
    }

    #[tokio::test]
    async fn test_save_returns_updated_row() {
        let updated = model(5, "Teclado mecánico", "80.00");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![updated.clone()]])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        let saved = repo.save(updated.clone().into()).await.unwrap();
        assert_eq!(saved, Producto::from(updated));
    }

    #[tokio::test]
    async fn test_save_of_vanished_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        let err = repo
            .save(model(5, "Teclado", "80.00").into())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ProductoError::NotFound { ref value, .. } if value == "5"),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        repo.delete_by_id(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_by_precio_between_keeps_storage_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(2, "Mouse", "25.99"), model(1, "Monitor", "300.00")]])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        let found = repo
            .find_by_precio_between(Decimal::from(10), Decimal::from(500))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_database_errors_become_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgProductoRepository::new(db);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, ProductoError::Internal(msg) if msg.contains("connection reset")));
    }
}
