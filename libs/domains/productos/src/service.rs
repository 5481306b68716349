//! Producto Service - Business logic layer

use chrono::{Local, NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductoError, ProductoResult};
use crate::models::{NewProducto, Producto, ProductoRequest};
use crate::repository::ProductoRepository;

/// Local wall-clock time at second precision
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Producto service providing business logic operations
///
/// Validates payloads, stamps timestamps and turns missing rows into
/// `ProductoError::NotFound`; everything else is delegated to the repository.
pub struct ProductoService<R: ProductoRepository> {
    repository: Arc<R>,
}

impl<R: ProductoRepository> ProductoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ProductoResult<Vec<Producto>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ProductoResult<Producto> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductoError::not_found(id))
    }

    #[instrument(skip(self, request), fields(nombre = %request.nombre))]
    pub async fn create(&self, request: ProductoRequest) -> ProductoResult<Producto> {
        request.validate()?;
        let precio = Self::precio(&request)?;

        let timestamp = now();
        let producto = self
            .repository
            .insert(NewProducto {
                nombre: request.nombre,
                descripcion: request.descripcion,
                precio,
                fecha_creacion: timestamp,
                fecha_actualizacion: timestamp,
            })
            .await?;

        tracing::info!(producto_id = producto.id, "Created producto");
        Ok(producto)
    }

    /// Overwrites nombre, descripcion and precio. `fecha_actualizacion` never
    /// moves before `fecha_creacion`, even if the clock went backwards.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: ProductoRequest) -> ProductoResult<Producto> {
        request.validate()?;
        let precio = Self::precio(&request)?;

        let existing = self.get_by_id(id).await?;
        let fecha_actualizacion = now().max(existing.fecha_creacion);

        let producto = self
            .repository
            .save(Producto {
                nombre: request.nombre,
                descripcion: request.descripcion,
                precio,
                fecha_actualizacion,
                ..existing
            })
            .await?;

        tracing::info!(producto_id = producto.id, "Updated producto");
        Ok(producto)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductoResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(ProductoError::not_found(id));
        }

        self.repository.delete_by_id(id).await?;
        tracing::info!(producto_id = id, "Deleted producto");
        Ok(())
    }

    /// Case-insensitive substring search; an empty string matches everything
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, nombre: &str) -> ProductoResult<Vec<Producto>> {
        self.repository.find_by_name_contains(nombre).await
    }

    /// Inclusive price range, cheapest first
    #[instrument(skip(self))]
    pub async fn search_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductoResult<Vec<Producto>> {
        if min > max {
            return Err(ProductoError::BadArgument(
                "El parámetro 'min' no puede ser mayor que 'max'".to_string(),
            ));
        }

        self.repository.find_by_precio_between(min, max).await
    }

    /// Precio at the stored scale of 2 fraction digits. `validate()` has
    /// already rejected a missing value.
    fn precio(request: &ProductoRequest) -> ProductoResult<Decimal> {
        let mut precio = request.precio.ok_or_else(|| {
            ProductoError::Validation(vec![crate::models::PRECIO_OBLIGATORIO.to_string()])
        })?;
        precio.rescale(2);
        Ok(precio)
    }
}

impl<R: ProductoRepository> Clone for ProductoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NOMBRE_OBLIGATORIO, PRECIO_POSITIVO};
    use crate::repository::MockProductoRepository;
    use chrono::{Duration, NaiveDate};
    use mockall::predicate::eq;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn request(nombre: &str, descripcion: &str, precio: &str) -> ProductoRequest {
        ProductoRequest {
            nombre: nombre.to_string(),
            descripcion: descripcion.to_string(),
            precio: Some(dec(precio)),
        }
    }

    fn stored(id: i64, created: NaiveDateTime) -> Producto {
        Producto {
            id,
            nombre: "Mouse".to_string(),
            descripcion: "Mouse inalámbrico USB".to_string(),
            precio: dec("25.99"),
            fecha_creacion: created,
            fecha_actualizacion: created,
        }
    }

    fn echo_insert(nuevo: NewProducto) -> ProductoResult<Producto> {
        Ok(Producto {
            id: 1,
            nombre: nuevo.nombre,
            descripcion: nuevo.descripcion,
            precio: nuevo.precio,
            fecha_creacion: nuevo.fecha_creacion,
            fecha_actualizacion: nuevo.fecha_actualizacion,
        })
    }

    #[tokio::test]
    async fn test_create_stamps_equal_timestamps() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_insert().times(1).returning(echo_insert);

        let service = ProductoService::new(mock_repo);
        let before = now();
        let producto = service
            .create(request("Mouse", "Mouse inalámbrico USB", "25.99"))
            .await
            .unwrap();

        assert_eq!(producto.id, 1);
        assert_eq!(producto.precio, dec("25.99"));
        assert_eq!(producto.fecha_creacion, producto.fecha_actualizacion);
        assert!(producto.fecha_creacion >= before);
        assert_eq!(producto.fecha_creacion.and_utc().timestamp_subsec_nanos(), 0);
    }

    #[tokio::test]
    async fn test_create_invalid_payload_never_reaches_storage() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductoService::new(mock_repo);
        let err = service
            .create(request("", "Mouse inalámbrico USB", "-1"))
            .await
            .unwrap_err();

        match err {
            ProductoError::Validation(errores) => {
                assert_eq!(errores, vec![NOMBRE_OBLIGATORIO, PRECIO_POSITIVO]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = ProductoService::new(mock_repo);
        let err = service.get_by_id(999).await.unwrap_err();

        assert!(matches!(
            err,
            ProductoError::NotFound { resource: "Producto", field: "id", ref value } if value == "999"
        ));
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_creation_time() {
        let created = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();

        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(move |id| Ok(Some(stored(id, created))));
        mock_repo.expect_save().times(1).returning(Ok);

        let service = ProductoService::new(mock_repo);
        let updated = service
            .update(7, request("Mouse Pro", "Mouse inalámbrico USB-C", "30.00"))
            .await
            .unwrap();

        assert_eq!(updated.id, 7);
        assert_eq!(updated.nombre, "Mouse Pro");
        assert_eq!(updated.descripcion, "Mouse inalámbrico USB-C");
        assert_eq!(updated.precio, dec("30.00"));
        assert_eq!(updated.fecha_creacion, created);
        assert!(updated.fecha_actualizacion > created);
    }

    #[tokio::test]
    async fn test_create_stores_precio_with_two_fraction_digits() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_insert()
            .withf(|nuevo| nuevo.precio.scale() == 2)
            .times(1)
            .returning(echo_insert);

        let service = ProductoService::new(mock_repo);
        let producto = service
            .create(request("Mouse", "Mouse inalámbrico USB", "10.5"))
            .await
            .unwrap();

        assert_eq!(producto.precio.to_string(), "10.50");
    }

    #[tokio::test]
    async fn test_update_never_moves_before_creation() {
        let created_in_future = now() + Duration::days(1);

        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(stored(id, created_in_future))));
        mock_repo.expect_save().returning(Ok);

        let service = ProductoService::new(mock_repo);
        let updated = service
            .update(1, request("Mouse", "Mouse inalámbrico USB", "10"))
            .await
            .unwrap();

        assert_eq!(updated.fecha_actualizacion, created_in_future);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_without_save() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProductoService::new(mock_repo);
        let err = service
            .update(3, request("Mouse", "Mouse inalámbrico USB", "10"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_find_by_id().never();

        let service = ProductoService::new(mock_repo);
        let err = service
            .update(3, request("M", "corta", "10"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductoError::Validation(errores) if errores.len() == 2));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_exists_by_id()
            .with(eq(4))
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete_by_id()
            .with(eq(4))
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductoService::new(mock_repo);
        service.delete(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(false));
        mock_repo.expect_delete_by_id().never();

        let service = ProductoService::new(mock_repo);
        let err = service.delete(4).await.unwrap_err();

        assert!(matches!(err, ProductoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_by_name_passes_needle_through() {
        let created = now();
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_name_contains()
            .withf(|nombre| nombre == "mou")
            .returning(move |_| Ok(vec![stored(1, created)]));

        let service = ProductoService::new(mock_repo);
        let found = service.search_by_name("mou").await.unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_price_range_rejects_inverted_bounds() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo.expect_find_by_precio_between().never();

        let service = ProductoService::new(mock_repo);
        let err = service
            .search_by_price_range(dec("100"), dec("10"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductoError::BadArgument(_)));
    }

    #[tokio::test]
    async fn test_price_range_delegates_with_bounds() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_by_precio_between()
            .with(eq(dec("10")), eq(dec("10")))
            .returning(|_, _| Ok(vec![]));

        let service = ProductoService::new(mock_repo);
        let found = service
            .search_by_price_range(dec("10"), dec("10"))
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock_repo = MockProductoRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(ProductoError::Internal("pool exhausted".into())));

        let service = ProductoService::new(mock_repo);
        let err = service.list_all().await.unwrap_err();

        assert!(matches!(err, ProductoError::Internal(_)));
    }
}
