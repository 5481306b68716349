use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductoError, ProductoResult};
use crate::models::{NewProducto, Producto};

/// Repository trait for Producto persistence
///
/// Listing operations return rows ordered by id unless stated otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    /// Persist a new producto; storage assigns the id
    async fn insert(&self, nuevo: NewProducto) -> ProductoResult<Producto>;

    async fn find_by_id(&self, id: i64) -> ProductoResult<Option<Producto>>;

    async fn find_all(&self) -> ProductoResult<Vec<Producto>>;

    /// Case-insensitive substring match on `nombre`. `%` and `_` match literally.
    async fn find_by_name_contains(&self, nombre: &str) -> ProductoResult<Vec<Producto>>;

    async fn exists_by_id(&self, id: i64) -> ProductoResult<bool>;

    /// Overwrite an existing producto, keyed by its id
    async fn save(&self, producto: Producto) -> ProductoResult<Producto>;

    async fn delete_by_id(&self, id: i64) -> ProductoResult<()>;

    /// Productos with `min <= precio <= max`, cheapest first
    async fn find_by_precio_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductoResult<Vec<Producto>>;
}

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<i64, Producto>,
    last_id: i64,
}

/// In-memory implementation of ProductoRepository (for development/testing)
///
/// Ids come from a counter that is never decremented, so deleted ids are not
/// reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductoRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductoRepository for InMemoryProductoRepository {
    async fn insert(&self, nuevo: NewProducto) -> ProductoResult<Producto> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let producto = Producto {
            id: store.last_id,
            nombre: nuevo.nombre,
            descripcion: nuevo.descripcion,
            precio: nuevo.precio,
            fecha_creacion: nuevo.fecha_creacion,
            fecha_actualizacion: nuevo.fecha_actualizacion,
        };
        store.rows.insert(producto.id, producto.clone());

        tracing::debug!(producto_id = producto.id, "Inserted producto in memory");
        Ok(producto)
    }

    async fn find_by_id(&self, id: i64) -> ProductoResult<Option<Producto>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> ProductoResult<Vec<Producto>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_name_contains(&self, nombre: &str) -> ProductoResult<Vec<Producto>> {
        let needle = nombre.to_lowercase();
        let store = self.store.read().await;

        Ok(store
            .rows
            .values()
            .filter(|p| p.nombre.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> ProductoResult<bool> {
        let store = self.store.read().await;
        Ok(store.rows.contains_key(&id))
    }

    async fn save(&self, producto: Producto) -> ProductoResult<Producto> {
        let mut store = self.store.write().await;

        match store.rows.get_mut(&producto.id) {
            Some(existing) => {
                *existing = producto.clone();
                Ok(producto)
            }
            None => Err(ProductoError::not_found(producto.id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> ProductoResult<()> {
        let mut store = self.store.write().await;
        store.rows.remove(&id);
        Ok(())
    }

    async fn find_by_precio_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> ProductoResult<Vec<Producto>> {
        let store = self.store.read().await;

        let mut result: Vec<Producto> = store
            .rows
            .values()
            .filter(|p| p.precio >= min && p.precio <= max)
            .cloned()
            .collect();
        // stable sort keeps id order among equal prices
        result.sort_by(|a, b| a.precio.cmp(&b.precio));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn nuevo(nombre: &str, precio: &str) -> NewProducto {
        let at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        NewProducto {
            nombre: nombre.to_string(),
            descripcion: format!("Descripción de {}", nombre),
            precio: Decimal::from_str(precio).unwrap(),
            fecha_creacion: at,
            fecha_actualizacion: at,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryProductoRepository::new();
        let a = repo.insert(nuevo("Mouse", "10")).await.unwrap();
        let b = repo.insert(nuevo("Teclado", "20")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductoRepository::new();
        let a = repo.insert(nuevo("Mouse", "10")).await.unwrap();
        repo.delete_by_id(a.id).await.unwrap();

        let b = repo.insert(nuevo("Mouse", "10")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(!repo.exists_by_id(a.id).await.unwrap());
        assert!(repo.exists_by_id(b.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_name_contains_ignores_case() {
        let repo = InMemoryProductoRepository::new();
        repo.insert(nuevo("Mouse Inalámbrico", "10")).await.unwrap();
        repo.insert(nuevo("Teclado", "20")).await.unwrap();
        repo.insert(nuevo("MOUSEPAD", "5")).await.unwrap();

        let found = repo.find_by_name_contains("mouse").await.unwrap();
        let nombres: Vec<_> = found.iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Mouse Inalámbrico", "MOUSEPAD"]);

        assert_eq!(repo.find_by_name_contains("").await.unwrap().len(), 3);
        assert!(repo.find_by_name_contains("monitor").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_row() {
        let repo = InMemoryProductoRepository::new();
        let mut producto = repo.insert(nuevo("Mouse", "10")).await.unwrap();
        producto.nombre = "Mouse Pro".to_string();

        repo.save(producto.clone()).await.unwrap();
        assert_eq!(repo.find_by_id(producto.id).await.unwrap(), Some(producto));
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let repo = InMemoryProductoRepository::new();
        let mut producto = repo.insert(nuevo("Mouse", "10")).await.unwrap();
        producto.id = 42;

        let err = repo.save(producto).await.unwrap_err();
        assert!(matches!(err, ProductoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_by_precio_between_is_inclusive_and_sorted() {
        let repo = InMemoryProductoRepository::new();
        repo.insert(nuevo("Monitor", "300.00")).await.unwrap();
        repo.insert(nuevo("Mouse", "25.99")).await.unwrap();
        repo.insert(nuevo("Teclado", "50.00")).await.unwrap();
        repo.insert(nuevo("Cable", "5.00")).await.unwrap();

        let found = repo
            .find_by_precio_between(Decimal::from(25), Decimal::from(300))
            .await
            .unwrap();
        let nombres: Vec<_> = found.iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Mouse", "Teclado", "Monitor"]);
    }
}
