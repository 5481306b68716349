use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProducto, Producto};

/// Sea-ORM Entity for the `productos` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub precio: Decimal,
    pub fecha_creacion: DateTime,
    pub fecha_actualizacion: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Producto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nombre: model.nombre,
            descripcion: model.descripcion,
            precio: model.precio,
            fecha_creacion: model.fecha_creacion,
            fecha_actualizacion: model.fecha_actualizacion,
        }
    }
}

// Id is left to the BIGSERIAL sequence
impl From<NewProducto> for ActiveModel {
    fn from(nuevo: NewProducto) -> Self {
        ActiveModel {
            id: NotSet,
            nombre: Set(nuevo.nombre),
            descripcion: Set(nuevo.descripcion),
            precio: Set(nuevo.precio),
            fecha_creacion: Set(nuevo.fecha_creacion),
            fecha_actualizacion: Set(nuevo.fecha_actualizacion),
        }
    }
}

impl From<Producto> for ActiveModel {
    fn from(producto: Producto) -> Self {
        ActiveModel {
            id: Set(producto.id),
            nombre: Set(producto.nombre),
            descripcion: Set(producto.descripcion),
            precio: Set(producto.precio),
            fecha_creacion: Set(producto.fecha_creacion),
            fecha_actualizacion: Set(producto.fecha_actualizacion),
        }
    }
}
