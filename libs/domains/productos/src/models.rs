use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const NOMBRE_OBLIGATORIO: &str = "El nombre del producto es obligatorio";
pub const NOMBRE_LONGITUD: &str = "El nombre debe tener entre 2 y 100 caracteres";
pub const DESCRIPCION_OBLIGATORIA: &str = "La descripción del producto es obligatoria";
pub const DESCRIPCION_LONGITUD: &str = "La descripción debe tener entre 10 y 500 caracteres";
pub const PRECIO_OBLIGATORIO: &str = "El precio del producto es obligatorio";
pub const PRECIO_POSITIVO: &str = "El precio debe ser mayor a 0";
pub const PRECIO_DIGITOS: &str = "El precio debe tener máximo 10 dígitos enteros y 2 decimales";

const PRECIO_MAX_FRACTION_DIGITS: u32 = 2;
/// 10^10: prices must stay below this to keep at most 10 integer digits
const PRECIO_LIMITE_ENTERO: i64 = 10_000_000_000;

/// A stored producto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub precio: Decimal,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_actualizacion: NaiveDateTime,
}

/// A validated producto that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProducto {
    pub nombre: String,
    pub descripcion: String,
    pub precio: Decimal,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_actualizacion: NaiveDateTime,
}

/// Payload accepted by create and update.
///
/// Absent or `null` text fields deserialize to `""` so they are reported as
/// blank instead of failing JSON parsing.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct ProductoRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", code = "not_blank", message = "El nombre del producto es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    #[schema(example = "Mouse inalámbrico")]
    pub nombre: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", code = "not_blank", message = "La descripción del producto es obligatoria"),
        length(min = 10, max = 500, message = "La descripción debe tener entre 10 y 500 caracteres")
    )]
    #[schema(example = "Mouse ergonómico con receptor USB")]
    pub descripcion: String,

    #[serde(default, deserialize_with = "lenient_precio")]
    #[validate(
        required(message = "El precio del producto es obligatorio"),
        custom(function = "validate_precio")
    )]
    #[schema(value_type = Option<f64>, example = 25.99)]
    pub precio: Option<Decimal>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON number or numeric string. Values outside the `Decimal`
/// range saturate to `Decimal::MAX`/`Decimal::MIN` so validation reports them
/// instead of the body failing to parse.
fn lenient_precio<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(PrecioVisitor)
}

fn precio_from_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if let Ok(precio) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Some(precio);
    }

    let approx = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if approx.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

struct PrecioVisitor;

impl<'de> Visitor<'de> for PrecioVisitor {
    type Value = Option<Decimal>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        precio_from_text(&v.to_string())
            .map(Some)
            .ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        precio_from_text(v)
            .map(Some)
            .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Strictly positive, at most 10 integer digits and 2 fraction digits
/// (trailing zeros do not count).
fn validate_precio(precio: &Decimal) -> Result<(), ValidationError> {
    if *precio <= Decimal::ZERO {
        return Err(ValidationError::new("range").with_message(Cow::Borrowed(PRECIO_POSITIVO)));
    }

    let fraction_digits = precio.normalize().scale();
    if fraction_digits > PRECIO_MAX_FRACTION_DIGITS || *precio >= Decimal::from(PRECIO_LIMITE_ENTERO)
    {
        return Err(ValidationError::new("digits").with_message(Cow::Borrowed(PRECIO_DIGITOS)));
    }

    Ok(())
}

/// Representation returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductoResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Mouse inalámbrico")]
    pub nombre: String,
    #[schema(example = "Mouse ergonómico con receptor USB")]
    pub descripcion: String,
    #[schema(value_type = String, example = "25.99")]
    pub precio: Decimal,
    #[serde(with = "axum_helpers::formats::date_time")]
    #[schema(value_type = String, example = "2024-01-15 10:30:00")]
    pub fecha_creacion: NaiveDateTime,
    #[serde(with = "axum_helpers::formats::date_time")]
    #[schema(value_type = String, example = "2024-01-15 10:30:00")]
    pub fecha_actualizacion: NaiveDateTime,
}

impl From<Producto> for ProductoResponse {
    fn from(producto: Producto) -> Self {
        Self {
            id: producto.id,
            nombre: producto.nombre,
            descripcion: producto.descripcion,
            precio: producto.precio,
            fecha_creacion: producto.fecha_creacion,
            fecha_actualizacion: producto.fecha_actualizacion,
        }
    }
}
