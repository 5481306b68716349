//! User-facing error messages shared by every service.

pub const VALIDATION_FAILED: &str = "Error de validación en los datos de entrada";
pub const INVALID_BODY: &str = "El cuerpo de la petición no es un JSON válido";
pub const ROUTE_NOT_FOUND: &str = "Recurso no encontrado";
pub const METHOD_NOT_ALLOWED: &str = "Método HTTP no soportado para este recurso";
pub const SERVICE_UNAVAILABLE: &str = "Servicio no disponible temporalmente";
pub const INVALID_QUERY: &str = "Los parámetros de la consulta no son válidos";
pub const INVALID_PATH: &str = "Los parámetros de la ruta no son válidos";
pub const INTERNAL_ERROR: &str =
    "Error interno del servidor. Por favor, contacte al administrador.";

/// `"El parámetro 'min' debe ser de tipo decimal"`
pub fn type_mismatch(parameter: &str, expected_type: &str) -> String {
    format!("El parámetro '{parameter}' debe ser de tipo {expected_type}")
}

/// `"El parámetro 'nombre' es obligatorio"`
pub fn missing_parameter(parameter: &str) -> String {
    format!("El parámetro '{parameter}' es obligatorio")
}

/// `"El parámetro 'nombre' no es válido"`
pub fn invalid_parameter(parameter: &str) -> String {
    format!("El parámetro '{parameter}' no es válido")
}

/// `"Producto no encontrado con id: '42'"`
pub fn not_found(resource: &str, field: &str, value: impl std::fmt::Display) -> String {
    format!("{resource} no encontrado con {field}: '{value}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_messages() {
        assert_eq!(
            type_mismatch("id", "entero"),
            "El parámetro 'id' debe ser de tipo entero"
        );
        assert_eq!(
            missing_parameter("nombre"),
            "El parámetro 'nombre' es obligatorio"
        );
        assert_eq!(
            invalid_parameter("nombre"),
            "El parámetro 'nombre' no es válido"
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            not_found("Producto", "id", 999),
            "Producto no encontrado con id: '999'"
        );
    }
}
