//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let nombre = builder.nombre("Mouse");
//!     let descripcion = builder.descripcion("Mouse");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Tests stay reproducible because the data derives from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_producto");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("producto", "main"), "test-producto-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A producto nombre that fits the 2..=100 character rule
    pub fn nombre(&self, base: &str) -> String {
        format!("{} {}", base, self.seed % 100_000)
    }

    /// A producto descripcion that fits the 10..=500 character rule
    pub fn descripcion(&self, base: &str) -> String {
        format!("Descripción de prueba para {} ({})", base, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a list of messages contains `expected`
    pub fn assert_contains_message(messages: &[String], expected: &str, context: &str) {
        assert!(
            messages.iter().any(|m| m == expected),
            "{}: expected message {:?} in {:?}",
            context,
            expected,
            messages
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.nombre("Mouse"), builder2.nombre("Mouse"));
        assert_eq!(
            builder1.name("producto", "test"),
            builder2.name("producto", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.descripcion("x"), builder2.descripcion("x"));
    }

    #[test]
    fn test_generated_fields_fit_producto_rules() {
        let builder = TestDataBuilder::new(u64::MAX);

        let nombre = builder.nombre("Teclado mecánico");
        assert!((2..=100).contains(&nombre.chars().count()));

        let descripcion = builder.descripcion("Teclado mecánico");
        assert!((10..=500).contains(&descripcion.chars().count()));
    }

    #[test]
    fn test_assertions() {
        assert_eq!(assertions::assert_some(Some(3), "value"), 3);
        assertions::assert_contains_message(&["a".to_string(), "b".to_string()], "b", "list");
    }
}
