//! Shared test infrastructure.
//!
//! - `TestDatabase`: disposable PostgreSQL container, removed on drop
//! - `TestDataBuilder`: deterministic names derived from the test name
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("trains_people_table");
//! let table = builder.table("people");
//! db.execute(&format!("CREATE TABLE {table} (id INT, name TEXT)")).await;
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Deterministic identifiers for test fixtures
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name so reruns produce the same fixtures
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A lowercase SQL-safe table name, e.g. `t_people_1234`
    pub fn table(&self, prefix: &str) -> String {
        format!("t_{}_{}", prefix, self.seed % 100_000)
    }

    /// A human-readable source label for ad hoc query training
    pub fn source_name(&self, suffix: &str) -> String {
        format!("test-source-{}-{}", self.seed, suffix)
    }
}
