//! Types shared by the database modules

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
