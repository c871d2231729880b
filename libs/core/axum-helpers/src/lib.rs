//! # Axum Helpers
//!
//! Shared pieces for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`errors`]**: structured JSON error responses with error codes
//! - **[`extractors`]**: request extractors that reject with those responses

pub mod errors;
pub mod extractors;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, cors_layer, create_app,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use errors::{AppError, ErrorCode, ErrorResponse, not_found};
