//! OpenAPI documentation configuration

use axum_helpers::{ErrorResponse, HealthResponse};
use utoipa::OpenApi;

/// Combined OpenAPI documentation, served under `/api`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chatbot API",
        version = "0.1.0",
        description = "Train on relational tables and ask questions over them",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    nest(
        // Parenthesized: the derive rejects a bare empty literal; the empty prefix is intended
        (path = (""), api = domain_chatbot::ChatbotApiDoc)
    ),
    components(schemas(ErrorResponse, HealthResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_chatbot_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/tables", "/tables/{table_name}/columns", "/train", "/train-sql", "/chat"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
