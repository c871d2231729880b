//! JSON body extractor whose rejections render as [`ErrorResponse`](crate::ErrorResponse).

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Drop-in replacement for [`axum::Json`] as an extractor.
///
/// A missing content type, malformed JSON or a body that does not match `T`
/// becomes [`AppError::JsonExtractorRejection`], keeping axum's status (400,
/// 415 or 422) but answering with the structured error body.
///
/// ```ignore
/// use axum_helpers::extractors::Json;
///
/// async fn chat(Json(request): Json<ChatRequest>) -> ChatbotResult<axum::Json<ChatResponse>> {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Greeting {
        name: String,
    }

    async fn greet(Json(greeting): Json<Greeting>) -> String {
        format!("hello {}", greeting.name)
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(greet));
        let mut request = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let (status, body) = send(Some("application/json"), r#"{"name":"Alice"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"hello Alice");
    }

    #[tokio::test]
    async fn test_missing_field_renders_error_response() {
        let (status, body) = send(Some("application/json"), "{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
        assert_eq!(body["code"], 1003);
        assert!(body["message"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_malformed_json_renders_error_response() {
        let (status, body) = send(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_missing_content_type_renders_error_response() {
        let (status, body) = send(None, r#"{"name":"Alice"}"#).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
    }
}
