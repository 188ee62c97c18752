use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use askama::Template;

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {}

/// Content negotiation for the fallback route. API callers get the
/// portal's JSON error shape, browsers get the 404 page, everything
/// else plain text.
enum Negotiated {
    Json,
    Html,
    Plain,
}

fn negotiate(headers: &HeaderMap) -> Negotiated {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if accept.contains("application/json") {
        Negotiated::Json
    } else if accept.contains("text/html") {
        Negotiated::Html
    } else {
        Negotiated::Plain
    }
}

pub async fn not_found_handler(headers: HeaderMap) -> Response {
    let body = match negotiate(&headers) {
        Negotiated::Json => Json(serde_json::json!({
            "success": false,
            "message": "Not found",
        }))
        .into_response(),
        Negotiated::Html => NotFoundTemplate {}.into_response(),
        Negotiated::Plain => "not found".into_response(),
    };

    (StatusCode::NOT_FOUND, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, value.parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn test_json_branch_uses_portal_error_shape() {
        let response = not_found_handler(accept("application/json")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not found");
    }

    #[tokio::test]
    async fn test_html_branch_renders_the_page() {
        let response = not_found_handler(accept("text/html")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_no_accept_header_falls_back_to_plain_text() {
        let response = not_found_handler(HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"not found");
    }
}
