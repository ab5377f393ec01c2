use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{config_error, Error};

/// Browser access for the configured front-end origins. `*` allows any.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, Error> {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| config_error("CORS_ALLOWED_ORIGINS"))?;

        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(vec![header::CONTENT_TYPE]))
}

#[test]
fn malformed_origin_is_rejected_test() {
    let err = cors_layer(&["http://localhost:8100\n".to_string()]).unwrap_err();

    assert_eq!(err.code, 6);
    assert!(cors_layer(&["*".to_string()]).is_ok());
    assert!(cors_layer(&[]).is_ok());
}
