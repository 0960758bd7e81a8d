// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! IP geolocation endpoint.

use crate::error::Result;
use crate::services::GeoInfo;
use crate::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/geo", get(get_geo))
}

/// Client IP from proxy headers (Cloud Run / Netlify style), falling back
/// to loopback when none is present.
fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|h| h.to_str().ok()) {
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    "127.0.0.1".to_string()
}

/// Resolve the caller's approximate location.
async fn get_geo(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<GeoInfo>> {
    let ip = client_ip(&headers);
    let info = state.geo_service.lookup(&ip).await?;
    Ok(Json(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_ip(&headers), "198.51.100.2");
    }

    #[test]
    fn test_client_ip_defaults_to_loopback() {
        assert_eq!(client_ip(&HeaderMap::new()), "127.0.0.1");
    }
}
