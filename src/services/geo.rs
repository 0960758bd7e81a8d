// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Approximate IP geolocation via ip-api.com.
//!
//! Consumed only as an input to deed/profile location snapshots. Loopback
//! addresses (local development) get a hard-coded San Francisco fallback.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolved location for a client IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoInfo {
    pub country_code: String,
    pub country_name: String,
    pub region: String,
    pub region_name: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub timezone: String,
    /// "ip-api" or "fallback"
    pub source: String,
}

impl GeoInfo {
    /// Hard-coded response for loopback/unknown clients.
    pub fn localhost_fallback() -> Self {
        Self {
            country_code: "US".to_string(),
            country_name: "United States".to_string(),
            region: "CA".to_string(),
            region_name: "California".to_string(),
            city: "San Francisco".to_string(),
            lat: 37.7749,
            lng: -122.4194,
            timezone: "America/Los_Angeles".to_string(),
            source: "fallback".to_string(),
        }
    }
}

/// ip-api.com response shape (only the fields we request).
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    #[serde(rename = "countryCode")]
    country_code: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    #[serde(rename = "regionName")]
    region_name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    timezone: String,
}

/// Client for the ip-api.com lookup endpoint.
#[derive(Clone)]
pub struct GeoService {
    http: Option<reqwest::Client>,
    base_url: String,
}

impl GeoService {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .ok();

        Self {
            http,
            base_url: "http://ip-api.com/json".to_string(),
        }
    }

    /// Create a client that never performs lookups; every IP resolves to
    /// the localhost fallback. For tests.
    pub fn new_mock() -> Self {
        Self {
            http: None,
            base_url: String::new(),
        }
    }

    /// Resolve an IP to an approximate location.
    pub async fn lookup(&self, ip: &str) -> Result<GeoInfo, AppError> {
        if is_loopback(ip) {
            return Ok(GeoInfo::localhost_fallback());
        }

        let Some(http) = self.http.as_ref() else {
            return Ok(GeoInfo::localhost_fallback());
        };

        let url = format!(
            "{}/{}?fields=status,country,countryCode,region,regionName,city,lat,lon,timezone",
            self.base_url, ip
        );

        let response = http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::GeoApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::GeoApi(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeoApi(e.to_string()))?;

        if body.status != "success" {
            return Err(AppError::GeoApi("Geo lookup failed".to_string()));
        }

        Ok(GeoInfo {
            country_code: body.country_code,
            country_name: body.country,
            region: body.region,
            region_name: body.region_name,
            city: body.city,
            lat: body.lat,
            lng: body.lon,
            timezone: body.timezone,
            source: "ip-api".to_string(),
        })
    }
}

impl Default for GeoService {
    fn default() -> Self {
        Self::new_mock()
    }
}

fn is_loopback(ip: &str) -> bool {
    ip == "127.0.0.1" || ip == "::1" || ip.is_empty()
}
