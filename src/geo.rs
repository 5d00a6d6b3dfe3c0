//! Public-IP geolocation with provider fallback
//!
//! Free IP-info services expose incompatible JSON schemas and have
//! inconsistent uptime. Services are tried strictly in declared order and
//! the first success wins; its fields overlay the all-"N/A" fallback
//! record. There is no cross-provider merging: mixing answers could pair a
//! city from one service with a country from another.

use crate::core::provider::ProviderError;
use crate::models::location::{LocationFields, NormalizedLocation};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// One IP-info service: endpoint plus a pure normalizer for its schema
pub struct GeoService {
    pub url: String,
    pub normalize: fn(&Value) -> LocationFields,
}

fn str_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

fn normalize_ipapi(body: &Value) -> LocationFields {
    LocationFields {
        ip: str_field(body, "ip"),
        country: str_field(body, "country_name"),
        city: str_field(body, "city"),
        isp: str_field(body, "org"),
    }
}

fn normalize_ipinfo(body: &Value) -> LocationFields {
    LocationFields {
        ip: str_field(body, "ip"),
        country: str_field(body, "country"),
        city: str_field(body, "city"),
        isp: str_field(body, "org"),
    }
}

fn normalize_ip_api(body: &Value) -> LocationFields {
    LocationFields {
        ip: str_field(body, "query"),
        country: str_field(body, "country"),
        city: str_field(body, "city"),
        isp: str_field(body, "isp"),
    }
}

fn normalize_ipify(body: &Value) -> LocationFields {
    LocationFields {
        ip: str_field(body, "ip"),
        ..LocationFields::default()
    }
}

/// Services in fallback order. The last entry supplies the IP only.
pub fn services() -> Vec<GeoService> {
    vec![
        GeoService {
            url: "https://ipapi.co/json/".to_string(),
            normalize: normalize_ipapi,
        },
        GeoService {
            url: "https://ipinfo.io/json".to_string(),
            normalize: normalize_ipinfo,
        },
        GeoService {
            url: "http://ip-api.com/json/".to_string(),
            normalize: normalize_ip_api,
        },
        GeoService {
            url: "https://api.ipify.org?format=json".to_string(),
            normalize: normalize_ipify,
        },
    ]
}

/// Resolve the machine's public-IP location. Never fails: when every
/// service is down the degraded all-"N/A" record comes back instead.
pub async fn resolve_location(client: &Client, timeout: Duration) -> NormalizedLocation {
    resolve_with(client, &services(), timeout).await
}

async fn fetch_one(
    client: &Client,
    service: &GeoService,
    timeout: Duration,
) -> Result<NormalizedLocation, ProviderError> {
    let response = client
        .get(&service.url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: status.to_string(),
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))?;

    Ok(NormalizedLocation::from_fields((service.normalize)(&body)))
}

async fn resolve_with(
    client: &Client,
    services: &[GeoService],
    timeout: Duration,
) -> NormalizedLocation {
    for service in services {
        match fetch_one(client, service, timeout).await {
            Ok(location) => return location,
            Err(err) => {
                debug!("geo service {} failed: {err}", service.url);
            }
        }
    }

    NormalizedLocation::fallback()
}
