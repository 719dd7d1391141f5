use crate::domain::address::Eircode;
use crate::domain::geocoding::{GeocodeResponse, NominatimPlace};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 主要地理編碼來源（Google Maps）。沒有設定 API key 時根本不會建立。
#[async_trait]
pub trait PrimaryGeocoder: Send + Sync {
    /// Geocode the code as free text, restricted to Ireland.
    async fn geocode(&self, eircode: &Eircode) -> Result<GeocodeResponse>;
}

/// 備援來源，以郵遞區號查詢公開的 geocoder。
#[async_trait]
pub trait FallbackGeocoder: Send + Sync {
    async fn search_postal_code(&self, eircode: &Eircode) -> Result<Vec<NominatimPlace>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    /// `None` when no usable key is configured.
    fn google_api_key(&self) -> Option<&str>;
    fn google_endpoint(&self) -> &str;
    /// `None` when the fallback geocoder is disabled.
    fn nominatim_endpoint(&self) -> Option<&str>;
    fn user_agent(&self) -> &str;
}
