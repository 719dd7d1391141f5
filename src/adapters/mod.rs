// Adapters layer: HTTP implementations of the ports plus the backend client.

pub mod google_maps;
pub mod nominatim;
pub mod pos_api;

use crate::core::resolver::EircodeResolver;
use crate::domain::ports::{ConfigProvider, FallbackGeocoder, PrimaryGeocoder};
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub use google_maps::GoogleMapsGeocoder;
pub use nominatim::NominatimGeocoder;
pub use pos_api::PosApiClient;

pub fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

/// 依設定組出 resolver：有 API key 才啟用 Google Maps，Nominatim 可關閉
pub fn build_resolver<C: ConfigProvider>(config: &C) -> Result<EircodeResolver> {
    let client = build_http_client(config.request_timeout(), config.user_agent())?;

    let primary: Option<Arc<dyn PrimaryGeocoder>> = match config.google_api_key() {
        Some(key) => Some(Arc::new(GoogleMapsGeocoder::new(
            client.clone(),
            config.google_endpoint(),
            key,
        )?)),
        None => {
            tracing::warn!("⚠️ Google Maps API key not configured, primary geocoder disabled");
            None
        }
    };

    let fallback: Option<Arc<dyn FallbackGeocoder>> = match config.nominatim_endpoint() {
        Some(endpoint) => Some(Arc::new(NominatimGeocoder::new(
            client,
            endpoint,
            config.user_agent(),
        )?)),
        None => None,
    };

    Ok(EircodeResolver::new(primary, fallback))
}
