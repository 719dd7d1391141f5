//! Google Maps Geocoding web service.

use crate::domain::address::Eircode;
use crate::domain::geocoding::GeocodeResponse;
use crate::domain::ports::PrimaryGeocoder;
use crate::utils::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub struct GoogleMapsGeocoder {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GoogleMapsGeocoder {
    pub fn new(client: Client, endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, eircode: &Eircode) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", eircode.as_str())
            .append_pair("components", "country:IE")
            .append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl PrimaryGeocoder for GoogleMapsGeocoder {
    async fn geocode(&self, eircode: &Eircode) -> Result<GeocodeResponse> {
        // 不要把 key 寫進 log
        tracing::debug!("Geocoding {} via {}", eircode, self.endpoint);

        let response = self.client.get(self.request_url(eircode)).send().await?;
        let status = response.status();
        tracing::debug!("Google Maps response status: {}", status);

        if !status.is_success() {
            return Err(PosError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        Ok(response.json::<GeocodeResponse>().await?)
    }
}
