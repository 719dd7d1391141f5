//! OpenStreetMap Nominatim postal code search.

use crate::domain::address::Eircode;
use crate::domain::geocoding::NominatimPlace;
use crate::domain::ports::FallbackGeocoder;
use crate::utils::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use url::Url;

pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "BurgerPOS/1.0";

pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, endpoint: &str, user_agent: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            user_agent: user_agent.into(),
        })
    }

    fn request_url(&self, eircode: &Eircode) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("postalcode", eircode.as_str())
            .append_pair("country", "ie")
            .append_pair("countrycodes", "ie")
            .append_pair("format", "json")
            .append_pair("addressdetails", "1")
            .append_pair("limit", "1");
        url
    }
}

#[async_trait]
impl FallbackGeocoder for NominatimGeocoder {
    async fn search_postal_code(&self, eircode: &Eircode) -> Result<Vec<NominatimPlace>> {
        let url = self.request_url(eircode);
        tracing::debug!("Querying Nominatim: {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PosError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        tracing::debug!("📦 Nominatim returned {} place(s)", places.len());
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::eircode::parse;

    #[test]
    fn test_request_url_carries_all_filters() {
        let geocoder =
            NominatimGeocoder::new(Client::new(), DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_USER_AGENT)
                .unwrap();
        let url = geocoder.request_url(&parse("a91 h2x4").unwrap());

        assert_eq!(url.path(), "/search");
        assert_eq!(
            url.query(),
            Some("postalcode=A91H2X4&country=ie&countrycodes=ie&format=json&addressdetails=1&limit=1")
        );
    }
}
