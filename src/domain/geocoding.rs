//! Response shapes of the two geocoding providers.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    RequestDenied,
    OverQueryLimit,
    Other(String),
}

impl From<String> for GeocodeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => GeocodeStatus::Ok,
            "ZERO_RESULTS" => GeocodeStatus::ZeroResults,
            "REQUEST_DENIED" => GeocodeStatus::RequestDenied,
            "OVER_QUERY_LIMIT" => GeocodeStatus::OverQueryLimit,
            _ => GeocodeStatus::Other(value),
        }
    }
}

impl GeocodeStatus {
    /// 非 OK 狀態對應給使用者看的訊息
    pub fn failure_message(&self) -> &'static str {
        match self {
            GeocodeStatus::ZeroResults => "Eircode not found. Check that it is correct.",
            GeocodeStatus::RequestDenied => {
                "Invalid API key or missing permissions. Check your Google Maps configuration."
            }
            GeocodeStatus::OverQueryLimit => "Query limit exceeded. Try again later.",
            GeocodeStatus::Ok | GeocodeStatus::Other(_) => "No address found for this Eircode.",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: GeocodeStatus,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// One element of the Nominatim `/search` array.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    #[serde(default)]
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub village: Option<String>,
    pub town: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub postcode: Option<String>,
    pub country_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_wire() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#)
                .unwrap();
        assert_eq!(response.status, GeocodeStatus::RequestDenied);
        assert!(response.results.is_empty());
        assert_eq!(response.error_message.as_deref(), Some("bad key"));

        let status: GeocodeStatus = serde_json::from_str(r#""INVALID_REQUEST""#).unwrap();
        assert_eq!(status, GeocodeStatus::Other("INVALID_REQUEST".to_string()));
        assert_eq!(status.failure_message(), "No address found for this Eircode.");
    }

    #[test]
    fn test_nominatim_place_keeps_string_coordinates() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"display_name": "Dundalk, County Louth, Ireland",
                 "lat": "54.0008", "lon": "-6.4058",
                 "address": {"town": "Dundalk", "country_code": "ie"}}]"#,
        )
        .unwrap();

        assert_eq!(places[0].lat, "54.0008");
        let address = places[0].address.as_ref().unwrap();
        assert_eq!(address.town.as_deref(), Some("Dundalk"));
        assert!(address.road.is_none());
    }
}
