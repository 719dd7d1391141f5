use anyhow::Result;
use burger_pos::adapters::{build_http_client, GoogleMapsGeocoder, NominatimGeocoder};
use burger_pos::core::prefix_table::PrefixTable;
use burger_pos::core::{FallbackGeocoder, PrimaryGeocoder};
use burger_pos::{build_resolver, AddressSource, EircodeResolver, LookupOutcome, TomlConfig};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn http_client() -> Result<reqwest::Client> {
    Ok(build_http_client(Duration::from_secs(5), "BurgerPOS/1.0")?)
}

fn google(server: &MockServer) -> Result<Option<Arc<dyn PrimaryGeocoder>>> {
    let geocoder = GoogleMapsGeocoder::new(
        http_client()?,
        &server.url("/maps/api/geocode/json"),
        "test-key",
    )?;
    Ok(Some(Arc::new(geocoder)))
}

fn nominatim(server: &MockServer) -> Result<Option<Arc<dyn FallbackGeocoder>>> {
    let geocoder = NominatimGeocoder::new(http_client()?, &server.url("/search"), "BurgerPOS/1.0")?;
    Ok(Some(Arc::new(geocoder)))
}

#[tokio::test]
async fn test_google_maps_success_end_to_end() -> Result<()> {
    let server = MockServer::start_async().await;

    let google_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/geocode/json")
                .query_param("address", "A92D65P")
                .query_param("components", "country:IE")
                .query_param("key", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "status": "OK",
                    "results": [{
                        "formatted_address": "12 Main Street, Drogheda, Co. Louth, A92 D65P, Ireland",
                        "geometry": {"location": {"lat": 53.7179, "lng": -6.3561}},
                        "address_components": [
                            {"long_name": "12", "short_name": "12", "types": ["street_number"]},
                            {"long_name": "Main Street", "short_name": "Main St", "types": ["route"]},
                            {"long_name": "Drogheda", "short_name": "Drogheda", "types": ["locality", "political"]},
                            {"long_name": "Louth", "short_name": "LH", "types": ["administrative_area_level_1", "political"]},
                            {"long_name": "Ireland", "short_name": "IE", "types": ["country", "political"]}
                        ]
                    }]
                }));
        })
        .await;

    let nominatim_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let resolver = EircodeResolver::new(google(&server)?, nominatim(&server)?);
    let outcome = resolver.resolve("a92 d65p").await;

    google_mock.assert_async().await;
    assert_eq!(nominatim_mock.hits_async().await, 0);

    let address = outcome.into_address().expect("address should be found");
    assert_eq!(address.street_or_area, "12 Main Street");
    assert_eq!(address.city, "Drogheda");
    assert_eq!(address.county.as_deref(), Some("Louth"));
    assert_eq!(address.country, "Ireland");
    assert_eq!(address.latitude, 53.7179);
    assert_eq!(address.source, AddressSource::GoogleMaps);

    Ok(())
}

#[tokio::test]
async fn test_google_request_denied_does_not_fall_through() -> Result<()> {
    let server = MockServer::start_async().await;

    let google_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200).json_body(serde_json::json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            }));
        })
        .await;

    let nominatim_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let resolver = EircodeResolver::new(google(&server)?, nominatim(&server)?);
    let outcome = resolver.resolve("A92 D65P").await;

    google_mock.assert_async().await;
    assert_eq!(nominatim_mock.hits_async().await, 0);

    match outcome {
        LookupOutcome::SourceError { source, message } => {
            assert_eq!(source, AddressSource::GoogleMaps);
            assert!(message.contains("Google Maps configuration"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_google_http_failure_is_source_error() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(500);
        })
        .await;

    let resolver = EircodeResolver::new(google(&server)?, None);
    assert!(matches!(
        resolver.resolve("A92D65P").await,
        LookupOutcome::SourceError {
            source: AddressSource::GoogleMaps,
            ..
        }
    ));

    Ok(())
}

#[tokio::test]
async fn test_nominatim_used_when_google_absent() -> Result<()> {
    let server = MockServer::start_async().await;

    let nominatim_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("postalcode", "A91H2X4")
                .query_param("country", "ie")
                .query_param("countrycodes", "ie")
                .query_param("format", "json")
                .query_param("addressdetails", "1")
                .query_param("limit", "1");
            then.status(200).json_body(serde_json::json!([{
                "display_name": "Church St, Dundalk, County Louth, A91 H2X4, Ireland",
                "lat": "54.0008",
                "lon": "-6.4058",
                "address": {
                    "road": "Church St",
                    "town": "Dundalk",
                    "county": "County Louth",
                    "postcode": "A91 H2X4",
                    "country_code": "ie"
                }
            }]));
        })
        .await;

    let resolver = EircodeResolver::new(None, nominatim(&server)?);
    let address = resolver
        .resolve("A91 H2X4")
        .await
        .into_address()
        .expect("address should be found");

    nominatim_mock.assert_async().await;
    assert_eq!(address.city, "Dundalk");
    assert_eq!(address.street_or_area, "Church St");
    assert_eq!(address.latitude, 54.0008);
    assert_eq!(address.longitude, -6.4058);
    assert_eq!(address.source, AddressSource::Nominatim);

    Ok(())
}

#[tokio::test]
async fn test_nominatim_failure_falls_back_to_a92_record() -> Result<()> {
    let server = MockServer::start_async().await;

    let nominatim_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(503);
        })
        .await;

    let resolver = EircodeResolver::new(None, nominatim(&server)?)
        .with_prefix_table(Arc::new(PrefixTable::default()));
    let address = resolver
        .resolve("A92 X1Y2")
        .await
        .into_address()
        .expect("A92 always resolves");

    nominatim_mock.assert_async().await;
    assert_eq!(address.street_or_area, "Drogheda Area");
    assert_eq!(address.city, "Drogheda");
    assert_eq!(address.latitude, 53.7134);
    assert_eq!(address.longitude, -6.3488);
    assert_eq!(address.source, AddressSource::PrefixTable);

    Ok(())
}

#[tokio::test]
async fn test_empty_nominatim_result_and_unknown_prefix_is_not_found() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let resolver = EircodeResolver::new(None, nominatim(&server)?);
    assert_eq!(resolver.resolve("Z99XXXX").await, LookupOutcome::NotFound);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_nominatim_falls_back_to_table() -> Result<()> {
    // 沒有人在這個 port 監聽
    let fallback: Option<Arc<dyn FallbackGeocoder>> = Some(Arc::new(NominatimGeocoder::new(
        http_client()?,
        "http://127.0.0.1:9/search",
        "BurgerPOS/1.0",
    )?));

    let resolver = EircodeResolver::new(None, fallback);
    let address = resolver.resolve("H91 E2K3").await.into_address().unwrap();
    assert_eq!(address.city, "Galway");
    assert_eq!(address.street_or_area, "Galway City");

    Ok(())
}

#[tokio::test]
async fn test_invalid_format_makes_no_requests() -> Result<()> {
    let server = MockServer::start_async().await;

    let any_request = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let resolver = EircodeResolver::new(google(&server)?, nominatim(&server)?);
    for raw in ["", "Drogheda", "A92", "A92 D65P 1", "0A2D65P", "A\u{FF19}\u{FF12}D65P"] {
        assert!(matches!(
            resolver.resolve(raw).await,
            LookupOutcome::InvalidFormat(_)
        ));
    }

    assert_eq!(any_request.hits_async().await, 0);

    Ok(())
}

#[tokio::test]
async fn test_build_resolver_from_config() -> Result<()> {
    let server = MockServer::start_async().await;

    let nominatim_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[geocoding]
nominatim_endpoint = "{}"
"#,
        server.url("/search")
    ))?;

    let resolver = build_resolver(&config)?;
    assert!(!resolver.has_primary());
    assert!(resolver.has_fallback());

    let address = resolver.resolve("T23 AB12").await.into_address().unwrap();
    nominatim_mock.assert_async().await;
    assert_eq!(address.city, "Cork");

    Ok(())
}
