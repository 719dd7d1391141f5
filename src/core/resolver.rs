use crate::core::address_parser::{parse_geocode_result, parse_nominatim_place};
use crate::core::eircode;
use crate::core::prefix_table::PrefixTable;
use crate::domain::address::{AddressSource, Eircode, LookupOutcome};
use crate::domain::geocoding::GeocodeStatus;
use crate::domain::ports::{FallbackGeocoder, PrimaryGeocoder};
use crate::utils::error::PosError;
use std::sync::Arc;

/// Resolves an Eircode through Google Maps, then Nominatim, then the static
/// routing-key table.
///
/// Sources are tried one at a time. Nominatim is only consulted when no
/// primary geocoder was injected: once Google Maps has answered (even with a
/// failure status) its answer is final.
pub struct EircodeResolver {
    primary: Option<Arc<dyn PrimaryGeocoder>>,
    fallback: Option<Arc<dyn FallbackGeocoder>>,
    prefixes: Arc<PrefixTable>,
}

impl EircodeResolver {
    pub fn new(
        primary: Option<Arc<dyn PrimaryGeocoder>>,
        fallback: Option<Arc<dyn FallbackGeocoder>>,
    ) -> Self {
        Self {
            primary,
            fallback,
            prefixes: PrefixTable::standard(),
        }
    }

    pub fn with_prefix_table(mut self, prefixes: Arc<PrefixTable>) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub async fn resolve(&self, raw: &str) -> LookupOutcome {
        let eircode = match eircode::parse(raw) {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!("❌ Rejected Eircode input {:?}: {}", raw, e);
                return LookupOutcome::InvalidFormat(e.user_friendly_message());
            }
        };

        tracing::info!("🔍 Resolving Eircode {}", eircode.formatted());

        if let Some(primary) = &self.primary {
            return self.resolve_with_primary(primary.as_ref(), &eircode).await;
        }
        tracing::warn!("⚠️ Google Maps geocoder not configured, trying fallback sources");

        if let Some(fallback) = &self.fallback {
            if let Some(outcome) = self.resolve_with_fallback(fallback.as_ref(), &eircode).await {
                return outcome;
            }
        }

        self.resolve_with_prefix(&eircode)
    }

    async fn resolve_with_primary(
        &self,
        primary: &dyn PrimaryGeocoder,
        eircode: &Eircode,
    ) -> LookupOutcome {
        tracing::debug!("🗺️ Method 1: Google Maps geocoding for {}", eircode);

        let response = match primary.geocode(eircode).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Google Maps request failed: {}", e);
                return source_error(AddressSource::GoogleMaps, &e);
            }
        };

        tracing::debug!("📦 Google Maps status: {:?}", response.status);

        match (&response.status, response.results.first()) {
            (GeocodeStatus::Ok, Some(first)) => {
                if response.results.len() > 1 {
                    tracing::debug!(
                        "Google Maps returned {} results, using the first",
                        response.results.len()
                    );
                }
                let address = parse_geocode_result(first);
                tracing::info!(
                    "✅ Google Maps: {}, {} ({}, {})",
                    address.street_or_area,
                    address.city,
                    address.latitude,
                    address.longitude
                );
                LookupOutcome::Found(address)
            }
            (status, _) => {
                tracing::error!(
                    "❌ Google Maps geocoding failed: {:?} {}",
                    status,
                    response.error_message.as_deref().unwrap_or_default()
                );
                LookupOutcome::SourceError {
                    source: AddressSource::GoogleMaps,
                    message: status.failure_message().to_string(),
                }
            }
        }
    }

    /// `None` means "try the next source".
    async fn resolve_with_fallback(
        &self,
        fallback: &dyn FallbackGeocoder,
        eircode: &Eircode,
    ) -> Option<LookupOutcome> {
        tracing::debug!("📡 Method 2: Nominatim postal code search for {}", eircode);

        let places = match fallback.search_postal_code(eircode).await {
            Ok(places) => places,
            Err(e) if e.is_transport() => {
                tracing::warn!("⚠️ Nominatim unavailable, continuing: {}", e);
                return None;
            }
            Err(e) => {
                tracing::error!("❌ Nominatim returned an unusable response: {}", e);
                return Some(source_error(AddressSource::Nominatim, &e));
            }
        };

        let first = places.first()?;
        match parse_nominatim_place(first) {
            Ok(Some(address)) => {
                tracing::info!(
                    "✅ Nominatim: {}, {} ({}, {})",
                    address.street_or_area,
                    address.city,
                    address.latitude,
                    address.longitude
                );
                Some(LookupOutcome::Found(address))
            }
            Ok(None) => {
                tracing::debug!("Nominatim result is not an Irish address, skipping");
                None
            }
            Err(e) => {
                tracing::error!("❌ Nominatim result could not be parsed: {}", e);
                Some(source_error(AddressSource::Nominatim, &e))
            }
        }
    }

    fn resolve_with_prefix(&self, eircode: &Eircode) -> LookupOutcome {
        tracing::debug!("📡 Method 3: routing key lookup for {}", eircode.routing_key());

        match self.prefixes.lookup(eircode) {
            Some(address) => {
                tracing::info!("✅ Area detected from routing key: {}", address.street_or_area);
                LookupOutcome::Found(address)
            }
            None => {
                tracing::warn!("❌ No address found for Eircode {}", eircode);
                LookupOutcome::NotFound
            }
        }
    }
}

fn source_error(source: AddressSource, error: &PosError) -> LookupOutcome {
    LookupOutcome::SourceError {
        source,
        message: format!("Error searching address: {}", error),
    }
}
