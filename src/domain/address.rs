//! Address lookup types shared by the validator, the resolver and its sources.

use serde::Serialize;
use std::fmt;

pub const COUNTRY_IRELAND: &str = "Ireland";

/// A validated Eircode in compact form (`A92D65P`).
///
/// Only [`crate::core::eircode::parse`] constructs one, so holding an `Eircode`
/// means the 7-character routing key + unique identifier pattern was checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Eircode(String);

impl Eircode {
    pub(crate) fn new_unchecked(normalized: String) -> Self {
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three characters, roughly identifying a postal district.
    pub fn routing_key(&self) -> &str {
        &self.0[..3]
    }

    pub fn unique_identifier(&self) -> &str {
        &self.0[3..]
    }

    /// Printed form with the conventional space, e.g. `A92 D65P`.
    pub fn formatted(&self) -> String {
        format!("{} {}", self.routing_key(), self.unique_identifier())
    }
}

impl fmt::Display for Eircode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressSource {
    GoogleMaps,
    Nominatim,
    PrefixTable,
}

impl fmt::Display for AddressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressSource::GoogleMaps => "google-maps",
            AddressSource::Nominatim => "nominatim",
            AddressSource::PrefixTable => "prefix-table",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAddress {
    pub street_or_area: String,
    pub city: String,
    pub county: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub source: AddressSource,
}

impl ResolvedAddress {
    pub fn new(
        source: AddressSource,
        street_or_area: impl Into<String>,
        city: impl Into<String>,
        county: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            street_or_area: street_or_area.into(),
            city: city.into(),
            county,
            latitude,
            longitude,
            country: COUNTRY_IRELAND.to_string(),
            source,
        }
    }
}

/// One row of the static routing-key table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefixLookupEntry {
    pub city: &'static str,
    pub area_label: &'static str,
    pub county: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl PrefixLookupEntry {
    pub fn to_address(&self) -> ResolvedAddress {
        ResolvedAddress::new(
            AddressSource::PrefixTable,
            self.area_label,
            self.city,
            Some(self.county.to_string()),
            self.latitude,
            self.longitude,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ResolvedAddress),
    NotFound,
    InvalidFormat(String),
    SourceError {
        source: AddressSource,
        message: String,
    },
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    pub fn address(&self) -> Option<&ResolvedAddress> {
        match self {
            LookupOutcome::Found(address) => Some(address),
            _ => None,
        }
    }

    pub fn into_address(self) -> Option<ResolvedAddress> {
        match self {
            LookupOutcome::Found(address) => Some(address),
            _ => None,
        }
    }

    /// Text meant to be shown as-is next to the Eircode field.
    pub fn user_message(&self) -> String {
        match self {
            LookupOutcome::Found(address) => {
                format!("{}, {}", address.street_or_area, address.city)
            }
            LookupOutcome::NotFound => {
                "No address found. Please enter the address manually.".to_string()
            }
            LookupOutcome::InvalidFormat(reason) => reason.clone(),
            LookupOutcome::SourceError { message, .. } => message.clone(),
        }
    }
}
