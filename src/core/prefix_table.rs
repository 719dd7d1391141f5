//! Last-resort lookup: routing key → approximate area.

use crate::domain::address::{AddressSource, Eircode, PrefixLookupEntry, ResolvedAddress};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Routing key that always maps to [`DROGHEDA_AREA`], whatever the table holds.
pub const DROGHEDA_ROUTING_KEY: &str = "A92";

pub const DROGHEDA_AREA: PrefixLookupEntry = PrefixLookupEntry {
    city: "Drogheda",
    area_label: "Drogheda Area",
    county: "County Louth",
    latitude: 53.7134,
    longitude: -6.3488,
};

const STANDARD_ENTRIES: &[(&str, PrefixLookupEntry)] = &[
    (
        "A92",
        PrefixLookupEntry {
            city: "Drogheda",
            area_label: "Drogheda",
            county: "County Louth",
            latitude: 53.7134,
            longitude: -6.3488,
        },
    ),
    (
        "A91",
        PrefixLookupEntry {
            city: "Dundalk",
            area_label: "Dundalk",
            county: "County Louth",
            latitude: 54.0008,
            longitude: -6.4058,
        },
    ),
    (
        "D01",
        PrefixLookupEntry {
            city: "Dublin",
            area_label: "Dublin 1",
            county: "County Dublin",
            latitude: 53.3498,
            longitude: -6.2603,
        },
    ),
    (
        "D02",
        PrefixLookupEntry {
            city: "Dublin",
            area_label: "Dublin 2",
            county: "County Dublin",
            latitude: 53.3382,
            longitude: -6.2591,
        },
    ),
    (
        "T12",
        PrefixLookupEntry {
            city: "Cork",
            area_label: "Cork City",
            county: "County Cork",
            latitude: 51.8985,
            longitude: -8.4756,
        },
    ),
    (
        "T23",
        PrefixLookupEntry {
            city: "Cork",
            area_label: "Cork City",
            county: "County Cork",
            latitude: 51.8985,
            longitude: -8.4756,
        },
    ),
    (
        "H91",
        PrefixLookupEntry {
            city: "Galway",
            area_label: "Galway City",
            county: "County Galway",
            latitude: 53.2707,
            longitude: -9.0568,
        },
    ),
    (
        "V94",
        PrefixLookupEntry {
            city: "Limerick",
            area_label: "Limerick City",
            county: "County Limerick",
            latitude: 52.6638,
            longitude: -8.6267,
        },
    ),
    (
        "X91",
        PrefixLookupEntry {
            city: "Waterford",
            area_label: "Waterford City",
            county: "County Waterford",
            latitude: 52.2593,
            longitude: -7.1101,
        },
    ),
];

static STANDARD_TABLE: LazyLock<Arc<PrefixTable>> =
    LazyLock::new(|| Arc::new(PrefixTable::from_entries(STANDARD_ENTRIES.iter().copied())));

/// Immutable once built; share it through `Arc`.
#[derive(Debug, Default)]
pub struct PrefixTable {
    entries: HashMap<&'static str, PrefixLookupEntry>,
}

impl PrefixTable {
    /// The built-in table, constructed on first use.
    pub fn standard() -> Arc<PrefixTable> {
        Arc::clone(&STANDARD_TABLE)
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (&'static str, PrefixLookupEntry)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, routing_key: &str) -> Option<&PrefixLookupEntry> {
        self.entries.get(routing_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, eircode: &Eircode) -> Option<ResolvedAddress> {
        let routing_key = eircode.routing_key();
        if routing_key == DROGHEDA_ROUTING_KEY {
            return Some(DROGHEDA_AREA.to_address());
        }
        self.get(routing_key).map(PrefixLookupEntry::to_address)
    }
}
