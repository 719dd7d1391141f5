//! Turns provider payloads into a [`ResolvedAddress`].

use crate::domain::address::{AddressSource, ResolvedAddress};
use crate::domain::geocoding::{AddressComponent, GeocodeResult, NominatimPlace};
use crate::utils::error::{PosError, Result};

pub const DEFAULT_CITY: &str = "Drogheda";
pub const DEFAULT_COUNTY: &str = "County Louth";
pub const IRELAND_COUNTRY_CODE: &str = "ie";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentKind {
    Route,
    StreetNumber,
    Neighbourhood,
    Locality,
    PostalTown,
    AdminLevel1,
    AdminLevel2,
}

// 一個 component 可能有多個 types，以第一個符合的為準
fn classify(component: &AddressComponent) -> Option<ComponentKind> {
    if component.has_type("route") {
        Some(ComponentKind::Route)
    } else if component.has_type("street_number") {
        Some(ComponentKind::StreetNumber)
    } else if component.has_type("sublocality") || component.has_type("neighborhood") {
        Some(ComponentKind::Neighbourhood)
    } else if component.has_type("locality") {
        Some(ComponentKind::Locality)
    } else if component.has_type("postal_town") {
        Some(ComponentKind::PostalTown)
    } else if component.has_type("administrative_area_level_1") {
        Some(ComponentKind::AdminLevel1)
    } else if component.has_type("administrative_area_level_2") {
        Some(ComponentKind::AdminLevel2)
    } else {
        None
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse the first result of an `OK` Google geocode response.
pub fn parse_geocode_result(result: &GeocodeResult) -> ResolvedAddress {
    let mut route = None;
    let mut street_number = None;
    let mut neighbourhood = None;
    let mut locality = None;
    let mut postal_town = None;
    let mut admin_level_1 = None;
    let mut admin_level_2 = None;

    for component in &result.address_components {
        let slot = match classify(component) {
            Some(ComponentKind::Route) => &mut route,
            Some(ComponentKind::StreetNumber) => &mut street_number,
            Some(ComponentKind::Neighbourhood) => &mut neighbourhood,
            Some(ComponentKind::Locality) => &mut locality,
            Some(ComponentKind::PostalTown) => &mut postal_town,
            Some(ComponentKind::AdminLevel1) => &mut admin_level_1,
            Some(ComponentKind::AdminLevel2) => &mut admin_level_2,
            None => continue,
        };
        if slot.is_none() {
            *slot = non_blank(Some(component.long_name.as_str()));
        }
    }

    let city = locality.or(postal_town).unwrap_or(DEFAULT_CITY).to_string();
    let county = admin_level_1.or(admin_level_2).unwrap_or(DEFAULT_COUNTY).to_string();

    let street = match (street_number, route) {
        (Some(number), Some(route)) => format!("{} {}", number, route),
        (None, Some(route)) => route.to_string(),
        (Some(number), None) => neighbourhood
            .map(str::to_string)
            .unwrap_or_else(|| number.to_string()),
        (None, None) => neighbourhood.map(str::to_string).unwrap_or_default(),
    };

    let street = if street.trim().is_empty() {
        street_from_formatted_address(&result.formatted_address, &city)
    } else {
        street
    };

    ResolvedAddress::new(
        AddressSource::GoogleMaps,
        street,
        city,
        Some(county),
        result.geometry.location.lat,
        result.geometry.location.lng,
    )
}

/// 沒有街道資訊時取 formatted_address 第一段；若與城市相同則改取第二段
fn street_from_formatted_address(formatted_address: &str, city: &str) -> String {
    let mut parts = formatted_address.split(',').map(str::trim);
    let first = parts.next().unwrap_or_default();
    if first == city {
        if let Some(second) = parts.next() {
            return second.to_string();
        }
    }
    first.to_string()
}

/// Parse a Nominatim place.
///
/// Returns `Ok(None)` when the place is not in Ireland (or carries no address
/// details), and an error when the coordinates are not numbers.
pub fn parse_nominatim_place(place: &NominatimPlace) -> Result<Option<ResolvedAddress>> {
    let Some(address) = &place.address else {
        return Ok(None);
    };
    if address.country_code.as_deref() != Some(IRELAND_COUNTRY_CODE) {
        return Ok(None);
    }

    let house_number = non_blank(address.house_number.as_deref());
    let road = non_blank(address.road.as_deref());
    let neighbourhood = non_blank(address.neighbourhood.as_deref());
    let suburb = non_blank(address.suburb.as_deref());
    let village = non_blank(address.village.as_deref());
    let town = non_blank(address.town.as_deref());
    let city = non_blank(address.city.as_deref());
    let county = non_blank(address.county.as_deref());

    let street = match (house_number, road) {
        (Some(number), Some(road)) => format!("{} {}", number, road),
        (None, Some(road)) => road.to_string(),
        _ => neighbourhood
            .or(suburb)
            .or(village)
            .map(str::to_string)
            .unwrap_or_else(|| {
                place
                    .display_name
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            }),
    };

    let resolved_city = town.or(city).or(village).or(county).unwrap_or(DEFAULT_CITY);
    // county 缺值時一律補 County Louth，即使地點不在 Louth
    let resolved_county = county.unwrap_or(DEFAULT_COUNTY);

    let latitude = parse_coordinate(&place.lat)?;
    let longitude = parse_coordinate(&place.lon)?;

    Ok(Some(ResolvedAddress::new(
        AddressSource::Nominatim,
        street,
        resolved_city,
        Some(resolved_county.to_string()),
        latitude,
        longitude,
    )))
}

fn parse_coordinate(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PosError::InvalidCoordinate {
            provider: AddressSource::Nominatim.to_string(),
            value: value.to_string(),
        })
}
