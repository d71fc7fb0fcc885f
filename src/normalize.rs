use serde::Serialize;

use crate::geocode::{AddressParts, GeocodeCandidate};

/// Canonical address record. Every field is optional; a candidate matched at
/// area level legitimately carries no street or house number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedAddress {
    pub street: Option<String>,
    pub number: Option<u32>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<u32>,
}

pub fn normalize(candidate: &GeocodeCandidate) -> NormalizedAddress {
    let Some(parts) = candidate.address.as_ref() else {
        return NormalizedAddress::default();
    };

    NormalizedAddress {
        street: parts.road.clone(),
        number: parse_integer(parts.house_number.as_deref()),
        city: settlement(parts),
        state: parts.state.clone(),
        zip: parse_integer(parts.postal_code.as_deref()),
    }
}

// city, then town, then municipality
fn settlement(parts: &AddressParts) -> Option<String> {
    parts
        .city
        .as_ref()
        .or(parts.town.as_ref())
        .or(parts.municipality.as_ref())
        .cloned()
}

fn parse_integer(value: Option<&str>) -> Option<u32> {
    value.and_then(|raw| raw.parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_parts(parts: AddressParts) -> GeocodeCandidate {
        GeocodeCandidate {
            display_name: "x".into(),
            importance: 0.5,
            address: Some(parts),
            place_id: None,
            name: None,
            lat: None,
            lon: None,
        }
    }

    #[test]
    fn maps_full_address() {
        let candidate = with_parts(AddressParts {
            road: Some("Amphitheatre Parkway".into()),
            house_number: Some("1600".into()),
            city: Some("Mountain View".into()),
            town: Some("Ignored Town".into()),
            state: Some("California".into()),
            postal_code: Some("94043".into()),
            country: Some("United States".into()),
            ..AddressParts::default()
        });

        assert_eq!(
            normalize(&candidate),
            NormalizedAddress {
                street: Some("Amphitheatre Parkway".into()),
                number: Some(1600),
                city: Some("Mountain View".into()),
                state: Some("California".into()),
                zip: Some(94043),
            }
        );
    }

    #[test]
    fn falls_back_to_town_then_municipality() {
        let town = with_parts(AddressParts {
            town: Some("Smallville".into()),
            municipality: Some("County Seat".into()),
            ..AddressParts::default()
        });
        assert_eq!(normalize(&town).city.as_deref(), Some("Smallville"));

        let municipality = with_parts(AddressParts {
            municipality: Some("County Seat".into()),
            ..AddressParts::default()
        });
        assert_eq!(normalize(&municipality).city.as_deref(), Some("County Seat"));

        let none = with_parts(AddressParts {
            state: Some("Texas".into()),
            ..AddressParts::default()
        });
        assert!(normalize(&none).city.is_none());
    }

    #[test]
    fn non_numeric_values_become_absent() {
        let candidate = with_parts(AddressParts {
            house_number: Some("12B".into()),
            postal_code: Some("SW1A 1AA".into()),
            ..AddressParts::default()
        });
        let normalized = normalize(&candidate);
        assert!(normalized.number.is_none());
        assert!(normalized.zip.is_none());
    }

    #[test]
    fn signed_numbers_follow_unsigned_parsing() {
        assert_eq!(parse_integer(Some("+5")), Some(5));
        assert_eq!(parse_integer(Some("-5")), None);
    }

    #[test]
    fn missing_parts_yield_empty_record() {
        let mut candidate = with_parts(AddressParts::default());
        assert_eq!(normalize(&candidate), NormalizedAddress::default());

        candidate.address = None;
        assert_eq!(normalize(&candidate), NormalizedAddress::default());
    }
}
