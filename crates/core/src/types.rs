//! Domain value types with a canonical wire structure
//!
//! These are native kinds: they never recurse like composites, but they are
//! written as small fixed-shape objects rather than scalars.

use crate::value::{PropertyBag, Value};
use serde::{Deserialize, Serialize};

/// Geographic coordinate, written as `{latitude, longitude}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoCoordinate {
            latitude,
            longitude,
        }
    }

    /// Canonical two-field structure
    pub fn to_bag(&self) -> PropertyBag {
        let mut bag = PropertyBag::with_capacity(2);
        bag.insert("latitude", self.latitude);
        bag.insert("longitude", self.longitude);
        bag
    }

    /// Recognize the canonical structure
    ///
    /// Exactly two numeric entries named `latitude` and `longitude` (any case).
    pub fn from_bag(bag: &PropertyBag) -> Option<Self> {
        if bag.len() != 2 {
            return None;
        }
        let latitude = bag.get_ignore_case("latitude")?.1.as_number()?;
        let longitude = bag.get_ignore_case("longitude")?.1.as_number()?;
        Some(GeoCoordinate::new(latitude, longitude))
    }
}

/// Phone number as accepted and returned by the server
///
/// Writes carry `input` and an optional `defaultCountry`; reads may also carry
/// the server-parsed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Raw number as entered
    pub input: String,
    /// ISO country code used when `input` has no prefix
    pub default_country: Option<String>,
    /// Parsed international form (`+31 1234567`)
    pub international_formatted: Option<String>,
    /// Parsed country calling code
    pub country_code: Option<u64>,
    /// Parsed national number
    pub national: Option<u64>,
    /// Parsed national form
    pub national_formatted: Option<String>,
    /// Whether the server considered the number valid
    pub valid: Option<bool>,
}

impl PhoneNumber {
    /// Create a phone number from raw input
    pub fn new(input: impl Into<String>) -> Self {
        PhoneNumber {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Set the default country
    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = Some(country.into());
        self
    }

    /// Canonical write structure: `input` plus `defaultCountry` when set
    pub fn to_bag(&self) -> PropertyBag {
        let mut bag = PropertyBag::with_capacity(2);
        bag.insert("input", self.input.as_str());
        if let Some(country) = &self.default_country {
            bag.insert("defaultCountry", country.as_str());
        }
        bag
    }

    /// Recognize a phone-number structure
    ///
    /// Requires `input` or `internationalFormatted`; all other keys are
    /// optional. Returns `None` if a known key carries the wrong type.
    pub fn from_bag(bag: &PropertyBag) -> Option<Self> {
        if !Self::looks_like(bag) {
            return None;
        }
        let text = |key: &str| -> Option<Option<String>> {
            match bag.get_ignore_case(key).map(|(_, v)| v) {
                None | Some(Value::Null) => Some(None),
                Some(Value::String(s)) => Some(Some(s.clone())),
                Some(_) => None,
            }
        };
        let number = |key: &str| -> Option<Option<u64>> {
            match bag.get_ignore_case(key).map(|(_, v)| v) {
                None | Some(Value::Null) => Some(None),
                Some(Value::Int(i)) => u64::try_from(*i).ok().map(Some),
                Some(_) => None,
            }
        };
        let valid = match bag.get_ignore_case("valid").map(|(_, v)| v) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => return None,
        };
        Some(PhoneNumber {
            input: text("input")?.unwrap_or_default(),
            default_country: text("defaultCountry")?,
            international_formatted: text("internationalFormatted")?,
            country_code: number("countryCode")?,
            national: number("national")?,
            national_formatted: text("nationalFormatted")?,
            valid,
        })
    }

    /// Cheap shape check used before attempting [`PhoneNumber::from_bag`]
    pub fn looks_like(bag: &PropertyBag) -> bool {
        const KNOWN: [&str; 7] = [
            "input",
            "defaultcountry",
            "internationalformatted",
            "countrycode",
            "national",
            "nationalformatted",
            "valid",
        ];
        let has_anchor = bag.get_ignore_case("input").is_some()
            || bag.get_ignore_case("internationalFormatted").is_some();
        has_anchor && bag.keys().all(|k| KNOWN.contains(&k.to_lowercase().as_str()))
    }
}

/// A resolved enum variant: its name and underlying numeric value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Variant name, written to the wire
    pub name: String,
    /// Underlying numeric value
    pub value: i64,
}

impl EnumValue {
    /// Create an enum value
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        EnumValue {
            name: name.into(),
            value,
        }
    }
}
