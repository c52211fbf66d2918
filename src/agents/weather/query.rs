use crate::extract::TaggedFields;
use crate::weather::Units;

/// Location and units the model extracted from a weather request
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub location: String,
    pub units: Units,
}

impl WeatherQuery {
    pub const KEYS: [&'static str; 2] = ["LOCATION", "UNITS"];

    pub fn from_reply(reply: &str, default_location: &str, default_units: Units) -> Self {
        let fields = TaggedFields::parse(reply);
        let missing = fields.missing(&Self::KEYS);
        if !missing.is_empty() {
            log::warn!("Weather analysis missing fields {:?}, using defaults", missing);
        }

        let location = fields
            .get("LOCATION")
            .map(str::to_string)
            .unwrap_or_else(|| default_location.to_string());

        let units = fields
            .get("UNITS")
            .and_then(|u| u.parse().ok())
            .unwrap_or(default_units);

        Self { location, units }
    }
}
