//! Flight timetable rows

use keyway_value::prelude::*;
use serde_json::Value;
use url::Url;

/// Field keys of a timetable row
mod keys {
    pub const ID: &str = "id";
    pub const PROVIDER_LOGO: &str = "provider_logo";
    pub const PRICE_IN_EUROS: &str = "price_in_euros";
    pub const DEPARTURE_TIME: &str = "departure_time";
    pub const ARRIVAL_TIME: &str = "arrival_time";
    pub const NUMBER_OF_STOPS: &str = "number_of_stops";
}

/// One connection in the flight timetable
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTableEntity {
    /// Connection identifier
    pub id: i64,
    /// Logo URL with a `{size}` placeholder, if the provider has one
    pub provider_logo_template: Option<String>,
    /// Ticket price; published either as a number or a numeric string
    pub price_in_euros: f64,
    /// Departure time as published, e.g. `"08:30"`
    pub departure_time: String,
    /// Arrival time as published
    pub arrival_time: String,
    /// Stops between departure and arrival
    pub number_of_stops: i64,
}

impl Convertible for TimeTableEntity {
    fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
        Ok(Self {
            id: value.int(keys::ID)?,
            provider_logo_template: value.string(keys::PROVIDER_LOGO).ok(),
            price_in_euros: value.double(keys::PRICE_IN_EUROS)?,
            departure_time: value.string(keys::DEPARTURE_TIME)?,
            arrival_time: value.string(keys::ARRIVAL_TIME)?,
            number_of_stops: value.int(keys::NUMBER_OF_STOPS)?,
        })
    }
}

impl TimeTableEntity {
    /// Provider logo for a given edge size.
    ///
    /// Plain `http` links are upgraded to `https`. Returns `None` without a
    /// template or when the result does not parse.
    pub fn provider_logo_url(&self, size: u32) -> Option<Url> {
        let template = self.provider_logo_template.as_deref()?;
        let mut link = template.replace("{size}", &size.to_string());
        if !link.contains("https") {
            link = link.replace("http", "https");
        }
        Url::parse(&link).ok()
    }

    /// Human-readable stop count: `"Direct"`, `"1 change"`, `"3 changes"`
    pub fn number_of_stops_description(&self) -> String {
        match self.number_of_stops {
            0 => "Direct".to_string(),
            n if n % 10 == 1 => format!("{n} change"),
            n => format!("{n} changes"),
        }
    }
}
