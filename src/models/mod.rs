//! Payload records returned by DataMall
//!
//! Records keep DataMall's PascalCase names on the wire and expose snake_case
//! fields in Rust. Nearly every response wraps its data in `{"value": ...}`,
//! which is modelled once as [`ValueEnvelope`].

#[allow(missing_docs)]
mod bus;
#[allow(missing_docs)]
mod parking;
#[allow(missing_docs)]
mod traffic;
#[allow(missing_docs)]
mod train;

pub use bus::{BusArrivals, BusRoute, BusService, BusStop, NextBus, ServiceArrival};
pub use parking::{BicyclePark, CarPark, TaxiAvailability, TaxiStand};
pub use traffic::{
    EstimatedTravelTime, FaultyTrafficLight, RoadEvent, TrafficAdvisoryMessage, TrafficFlowRecord,
    TrafficImage, TrafficIncident, TrafficSpeedBand,
};
pub use train::{
    AffectedSegment, AlertMessage, ForecastDensity, ForecastInterval, LiftMaintenance,
    RealTimeDensity, StationForecast, TrainLine, TrainServiceAlert,
};

use serde::{Deserialize, Deserializer, Serialize};

/// Generic `{"value": T}` response wrapper
///
/// Accepts both `value` and `Value` keys; other keys such as
/// `odata.metadata` are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueEnvelope<T> {
    /// Wrapped payload
    #[serde(alias = "Value")]
    pub value: T,
}

/// One entry of a bulk dataset metadata response
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// Signed, time-limited link to the dataset payload
    #[serde(rename = "Link", default)]
    pub link: String,
}

/// Deserialize a field DataMall sometimes sends as a number and sometimes as a string
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
