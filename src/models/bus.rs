use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Bus arrival information for one stop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusArrivals {
    /// Stop the arrivals belong to
    pub bus_stop_code: String,
    /// One entry per service calling at the stop
    #[serde(default)]
    pub services: Vec<ServiceArrival>,
}

/// Next three buses of a single service at a stop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceArrival {
    /// Bus service number, e.g. "15"
    pub service_no: String,
    /// Public transport operator code (SBST, SMRT, TTS, GAS)
    pub operator: String,
    /// Next bus
    #[serde(default)]
    pub next_bus: NextBus,
    /// Second next bus
    #[serde(default)]
    pub next_bus2: NextBus,
    /// Third next bus
    #[serde(default)]
    pub next_bus3: NextBus,
}

impl ServiceArrival {
    /// Service number identifies the entry within one stop
    pub fn id(&self) -> &str {
        &self.service_no
    }

    /// Upcoming buses in order, skipping empty slots
    pub fn upcoming(&self) -> impl Iterator<Item = &NextBus> {
        [&self.next_bus, &self.next_bus2, &self.next_bus3]
            .into_iter()
            .filter(|bus| !bus.is_empty())
    }
}

/// One arriving bus
///
/// DataMall sends an object of empty strings when there is no bus for a slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NextBus {
    pub origin_code: String,
    pub destination_code: String,
    /// RFC 3339 timestamp in Singapore time
    pub estimated_arrival: String,
    #[serde(deserialize_with = "string_or_number")]
    pub monitored: String,
    #[serde(deserialize_with = "string_or_number")]
    pub latitude: String,
    #[serde(deserialize_with = "string_or_number")]
    pub longitude: String,
    #[serde(deserialize_with = "string_or_number")]
    pub visit_number: String,
    /// SEA (seats available), SDA (standing available), LSD (limited standing)
    pub load: String,
    /// "WAB" when wheelchair accessible
    pub feature: String,
    /// SD (single deck), DD (double deck), BD (bendy)
    #[serde(rename = "Type")]
    pub kind: String,
}

impl NextBus {
    /// True when DataMall had no bus for this slot
    pub fn is_empty(&self) -> bool {
        self.estimated_arrival.is_empty()
    }

    /// Parsed estimated arrival time
    pub fn estimated_arrival(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.estimated_arrival).ok()
    }
}

/// A bus stop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusStop {
    pub bus_stop_code: String,
    pub road_name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl BusStop {
    pub fn id(&self) -> &str {
        &self.bus_stop_code
    }
}

/// A bus service with its frequency bands (minutes between buses)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusService {
    pub service_no: String,
    pub operator: String,
    #[serde(deserialize_with = "string_or_number")]
    pub direction: String,
    /// EXPRESS, FEEDER, INDUSTRIAL, TOWNLINK, TRUNK, ...
    pub category: String,
    pub origin_code: String,
    pub destination_code: String,
    #[serde(rename = "AM_Peak_Freq")]
    pub am_peak_freq: String,
    #[serde(rename = "AM_Offpeak_Freq")]
    pub am_offpeak_freq: String,
    #[serde(rename = "PM_Peak_Freq")]
    pub pm_peak_freq: String,
    #[serde(rename = "PM_Offpeak_Freq")]
    pub pm_offpeak_freq: String,
    /// Loop point description for loop services, empty otherwise
    pub loop_desc: String,
}

impl BusService {
    /// Service number plus direction; a service appears once per direction
    pub fn id(&self) -> String {
        format!("{}-{}", self.service_no, self.direction)
    }
}

/// One stop along a bus service's route
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusRoute {
    pub service_no: String,
    pub operator: String,
    pub direction: u8,
    pub stop_sequence: u32,
    pub bus_stop_code: String,
    /// Distance from the origin stop in kilometres
    pub distance: f64,
    #[serde(rename = "WD_FirstBus")]
    pub wd_first_bus: String,
    #[serde(rename = "WD_LastBus")]
    pub wd_last_bus: String,
    #[serde(rename = "SAT_FirstBus")]
    pub sat_first_bus: String,
    #[serde(rename = "SAT_LastBus")]
    pub sat_last_bus: String,
    #[serde(rename = "SUN_FirstBus")]
    pub sun_first_bus: String,
    #[serde(rename = "SUN_LastBus")]
    pub sun_last_bus: String,
}

impl BusRoute {
    /// Natural key: service, stop and direction
    ///
    /// Loop services visit the same stop twice in one direction, so the stop
    /// sequence is appended to keep the key unique.
    pub fn id(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.service_no, self.bus_stop_code, self.direction, self.stop_sequence
        )
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValueEnvelope;
    use chrono::{Datelike, Timelike};

    const ARRIVAL_JSON: &str = r#"{
        "odata.metadata": "https://datamall2.mytransport.sg/ltaodataservice/v3/BusArrival",
        "BusStopCode": "83139",
        "Services": [{
            "ServiceNo": "15",
            "Operator": "GAS",
            "NextBus": {
                "OriginCode": "77009",
                "DestinationCode": "77009",
                "EstimatedArrival": "2024-08-14T16:41:48+08:00",
                "Monitored": 1,
                "Latitude": "1.3154918333333334",
                "Longitude": "103.9059125",
                "VisitNumber": "1",
                "Load": "SEA",
                "Feature": "WAB",
                "Type": "SD"
            },
            "NextBus2": {
                "OriginCode": "77009",
                "DestinationCode": "77009",
                "EstimatedArrival": "2024-08-14T16:49:22+08:00",
                "Monitored": 0,
                "Latitude": "0.0",
                "Longitude": "0.0",
                "VisitNumber": "1",
                "Load": "SDA",
                "Feature": "WAB",
                "Type": "DD"
            },
            "NextBus3": {
                "OriginCode": "",
                "DestinationCode": "",
                "EstimatedArrival": "",
                "Monitored": 0,
                "Latitude": "",
                "Longitude": "",
                "VisitNumber": "",
                "Load": "",
                "Feature": "",
                "Type": ""
            }
        }]
    }"#;

    #[test]
    fn decodes_bus_arrivals() {
        let arrivals: BusArrivals = serde_json::from_str(ARRIVAL_JSON).unwrap();
        assert_eq!(arrivals.bus_stop_code, "83139");
        let service = &arrivals.services[0];
        assert_eq!(service.id(), "15");
        assert_eq!(service.next_bus.kind, "SD");
        assert_eq!(service.next_bus.monitored, "1");
        assert!(service.next_bus3.is_empty());
        assert_eq!(service.upcoming().count(), 2);
    }

    #[test]
    fn estimated_arrival_parses_rfc3339() {
        let arrivals: BusArrivals = serde_json::from_str(ARRIVAL_JSON).unwrap();
        let eta = arrivals.services[0].next_bus.estimated_arrival().unwrap();
        assert_eq!(eta.day(), 14);
        assert_eq!(eta.hour(), 16);
        assert_eq!(eta.offset().local_minus_utc(), 8 * 3600);
        assert!(arrivals.services[0].next_bus3.estimated_arrival().is_none());
    }

    #[test]
    fn missing_next_bus_slots_default_to_empty() {
        let json = r#"{"BusStopCode": "01012", "Services": [{"ServiceNo": "7", "Operator": "SBST"}]}"#;
        let arrivals: BusArrivals = serde_json::from_str(json).unwrap();
        assert_eq!(arrivals.services[0].upcoming().count(), 0);
    }

    #[test]
    fn decodes_bus_route_page() {
        let json = r#"{"value": [{
            "ServiceNo": "10", "Operator": "SBST", "Direction": 1, "StopSequence": 1,
            "BusStopCode": "75009", "Distance": 0,
            "WD_FirstBus": "0500", "WD_LastBus": "2300",
            "SAT_FirstBus": "0500", "SAT_LastBus": "2300",
            "SUN_FirstBus": "0500", "SUN_LastBus": "2300"
        }]}"#;
        let page: ValueEnvelope<Vec<BusRoute>> = serde_json::from_str(json).unwrap();
        let route = &page.value[0];
        assert_eq!(route.wd_first_bus, "0500");
        assert_eq!(route.id(), "10-75009-1-1");
    }

    #[test]
    fn bus_service_direction_accepts_number() {
        let json = r#"{
            "ServiceNo": "118", "Operator": "GAS", "Direction": 1, "Category": "TRUNK",
            "OriginCode": "65009", "DestinationCode": "97009",
            "AM_Peak_Freq": "08-12", "AM_Offpeak_Freq": "08-12",
            "PM_Peak_Freq": "08-12", "PM_Offpeak_Freq": "10-12", "LoopDesc": ""
        }"#;
        let service: BusService = serde_json::from_str(json).unwrap();
        assert_eq!(service.direction, "1");
        assert_eq!(service.id(), "118-1");
        assert_eq!(service.am_peak_freq, "08-12");
    }
}
