use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Singapore standard time, UTC+8 without daylight saving
const SINGAPORE_OFFSET_SECS: i32 = 8 * 3600;

/// Parse DataMall's `yyyy-MM-dd HH:mm:ss.S` timestamps as Singapore time
fn parse_local_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if value.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()?;
    FixedOffset::east_opt(SINGAPORE_OFFSET_SECS)?
        .from_local_datetime(&naive)
        .single()
}

/// Estimated travel time along one expressway segment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstimatedTravelTime {
    /// Expressway, e.g. "AYE"
    pub name: String,
    pub direction: u8,
    pub far_end_point: String,
    pub start_point: String,
    pub end_point: String,
    /// Minutes
    pub est_time: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FaultyTrafficLight {
    #[serde(rename = "AlarmID")]
    pub alarm_id: String,
    #[serde(rename = "NodeID")]
    pub node_id: String,
    /// 4 = blackout, 13 = flashing yellow
    #[serde(rename = "Type", deserialize_with = "string_or_number")]
    pub kind: String,
    pub start_date: String,
    /// Empty unless the fault is scheduled maintenance
    pub end_date: String,
    pub message: String,
}

impl FaultyTrafficLight {
    pub fn id(&self) -> &str {
        &self.alarm_id
    }

    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        parse_local_timestamp(&self.start_date)
    }

    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        parse_local_timestamp(&self.end_date)
    }

    /// Scheduled maintenance carries an end date; unplanned faults do not
    pub fn is_scheduled_maintenance(&self) -> bool {
        !self.end_date.is_empty()
    }
}

/// Approved road opening or road work
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoadEvent {
    #[serde(rename = "EventID")]
    pub event_id: String,
    pub start_date: String,
    pub end_date: String,
    /// Department or company performing the work
    pub svc_dept: String,
    pub road_name: String,
    pub other: String,
}

impl RoadEvent {
    pub fn id(&self) -> &str {
        &self.event_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficImage {
    #[serde(rename = "CameraID")]
    pub camera_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Signed image link, valid for five minutes
    pub image_link: String,
}

impl TrafficImage {
    pub fn id(&self) -> &str {
        &self.camera_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficIncident {
    /// Accident, Roadwork, Vehicle breakdown, Weather, ...
    #[serde(rename = "Type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub message: String,
}

impl TrafficIncident {
    /// DataMall has no incident id; type and position identify one
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.kind, self.latitude, self.longitude)
    }
}

/// Speed band of one road segment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficSpeedBand {
    #[serde(rename = "LinkID")]
    pub link_id: String,
    pub road_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub road_category: String,
    /// 1 (0-9 km/h) through 8 (70+ km/h)
    pub speed_band: u8,
    #[serde(deserialize_with = "string_or_number")]
    pub minimum_speed: String,
    #[serde(deserialize_with = "string_or_number")]
    pub maximum_speed: String,
    #[serde(deserialize_with = "string_or_number")]
    pub start_lon: String,
    #[serde(deserialize_with = "string_or_number")]
    pub start_lat: String,
    #[serde(deserialize_with = "string_or_number")]
    pub end_lon: String,
    #[serde(deserialize_with = "string_or_number")]
    pub end_lat: String,
}

impl TrafficSpeedBand {
    pub fn id(&self) -> &str {
        &self.link_id
    }
}

/// Message shown on a variable message sign
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficAdvisoryMessage {
    #[serde(rename = "EquipmentID")]
    pub equipment_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub message: String,
}

impl TrafficAdvisoryMessage {
    pub fn id(&self) -> &str {
        &self.equipment_id
    }
}

/// Hourly average traffic volume on a road link
///
/// Delivered through the bulk traffic flow dataset rather than inline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrafficFlowRecord {
    #[serde(rename = "LinkID", deserialize_with = "string_or_number")]
    pub link_id: String,
    pub date: String,
    #[serde(deserialize_with = "string_or_number")]
    pub hour_of_date: String,
    pub volume: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub start_lon: String,
    #[serde(deserialize_with = "string_or_number")]
    pub start_lat: String,
    #[serde(deserialize_with = "string_or_number")]
    pub end_lon: String,
    #[serde(deserialize_with = "string_or_number")]
    pub end_lat: String,
    pub road_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub road_cat: String,
}

impl TrafficFlowRecord {
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.link_id, self.date, self.hour_of_date)
    }
}
