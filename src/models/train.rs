use serde::{Deserialize, Serialize};

use super::string_or_number;

/// MRT and LRT lines accepted by the platform crowd density endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainLine {
    /// Circle Line
    #[serde(rename = "CCL")]
    Ccl,
    /// Circle Line Extension (BayFront, Marina Bay)
    #[serde(rename = "CEL")]
    Cel,
    /// Changi Extension (Expo, Changi Airport)
    #[serde(rename = "CGL")]
    Cgl,
    /// Downtown Line
    #[serde(rename = "DTL")]
    Dtl,
    /// East West Line
    #[serde(rename = "EWL")]
    Ewl,
    /// North East Line
    #[serde(rename = "NEL")]
    Nel,
    /// North South Line
    #[serde(rename = "NSL")]
    Nsl,
    /// Bukit Panjang LRT
    #[serde(rename = "BPL")]
    Bpl,
    /// Sengkang LRT
    #[serde(rename = "SLRT")]
    Slrt,
    /// Punggol LRT
    #[serde(rename = "PLRT")]
    Plrt,
    /// Thomson-East Coast Line
    #[serde(rename = "TEL")]
    Tel,
}

impl TrainLine {
    /// Every line, in DataMall's documented order
    pub const ALL: [TrainLine; 11] = [
        TrainLine::Ccl,
        TrainLine::Cel,
        TrainLine::Cgl,
        TrainLine::Dtl,
        TrainLine::Ewl,
        TrainLine::Nel,
        TrainLine::Nsl,
        TrainLine::Bpl,
        TrainLine::Slrt,
        TrainLine::Plrt,
        TrainLine::Tel,
    ];

    /// Code sent as the `TrainLine` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            TrainLine::Ccl => "CCL",
            TrainLine::Cel => "CEL",
            TrainLine::Cgl => "CGL",
            TrainLine::Dtl => "DTL",
            TrainLine::Ewl => "EWL",
            TrainLine::Nel => "NEL",
            TrainLine::Nsl => "NSL",
            TrainLine::Bpl => "BPL",
            TrainLine::Slrt => "SLRT",
            TrainLine::Plrt => "PLRT",
            TrainLine::Tel => "TEL",
        }
    }

    /// Human-readable line name
    pub fn name(&self) -> &'static str {
        match self {
            TrainLine::Ccl => "Circle Line",
            TrainLine::Cel => "Circle Line Extension (BayFront, Marina Bay)",
            TrainLine::Cgl => "Changi Extension (Expo, Changi Airport)",
            TrainLine::Dtl => "Downtown Line",
            TrainLine::Ewl => "East West Line",
            TrainLine::Nel => "North East Line",
            TrainLine::Nsl => "North South Line",
            TrainLine::Bpl => "Bukit Panjang LRT",
            TrainLine::Slrt => "Sengkang LRT",
            TrainLine::Plrt => "Punggol LRT",
            TrainLine::Tel => "Thomson-East Coast Line",
        }
    }
}

impl std::fmt::Display for TrainLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for TrainLine {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrainLine::ALL
            .into_iter()
            .find(|line| line.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::error::Error::InvalidUrl(format!("unknown train line {s:?}")))
    }
}

/// Train service status and any ongoing disruption
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainServiceAlert {
    /// 1 = normal service, 2 = disrupted
    pub status: u8,
    #[serde(default)]
    pub affected_segments: Vec<AffectedSegment>,
    #[serde(default)]
    pub message: Vec<AlertMessage>,
}

impl TrainServiceAlert {
    pub fn is_disrupted(&self) -> bool {
        self.status == 2
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedSegment {
    pub line: String,
    pub direction: String,
    /// Comma-separated station codes
    pub stations: String,
    pub free_public_bus: String,
    #[serde(rename = "FreeMRTShuttle")]
    pub free_mrt_shuttle: String,
    #[serde(rename = "MRTShuttleDirection")]
    pub mrt_shuttle_direction: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlertMessage {
    pub content: String,
    pub created_date: String,
}

/// Platform crowd level at a station for a 10 minute window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RealTimeDensity {
    pub station: String,
    pub start_time: String,
    pub end_time: String,
    /// l (low), m (moderate), h (high), NA
    pub crowd_level: String,
}

impl RealTimeDensity {
    pub fn id(&self) -> &str {
        &self.station
    }
}

/// Crowd forecast for one day across a line's stations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastDensity {
    pub date: String,
    #[serde(default)]
    pub stations: Vec<StationForecast>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationForecast {
    pub station: String,
    #[serde(default)]
    pub interval: Vec<ForecastInterval>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastInterval {
    pub start: String,
    pub crowd_level: String,
}

/// Lift under maintenance at a train station
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiftMaintenance {
    pub line: String,
    pub station_code: String,
    pub station_name: String,
    #[serde(rename = "LiftID", deserialize_with = "string_or_number")]
    pub lift_id: String,
    pub lift_desc: String,
}

impl LiftMaintenance {
    pub fn id(&self) -> String {
        format!("{}_{}", self.station_code, self.lift_id)
    }
}
