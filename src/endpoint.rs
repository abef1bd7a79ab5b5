//! DataMall endpoint catalog
//!
//! A closed set of named endpoints, each resolving to a fixed path under the
//! configured service root.

use crate::error::Result;
use url::Url;

/// A DataMall REST endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Real-time bus arrivals at a stop
    BusArrival,
    /// Bus services and their frequencies
    BusServices,
    /// Stops served by each bus service, in order
    BusRoutes,
    /// All bus stops
    BusStops,
    /// Car park lot availability
    CarParkAvailability,
    /// Expressway travel time estimates
    EstimatedTravelTimes,
    /// Faulty or under-maintenance traffic lights
    FaultyTrafficLights,
    /// Tap-in/tap-out volume by bus stop (bulk ZIP)
    PassengerVolumeByBusStop,
    /// Trips between origin/destination bus stops (bulk ZIP)
    PassengerVolumeOdBus,
    /// Trips between origin/destination train stations (bulk ZIP)
    PassengerVolumeOdTrain,
    /// Tap-in/tap-out volume by train station (bulk ZIP)
    PassengerVolumeByTrainStation,
    /// Hourly traffic flow (bulk JSON)
    TrafficFlow,
    /// Approved road openings
    RoadOpenings,
    /// Approved road works
    RoadWorks,
    /// Real-time platform crowd density per train line
    StationCrowdRealTime,
    /// Forecast platform crowd density per train line
    StationCrowdForecast,
    /// Locations of available taxis
    TaxiAvailability,
    /// Taxi stands
    TaxiStands,
    /// Train service disruption alerts
    TrainServiceAlerts,
    /// Traffic camera images
    TrafficImages,
    /// Current traffic incidents
    TrafficIncidents,
    /// Road segment speed bands
    TrafficSpeedBands,
    /// Variable message services (traffic advisories)
    Vms,
    /// Bicycle parking near a location
    BicycleParking,
    /// Station lift maintenance
    FacilitiesMaintenance,
}

impl Endpoint {
    /// Every endpoint in the catalog
    pub const ALL: [Endpoint; 25] = [
        Endpoint::BusArrival,
        Endpoint::BusServices,
        Endpoint::BusRoutes,
        Endpoint::BusStops,
        Endpoint::CarParkAvailability,
        Endpoint::EstimatedTravelTimes,
        Endpoint::FaultyTrafficLights,
        Endpoint::PassengerVolumeByBusStop,
        Endpoint::PassengerVolumeOdBus,
        Endpoint::PassengerVolumeOdTrain,
        Endpoint::PassengerVolumeByTrainStation,
        Endpoint::TrafficFlow,
        Endpoint::RoadOpenings,
        Endpoint::RoadWorks,
        Endpoint::StationCrowdRealTime,
        Endpoint::StationCrowdForecast,
        Endpoint::TaxiAvailability,
        Endpoint::TaxiStands,
        Endpoint::TrainServiceAlerts,
        Endpoint::TrafficImages,
        Endpoint::TrafficIncidents,
        Endpoint::TrafficSpeedBands,
        Endpoint::Vms,
        Endpoint::BicycleParking,
        Endpoint::FacilitiesMaintenance,
    ];

    /// Path relative to the service root
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::BusArrival => "v3/BusArrival",
            Endpoint::BusServices => "BusServices",
            Endpoint::BusRoutes => "BusRoutes",
            Endpoint::BusStops => "BusStops",
            Endpoint::CarParkAvailability => "CarParkAvailabilityv2",
            Endpoint::EstimatedTravelTimes => "EstTravelTimes",
            Endpoint::FaultyTrafficLights => "FaultyTrafficLights",
            Endpoint::PassengerVolumeByBusStop => "PV/Bus",
            Endpoint::PassengerVolumeOdBus => "PV/ODBus",
            Endpoint::PassengerVolumeOdTrain => "PV/ODTrain",
            Endpoint::PassengerVolumeByTrainStation => "PV/Train",
            Endpoint::TrafficFlow => "TrafficFlow",
            Endpoint::RoadOpenings => "RoadOpenings",
            Endpoint::RoadWorks => "RoadWorks",
            Endpoint::StationCrowdRealTime => "PCDRealTime",
            Endpoint::StationCrowdForecast => "PCDForecast",
            Endpoint::TaxiAvailability => "Taxi-Availability",
            Endpoint::TaxiStands => "TaxiStands",
            Endpoint::TrainServiceAlerts => "TrainServiceAlerts",
            Endpoint::TrafficImages => "Traffic-Imagesv2",
            Endpoint::TrafficIncidents => "TrafficIncidents",
            Endpoint::TrafficSpeedBands => "v3/TrafficSpeedBands",
            Endpoint::Vms => "VMS",
            Endpoint::BicycleParking => "BicycleParkingv2",
            Endpoint::FacilitiesMaintenance => "v2/FacilitiesMaintenance",
        }
    }

    /// Whether the endpoint answers with a signed download link instead of data
    pub fn is_bulk(&self) -> bool {
        matches!(
            self,
            Endpoint::PassengerVolumeByBusStop
                | Endpoint::PassengerVolumeOdBus
                | Endpoint::PassengerVolumeOdTrain
                | Endpoint::PassengerVolumeByTrainStation
                | Endpoint::TrafficFlow
        )
    }

    /// Whether the server pages results via `$skip`
    pub fn is_paginated(&self) -> bool {
        matches!(
            self,
            Endpoint::BusServices
                | Endpoint::BusRoutes
                | Endpoint::BusStops
                | Endpoint::CarParkAvailability
                | Endpoint::TaxiAvailability
                | Endpoint::TrafficSpeedBands
        )
    }

    /// Absolute URL of this endpoint under `base`, with `query` appended
    ///
    /// `base` must end with `/`; see `Config::base`.
    pub fn url(&self, base: &Url, query: &[(&str, String)]) -> Result<Url> {
        let mut url = base.join(self.path())?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
