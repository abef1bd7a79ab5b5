use super::DataMallClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::models::{BusArrivals, BusRoute, BusService, BusStop};

impl DataMallClient {
    /// Real-time arrivals at a bus stop, optionally for a single service
    ///
    /// The response is a single object, not a list, and is not paginated.
    pub async fn bus_arrivals(&self, bus_stop_code: &str, service_no: Option<&str>) -> Result<BusArrivals> {
        let mut query = vec![("BusStopCode", bus_stop_code.to_string())];
        if let Some(service_no) = service_no {
            query.push(("ServiceNo", service_no.to_string()));
        }
        self.fetch(Endpoint::BusArrival, &query).await
    }

    /// All bus services with their frequencies
    pub async fn bus_services(&self) -> Result<Vec<BusService>> {
        self.fetch_all(Endpoint::BusServices, &[]).await
    }

    /// Every stop of every bus service, in route order
    pub async fn bus_routes(&self) -> Result<Vec<BusRoute>> {
        self.fetch_all(Endpoint::BusRoutes, &[]).await
    }

    /// All bus stops
    pub async fn bus_stops(&self) -> Result<Vec<BusStop>> {
        self.fetch_all(Endpoint::BusStops, &[]).await
    }
}
