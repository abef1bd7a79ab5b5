use super::DataMallClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::models::{
    ForecastDensity, LiftMaintenance, RealTimeDensity, TrainLine, TrainServiceAlert, ValueEnvelope,
};

/// Query parameter naming the line for crowd density endpoints
const TRAIN_LINE_PARAM: &str = "TrainLine";

fn line_query(line: TrainLine) -> [(&'static str, String); 1] {
    [(TRAIN_LINE_PARAM, line.code().to_string())]
}

impl DataMallClient {
    /// Current platform crowd level at every station of `line`
    pub async fn station_crowd_realtime(&self, line: TrainLine) -> Result<Vec<RealTimeDensity>> {
        self.fetch_list(Endpoint::StationCrowdRealTime, &line_query(line)).await
    }

    /// Crowd forecast in 30 minute intervals for every station of `line`
    pub async fn station_crowd_forecast(&self, line: TrainLine) -> Result<Vec<ForecastDensity>> {
        self.fetch_list(Endpoint::StationCrowdForecast, &line_query(line)).await
    }

    /// Train service status, with affected segments during a disruption
    pub async fn train_service_alerts(&self) -> Result<TrainServiceAlert> {
        let envelope: ValueEnvelope<TrainServiceAlert> =
            self.fetch(Endpoint::TrainServiceAlerts, &[]).await?;
        Ok(envelope.value)
    }

    /// Station lifts currently under maintenance
    pub async fn facilities_maintenance(&self) -> Result<Vec<LiftMaintenance>> {
        self.fetch_list(Endpoint::FacilitiesMaintenance, &[]).await
    }
}
