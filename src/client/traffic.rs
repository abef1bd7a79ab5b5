use super::DataMallClient;
use crate::dataset::DatasetFile;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::models::{
    EstimatedTravelTime, FaultyTrafficLight, RoadEvent, TrafficAdvisoryMessage, TrafficFlowRecord,
    TrafficImage, TrafficIncident, TrafficSpeedBand, ValueEnvelope,
};

impl DataMallClient {
    /// Estimated travel times along expressway segments
    pub async fn estimated_travel_times(&self) -> Result<Vec<EstimatedTravelTime>> {
        self.fetch_list(Endpoint::EstimatedTravelTimes, &[]).await
    }

    /// Traffic lights that are faulty or under scheduled maintenance
    pub async fn faulty_traffic_lights(&self) -> Result<Vec<FaultyTrafficLight>> {
        self.fetch_list(Endpoint::FaultyTrafficLights, &[]).await
    }

    /// Approved road openings
    pub async fn road_openings(&self) -> Result<Vec<RoadEvent>> {
        self.fetch_list(Endpoint::RoadOpenings, &[]).await
    }

    /// Approved road works
    pub async fn road_works(&self) -> Result<Vec<RoadEvent>> {
        self.fetch_list(Endpoint::RoadWorks, &[]).await
    }

    /// Traffic camera images; the image links expire after five minutes
    pub async fn traffic_images(&self) -> Result<Vec<TrafficImage>> {
        self.fetch_list(Endpoint::TrafficImages, &[]).await
    }

    /// Current traffic incidents
    pub async fn traffic_incidents(&self) -> Result<Vec<TrafficIncident>> {
        self.fetch_list(Endpoint::TrafficIncidents, &[]).await
    }

    /// Speed bands of every road segment
    pub async fn traffic_speed_bands(&self) -> Result<Vec<TrafficSpeedBand>> {
        self.fetch_all(Endpoint::TrafficSpeedBands, &[]).await
    }

    /// Messages currently shown on variable message signs
    pub async fn traffic_advisories(&self) -> Result<Vec<TrafficAdvisoryMessage>> {
        self.fetch_list(Endpoint::Vms, &[]).await
    }

    /// Raw hourly traffic flow dataset
    pub async fn download_traffic_flow(&self) -> Result<DatasetFile> {
        self.download_dataset(Endpoint::TrafficFlow, &[]).await
    }

    /// Hourly traffic flow dataset, decoded
    pub async fn traffic_flow(&self) -> Result<Vec<TrafficFlowRecord>> {
        let envelope: ValueEnvelope<Vec<TrafficFlowRecord>> =
            self.download_dataset_json(Endpoint::TrafficFlow, &[]).await?;
        Ok(envelope.value)
    }
}
