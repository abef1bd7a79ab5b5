use super::DataMallClient;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::models::{BicyclePark, CarPark, TaxiAvailability, TaxiStand};

/// Search radius in kilometres used when none is given
pub const DEFAULT_BICYCLE_PARKING_RADIUS_KM: f64 = 0.5;

impl DataMallClient {
    /// Lot availability of HDB, LTA and URA car parks
    pub async fn car_park_availability(&self) -> Result<Vec<CarPark>> {
        self.fetch_all(Endpoint::CarParkAvailability, &[]).await
    }

    /// Positions of all taxis currently available for hire
    pub async fn taxi_availability(&self) -> Result<Vec<TaxiAvailability>> {
        self.fetch_all(Endpoint::TaxiAvailability, &[]).await
    }

    /// Taxi stands and stops
    pub async fn taxi_stands(&self) -> Result<Vec<TaxiStand>> {
        self.fetch_list(Endpoint::TaxiStands, &[]).await
    }

    /// Bicycle parking within `radius_km` of a point (0.5 km if `None`)
    ///
    /// # Errors
    /// [`Error::NoApiKey`] first if unconfigured, then [`Error::InvalidUrl`]
    /// if a coordinate or the radius is not finite, or the radius is not
    /// positive.
    pub async fn bicycle_parking(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<Vec<BicyclePark>> {
        let key = self.account_key().await?;
        let radius = radius_km.unwrap_or(DEFAULT_BICYCLE_PARKING_RADIUS_KM);
        if !latitude.is_finite() || !longitude.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidUrl(format!(
                "invalid bicycle parking search: lat={latitude} long={longitude} dist={radius}"
            )));
        }

        let query = [
            ("Lat", latitude.to_string()),
            ("Long", longitude.to_string()),
            ("Dist", radius.to_string()),
        ];
        self.fetch_list_with_key(&key, Endpoint::BicycleParking, &query)
            .await
    }
}
