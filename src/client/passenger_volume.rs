//! Monthly passenger volume datasets
//!
//! Each call downloads a ZIP archive holding one CSV. Without a month
//! DataMall serves the latest available one; up to the last three months can
//! be requested explicitly.

use super::DataMallClient;
use crate::dataset::DatasetFile;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

/// Query parameter selecting the dataset month
const DATE_PARAM: &str = "Date";

/// Validate a `YYYYMM` month and build the query for it
fn month_query(month: &str) -> Result<[(&'static str, String); 1]> {
    let valid = month.len() == 6
        && month.bytes().all(|b| b.is_ascii_digit())
        && matches!(month[4..].parse::<u8>(), Ok(1..=12));
    if !valid {
        return Err(Error::InvalidUrl(format!(
            "month must be YYYYMM, got {month:?}"
        )));
    }
    Ok([(DATE_PARAM, month.to_string())])
}

impl DataMallClient {
    async fn download_dataset_for_month(&self, endpoint: Endpoint, month: &str) -> Result<DatasetFile> {
        let key = self.account_key().await?;
        let query = month_query(month)?;
        self.download_dataset_with_key(&key, endpoint, &query).await
    }

    /// Tap-in and tap-out volume per bus stop, latest month
    pub async fn download_passenger_volume_by_bus_stop(&self) -> Result<DatasetFile> {
        self.download_dataset(Endpoint::PassengerVolumeByBusStop, &[]).await
    }

    /// Tap-in and tap-out volume per bus stop for `month` (`YYYYMM`)
    pub async fn download_passenger_volume_by_bus_stop_for_month(&self, month: &str) -> Result<DatasetFile> {
        self.download_dataset_for_month(Endpoint::PassengerVolumeByBusStop, month).await
    }

    /// Trips between origin and destination bus stops, latest month
    pub async fn download_passenger_volume_od_bus(&self) -> Result<DatasetFile> {
        self.download_dataset(Endpoint::PassengerVolumeOdBus, &[]).await
    }

    /// Trips between origin and destination bus stops for `month` (`YYYYMM`)
    pub async fn download_passenger_volume_od_bus_for_month(&self, month: &str) -> Result<DatasetFile> {
        self.download_dataset_for_month(Endpoint::PassengerVolumeOdBus, month).await
    }

    /// Trips between origin and destination train stations, latest month
    pub async fn download_passenger_volume_od_train(&self) -> Result<DatasetFile> {
        self.download_dataset(Endpoint::PassengerVolumeOdTrain, &[]).await
    }

    /// Trips between origin and destination train stations for `month` (`YYYYMM`)
    pub async fn download_passenger_volume_od_train_for_month(&self, month: &str) -> Result<DatasetFile> {
        self.download_dataset_for_month(Endpoint::PassengerVolumeOdTrain, month).await
    }

    /// Tap-in and tap-out volume per train station, latest month
    pub async fn download_passenger_volume_by_train_station(&self) -> Result<DatasetFile> {
        self.download_dataset(Endpoint::PassengerVolumeByTrainStation, &[])
            .await
    }

    /// Tap-in and tap-out volume per train station for `month` (`YYYYMM`)
    pub async fn download_passenger_volume_by_train_station_for_month(
        &self,
        month: &str,
    ) -> Result<DatasetFile> {
        self.download_dataset_for_month(Endpoint::PassengerVolumeByTrainStation, month).await
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_yyyymm() {
        assert_eq!(month_query("202406").unwrap()[0].1, "202406");
        assert!(month_query("202412").is_ok());
    }

    #[test]
    fn rejects_malformed_months() {
        for bad in ["2024-06", "20246", "202413", "202400", "abcdef", ""] {
            assert!(month_query(bad).is_err(), "{bad} should be rejected");
        }
    }
}
