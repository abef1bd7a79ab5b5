use serde::{Deserialize, Serialize};

/// Lot availability for one car park and lot type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarPark {
    #[serde(rename = "CarParkID")]
    pub car_park_id: String,
    pub area: String,
    pub development: String,
    /// "latitude longitude" separated by a space; empty for some agencies
    pub location: String,
    pub available_lots: u32,
    /// C (cars), H (heavy vehicles), Y (motorcycles)
    pub lot_type: String,
    /// HDB, LTA or URA
    pub agency: String,
}

impl CarPark {
    /// Availability is reported per lot type, so the id carries both
    pub fn id(&self) -> String {
        format!("{}_{}", self.car_park_id, self.lot_type)
    }
}

/// Position of one available taxi
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxiAvailability {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxiStand {
    pub taxi_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Barrier-free accessibility, "Yes" or "No"
    pub bfa: String,
    pub ownership: String,
    /// Stand or Stop
    #[serde(rename = "Type")]
    pub kind: String,
    pub name: String,
}

impl TaxiStand {
    pub fn id(&self) -> &str {
        &self.taxi_code
    }
}

/// Bicycle parking rack cluster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BicyclePark {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rack_type: String,
    pub rack_count: u32,
    /// "Y" when sheltered
    pub shelter_indicator: String,
}

impl BicyclePark {
    /// Description alone is not unique across the island
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.description, self.latitude, self.longitude)
    }

    pub fn is_sheltered(&self) -> bool {
        self.shelter_indicator.eq_ignore_ascii_case("y")
    }
}
