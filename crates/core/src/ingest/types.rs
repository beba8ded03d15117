use serde::{Deserialize, Serialize};

/// One row of the per-city advertising export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPerformance {
    pub region: String,
    pub subregion: String,
    pub impressions: f64,
    pub spend: f64,
    pub revenue: f64,
    pub roi: f64,
}

/// One row of the weather table: a time-of-day bucket and its mean temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTemperature {
    pub bucket: String,
    pub mean_temperature: f64,
}
