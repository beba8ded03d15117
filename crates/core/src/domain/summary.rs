use serde::{Deserialize, Serialize};

/// Number of cities carried into the prompt, ranked by return-on-spend.
pub const TOP_CITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub city_count: usize,
    pub total_impressions: f64,
    pub total_spend: f64,
    pub total_revenue: f64,
    pub mean_roi: f64,
    pub top_cities: Vec<CityRoi>,
    pub temperature_buckets: Vec<TemperatureBucketStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRoi {
    pub region: String,
    pub subregion: String,
    pub roi: f64,
    pub revenue: f64,
}

/// Mean temperature statistics for one time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBucketStats {
    pub bucket: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}
