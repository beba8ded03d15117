use crate::domain::progress::round1;
use crate::domain::summary::{CityRoi, PerformanceSummary, TemperatureBucketStats, TOP_CITY_LIMIT};
use crate::ingest::error::DataUnavailable;
use crate::ingest::source::{DataSource, PERFORMANCE_DATASET};
use crate::ingest::types::{BucketTemperature, CityPerformance};

/// Loads both datasets and reduces them. Either dataset failing fails the whole run.
pub fn load_summary(source: &dyn DataSource) -> Result<PerformanceSummary, DataUnavailable> {
    let performance = source.load_performance()?;
    let environment = source.load_environment()?;
    let summary = summarize(&performance, &environment)?;

    tracing::info!(
        city_count = summary.city_count,
        total_spend = summary.total_spend,
        mean_roi = summary.mean_roi,
        buckets = summary.temperature_buckets.len(),
        "aggregated performance data"
    );
    Ok(summary)
}

pub fn summarize(
    performance: &[CityPerformance],
    environment: &[BucketTemperature],
) -> Result<PerformanceSummary, DataUnavailable> {
    if performance.is_empty() {
        return Err(DataUnavailable::new(PERFORMANCE_DATASET, "no rows"));
    }

    let city_count = performance.len();
    let total_impressions = performance.iter().map(|r| r.impressions).sum();
    let total_spend = performance.iter().map(|r| r.spend).sum();
    let total_revenue = performance.iter().map(|r| r.revenue).sum();
    let mean_roi = performance.iter().map(|r| r.roi).sum::<f64>() / city_count as f64;

    Ok(PerformanceSummary {
        city_count,
        total_impressions,
        total_spend,
        total_revenue,
        mean_roi,
        top_cities: top_cities(performance, TOP_CITY_LIMIT),
        temperature_buckets: bucket_stats(environment),
    })
}

/// Highest return-on-spend first; `sort_by` is stable so ties keep input order.
fn top_cities(performance: &[CityPerformance], limit: usize) -> Vec<CityRoi> {
    let mut ranked: Vec<&CityPerformance> = performance.iter().collect();
    ranked.sort_by(|a, b| b.roi.total_cmp(&a.roi));
    ranked
        .into_iter()
        .take(limit)
        .map(|r| CityRoi {
            region: r.region.clone(),
            subregion: r.subregion.clone(),
            roi: r.roi,
            revenue: r.revenue,
        })
        .collect()
}

fn bucket_stats(environment: &[BucketTemperature]) -> Vec<TemperatureBucketStats> {
    // (bucket, sum, count, min, max) in first-appearance order.
    let mut acc: Vec<(String, f64, usize, f64, f64)> = Vec::new();
    for row in environment {
        let t = row.mean_temperature;
        match acc.iter_mut().find(|(b, ..)| *b == row.bucket) {
            Some((_, sum, n, min, max)) => {
                *sum += t;
                *n += 1;
                *min = min.min(t);
                *max = max.max(t);
            }
            None => acc.push((row.bucket.clone(), t, 1, t, t)),
        }
    }

    acc.into_iter()
        .map(|(bucket, sum, n, min, max)| TemperatureBucketStats {
            bucket,
            mean: round1(sum / n as f64),
            min: round1(min),
            max: round1(max),
        })
        .collect()
}
