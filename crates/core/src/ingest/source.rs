use crate::config::Settings;
use crate::ingest::error::DataUnavailable;
use crate::ingest::table::{is_blank, parse_number, Table, TableEncoding};
use crate::ingest::types::{BucketTemperature, CityPerformance};
use std::path::PathBuf;

pub const PERFORMANCE_DATASET: &str = "city_performance";
pub const WEATHER_DATASET: &str = "weather";

const COL_REGION: &[&str] = &["省", "region"];
const COL_SUBREGION: &[&str] = &["市", "subregion", "city"];
const COL_IMPRESSIONS: &[&str] = &["展现量", "impressions"];
const COL_SPEND: &[&str] = &["花费", "spend"];
const COL_REVENUE: &[&str] = &["总成交金额", "revenue"];
const COL_ROI: &[&str] = &["投入产出比", "roi"];
const COL_BUCKET: &[&str] = &["时间段", "time_bucket"];
const COL_MEAN_TEMP: &[&str] = &["平均温度均值", "mean_temperature"];

/// Where the raw datasets come from.
pub trait DataSource {
    fn load_performance(&self) -> Result<Vec<CityPerformance>, DataUnavailable>;

    fn load_environment(&self) -> Result<Vec<BucketTemperature>, DataUnavailable>;
}

#[derive(Debug, Clone)]
pub struct CsvDataSource {
    performance_path: PathBuf,
    performance_encoding: TableEncoding,
    weather_path: PathBuf,
    weather_encoding: TableEncoding,
}

impl CsvDataSource {
    pub fn new(
        performance_path: impl Into<PathBuf>,
        performance_encoding: TableEncoding,
        weather_path: impl Into<PathBuf>,
        weather_encoding: TableEncoding,
    ) -> Self {
        Self {
            performance_path: performance_path.into(),
            performance_encoding,
            weather_path: weather_path.into(),
            weather_encoding,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(
            settings.require_performance_csv()?,
            settings.performance_encoding,
            settings.require_weather_csv()?,
            settings.weather_encoding,
        ))
    }
}

impl DataSource for CsvDataSource {
    fn load_performance(&self) -> Result<Vec<CityPerformance>, DataUnavailable> {
        let table = Table::read(
            &self.performance_path,
            self.performance_encoding,
            PERFORMANCE_DATASET,
        )?;
        performance_rows(&table)
    }

    fn load_environment(&self) -> Result<Vec<BucketTemperature>, DataUnavailable> {
        let table = Table::read(&self.weather_path, self.weather_encoding, WEATHER_DATASET)?;
        weather_rows(&table)
    }
}

pub fn performance_rows(table: &Table) -> Result<Vec<CityPerformance>, DataUnavailable> {
    let ds = PERFORMANCE_DATASET;
    let region = table.column(COL_REGION, ds)?;
    let subregion = table.column(COL_SUBREGION, ds)?;
    let impressions = table.column(COL_IMPRESSIONS, ds)?;
    let spend = table.column(COL_SPEND, ds)?;
    let revenue = table.column(COL_REVENUE, ds)?;
    let roi = table.column(COL_ROI, ds)?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        out.push(CityPerformance {
            region: row[region].clone(),
            subregion: row[subregion].clone(),
            impressions: number(row, impressions, idx, ds)?,
            spend: number(row, spend, idx, ds)?,
            revenue: number(row, revenue, idx, ds)?,
            roi: ratio(row, roi, idx, ds)?,
        });
    }
    Ok(out)
}

pub fn weather_rows(table: &Table) -> Result<Vec<BucketTemperature>, DataUnavailable> {
    let ds = WEATHER_DATASET;
    let bucket = table.column(COL_BUCKET, ds)?;
    let mean_temperature = table.column(COL_MEAN_TEMP, ds)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            Ok(BucketTemperature {
                bucket: row[bucket].clone(),
                mean_temperature: number(row, mean_temperature, idx, ds)?,
            })
        })
        .collect()
}

/// Amount cells: blank means nothing was recorded and counts as zero.
fn number(row: &[String], col: usize, idx: usize, dataset: &str) -> Result<f64, DataUnavailable> {
    if is_blank(&row[col]) {
        return Ok(0.0);
    }
    parse_number(&row[col]).ok_or_else(|| {
        DataUnavailable::new(
            dataset,
            format!("row {}: not a number: {:?}", idx + 1, row[col]),
        )
    })
}

/// Ratio cells have no neutral value, so blank is rejected like garbage.
fn ratio(row: &[String], col: usize, idx: usize, dataset: &str) -> Result<f64, DataUnavailable> {
    if is_blank(&row[col]) {
        return Err(DataUnavailable::new(
            dataset,
            format!("row {}: missing ratio", idx + 1),
        ));
    }
    number(row, col, idx, dataset)
}
