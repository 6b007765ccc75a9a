//! The tabular result of an observation or forecast query.

use crate::error::FmiError;
use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the UTC timestamp column.
pub const DATE_COLUMN: &str = "date";
/// Name of the measured or forecast value column.
pub const VALUE_COLUMN: &str = "value";

/// A single timestamped value as returned by FMI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A wrapper around a Polars `DataFrame` holding one FMI time series.
///
/// The frame has two columns:
///
/// * `date`: `Datetime(Milliseconds, "UTC")`
/// * `value`: `Float64`
///
/// Rows keep the order in which FMI returned them. For chunked observation
/// queries the chunks are appended chronologically.
#[derive(Debug, Clone)]
pub struct WeatherFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl WeatherFrame {
    /// Wraps an existing frame, assumed to follow the `date`/`value` schema.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Builds the frame from extracted data points.
    pub fn from_points(points: &[DataPoint]) -> Result<Self, FmiError> {
        let millis: Vec<i64> = points
            .iter()
            .map(|p| p.timestamp.timestamp_millis())
            .collect();
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();

        let date = Series::new(DATE_COLUMN.into(), millis).cast(&DataType::Datetime(
            TimeUnit::Milliseconds,
            Some("UTC".into()),
        ))?;
        let value = Series::new(VALUE_COLUMN.into(), values);

        Ok(Self::new(DataFrame::new(vec![date.into(), value.into()])?))
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Collects the frame back into typed rows. Rows with a null timestamp
    /// or value are skipped.
    pub fn data_points(&self) -> Result<Vec<DataPoint>, FmiError> {
        let millis = self.frame.column(DATE_COLUMN)?.cast(&DataType::Int64)?;
        let values = self.frame.column(VALUE_COLUMN)?;

        Ok(millis
            .i64()?
            .into_iter()
            .zip(values.f64()?.into_iter())
            .filter_map(|(ms, value)| {
                let timestamp = DateTime::from_timestamp_millis(ms?)?;
                Some(DataPoint::new(timestamp, value?))
            })
            .collect())
    }

    /// Keeps only the rows with `start <= date <= end`.
    pub fn get_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<WeatherFrame, FmiError> {
        let epoch_ms = col(DATE_COLUMN).dt().timestamp(TimeUnit::Milliseconds);
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(
                epoch_ms
                    .clone()
                    .gt_eq(lit(start.timestamp_millis()))
                    .and(epoch_ms.lt_eq(lit(end.timestamp_millis()))),
            )
            .collect()?;
        Ok(WeatherFrame::new(frame))
    }
}
