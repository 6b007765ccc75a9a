//! Fetch weather observations and forecasts from the Finnish Meteorological
//! Institute (FMI) open data WFS service as Polars time series.

mod error;
mod fmi;
mod types;
mod wfs;

pub use error::FmiError;
pub use fmi::*;

pub use types::forecast_model::{forecast_end, ForecastModel};
pub use types::location::Location;
pub use types::parameter::{parameter_code, QueryType};
pub use types::time_range::{current_minute, infer_time_range, DateInput, TimeRange, EPOCH_FLOOR};
pub use types::weather_frame::{DataPoint, WeatherFrame, DATE_COLUMN, VALUE_COLUMN};

pub use wfs::client::{WfsClient, FMI_WFS_URL};
pub use wfs::error::WfsError;
pub use wfs::extractor::{extract_data_points, FMI_WFS_NAMESPACE, GML_NAMESPACE};
pub use wfs::pagination::{fetch_chunked, month_last_hour, plan_chunks, MAX_QUERY_HOURS};
