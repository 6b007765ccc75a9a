//! The main entry point for fetching FMI observations and forecasts.

use crate::error::FmiError;
use crate::types::forecast_model::{forecast_end, ForecastModel};
use crate::types::location::Location;
use crate::types::parameter::{parameter_code, QueryType};
use crate::types::time_range::{current_minute, infer_time_range, DateInput};
use crate::types::weather_frame::WeatherFrame;
use crate::wfs::client::{WfsClient, FMI_WFS_URL};
use crate::wfs::pagination::fetch_chunked;
use bon::bon;
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;

/// Stored query serving hourly aggregated weather observations.
pub const OBSERVATION_QUERY_ID: &str = "fmi::observations::weather::hourly::simple";

/// Client for the FMI open data WFS service.
///
/// Every call issues fresh requests; nothing is cached between calls.
///
/// # Examples
///
/// ```no_run
/// use fmi_opendata::{Fmi, FmiError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), FmiError> {
/// let fmi = Fmi::new();
///
/// // Temperatures in Helsinki since the start of September 2022
/// let observations = fmi
///     .observations()
///     .place("Helsinki")
///     .parameter("temperature")
///     .start_date("2022-09-01")
///     .call()
///     .await?;
/// println!("{}", observations.frame);
///
/// // Wind speed forecast for Alajärvi, Möksy for the next 24 hours
/// let forecast = fmi
///     .forecast()
///     .fmisid("101533")
///     .parameter("wind_speed")
///     .hours(24)
///     .call()
///     .await?;
/// println!("{}", forecast.frame);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Fmi {
    wfs: WfsClient,
}

impl Default for Fmi {
    fn default() -> Self {
        Self::new()
    }
}

#[bon]
impl Fmi {
    /// Creates a client talking to `https://opendata.fmi.fi/wfs`.
    pub fn new() -> Self {
        Self::with_endpoint(FMI_WFS_URL)
    }

    /// Creates a client talking to another WFS endpoint serving the FMI
    /// stored queries, e.g. a mirror or a local test server.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            wfs: WfsClient::new(endpoint),
        }
    }

    /// Like [`Fmi::with_endpoint`], sending requests through `client`.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            wfs: WfsClient::with_client(client, endpoint),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.wfs.endpoint()
    }

    /// Fetches hourly observations for a place or station.
    ///
    /// # Arguments
    ///
    /// * `.place(&str)` or `.fmisid(&str)`: **exactly one is required.** A
    ///   Finnish place name, or an observation station id such as `"101799"`.
    /// * `.parameter(&str)`: **Required.** One of `temperature`,
    ///   `temperature_avg`, `temperature_max`, `temperature_min`, `humidity`,
    ///   `relative_humidity`, `wind_speed_avg`, `wind_speed_max`,
    ///   `wind_speed_min`, `wind_direction`, `rain_accumulated`,
    ///   `rain_intensity_max`, `air_pressure`.
    /// * `.hours(u32)`, `.start_date(..)`, `.end_date(..)`: one or two of
    ///   these select the time range, see [`crate::infer_time_range`]. Dates
    ///   are `NaiveDate`s or `"YYYY-MM-DD"` strings.
    ///
    /// Ranges longer than 744 hours are fetched one calendar month at a time
    /// and concatenated.
    ///
    /// # Errors
    ///
    /// Argument errors ([`FmiError::is_invalid_argument`]) are returned before
    /// any request is made. Transport, service and parse failures surface as
    /// [`FmiError::Wfs`]; no partial result is returned.
    #[builder]
    pub async fn observations(
        &self,
        place: Option<&str>,
        fmisid: Option<&str>,
        parameter: &str,
        hours: Option<u32>,
        #[builder(into)] start_date: Option<DateInput>,
        #[builder(into)] end_date: Option<DateInput>,
    ) -> Result<WeatherFrame, FmiError> {
        let location = validate_request(place, fmisid, parameter)?;
        let code = parameter_code(parameter, QueryType::Observation)?;
        let range = infer_time_range(hours, start_date, end_date, current_minute())?;
        info!("Fetching {} observations for {} over {}", parameter, location, range);

        let base_params = vec![
            location.query_pair(),
            ("parameters".to_string(), code.to_string()),
        ];
        let wfs = &self.wfs;
        let points = fetch_chunked(range, |chunk| {
            let mut params = base_params.clone();
            params.push(("starttime".to_string(), query_timestamp(chunk.start)));
            params.push(("endtime".to_string(), query_timestamp(chunk.end)));
            async move { wfs.query_data_points(OBSERVATION_QUERY_ID, &params).await }
        })
        .await?;

        WeatherFrame::from_points(&points)
    }

    /// Fetches a point forecast for a place or station.
    ///
    /// # Arguments
    ///
    /// * `.place(&str)` or `.fmisid(&str)`: **exactly one is required.**
    /// * `.parameter(&str)`: **Required.** One of `air_pressure`,
    ///   `temperature`, `humidity`, `wind_direction`, `wind_speed`.
    /// * `.model(&str)`: `"harmonie"` (default) or `"hirlam"`.
    /// * `.hours(u32)`: how far ahead to fetch. Defaults to the model's whole
    ///   lookahead, 66 hours for harmonie and 54 for hirlam.
    #[builder]
    pub async fn forecast(
        &self,
        place: Option<&str>,
        fmisid: Option<&str>,
        parameter: &str,
        model: Option<&str>,
        hours: Option<u32>,
    ) -> Result<WeatherFrame, FmiError> {
        let location = validate_request(place, fmisid, parameter)?;
        let model = model
            .map(str::parse::<ForecastModel>)
            .transpose()?
            .unwrap_or_default();
        let code = parameter_code(parameter, QueryType::Forecast)?;
        let end = forecast_end(current_minute(), model, hours)?;
        info!("Fetching {} {} forecast for {} until {}", model, parameter, location, end);

        let params = vec![
            location.query_pair(),
            ("parameters".to_string(), code.to_string()),
            ("endtime".to_string(), query_timestamp(end)),
        ];
        let points = self
            .wfs
            .query_data_points(model.stored_query_id(), &params)
            .await?;

        WeatherFrame::from_points(&points)
    }
}

/// Checks the arguments shared by observation and forecast requests.
fn validate_request(
    place: Option<&str>,
    fmisid: Option<&str>,
    parameter: &str,
) -> Result<Location, FmiError> {
    if parameter.trim().is_empty() {
        return Err(FmiError::MissingParameter);
    }
    Location::from_parts(place, fmisid)
}

fn query_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Points at a port nothing listens on; argument errors must be raised
    // before any request is attempted.
    fn offline_client() -> Fmi {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Fmi::with_client(client, "http://127.0.0.1:9/wfs")
    }

    #[test]
    fn test_validate_request() {
        assert!(matches!(
            validate_request(Some("Oulu"), None, ""),
            Err(FmiError::MissingParameter)
        ));
        assert!(matches!(
            validate_request(None, None, "temperature"),
            Err(FmiError::MissingLocation)
        ));
        assert_eq!(
            validate_request(None, Some("101799"), "temperature").unwrap(),
            Location::Fmisid("101799".to_string())
        );
    }

    #[test]
    fn test_query_timestamp_format() {
        let dt = Utc.with_ymd_and_hms(2022, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(query_timestamp(dt), "2022-09-01T00:00:00Z");
    }

    #[test]
    fn test_default_endpoint() {
        assert_eq!(Fmi::new().endpoint(), "https://opendata.fmi.fi/wfs");
    }

    #[tokio::test]
    async fn test_observation_argument_errors() {
        let fmi = offline_client();

        let err = fmi
            .observations()
            .place("Helsinki")
            .parameter("wind_speed")
            .hours(24)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::InvalidParameter { .. }));

        let err = fmi
            .observations()
            .parameter("temperature")
            .hours(24)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::MissingLocation));

        let err = fmi
            .observations()
            .fmisid("101799")
            .parameter("temperature")
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::InvalidTimeSelection(_)));

        let err = fmi
            .observations()
            .fmisid("101799")
            .parameter("temperature")
            .hours(3)
            .start_date("2022-09-01")
            .end_date("2022-09-02")
            .call()
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = fmi
            .observations()
            .fmisid("101799")
            .parameter("temperature")
            .hours(u32::MAX)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::InvalidTimeSelection(_)));
    }

    #[tokio::test]
    async fn test_forecast_argument_errors() {
        let fmi = offline_client();

        let err = fmi
            .forecast()
            .place("Oulu")
            .parameter("temperature")
            .model("ecmwf")
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::UnknownModel(m) if m == "ecmwf"));

        let err = fmi
            .forecast()
            .place("Oulu")
            .parameter("temperature_max")
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::InvalidParameter { .. }));

        let err = fmi
            .forecast()
            .place("Oulu")
            .fmisid("101799")
            .parameter("temperature")
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::AmbiguousLocation));

        let err = fmi
            .forecast()
            .place("Oulu")
            .parameter("temperature")
            .hours(u32::MAX)
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, FmiError::InvalidTimeSelection(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let err = offline_client()
            .forecast()
            .place("Oulu")
            .parameter("temperature")
            .call()
            .await
            .unwrap_err();
        assert!(!err.is_invalid_argument());
        assert!(matches!(err, FmiError::Wfs(_)));
    }
}
