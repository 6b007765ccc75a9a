//! Translation of user-facing parameter names into FMI parameter codes.

use crate::error::FmiError;
use std::fmt;
use std::str::FromStr;

/// The category of a stored query. Observation and forecast queries use
/// different parameter vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Observation,
    Forecast,
}

impl QueryType {
    fn as_str(&self) -> &'static str {
        match self {
            QueryType::Observation => "observation",
            QueryType::Forecast => "forecast",
        }
    }

    /// All parameter names accepted for this query type.
    pub fn valid_parameters(&self) -> &'static [&'static str] {
        match self {
            QueryType::Observation => OBSERVATION_PARAMETERS,
            QueryType::Forecast => FORECAST_PARAMETERS,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = FmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "observation" => Ok(QueryType::Observation),
            "forecast" => Ok(QueryType::Forecast),
            other => Err(FmiError::UnknownQueryType(other.to_string())),
        }
    }
}

const OBSERVATION_PARAMETERS: &[&str] = &[
    "temperature",
    "temperature_avg",
    "temperature_max",
    "temperature_min",
    "humidity",
    "relative_humidity",
    "wind_speed_avg",
    "wind_speed_max",
    "wind_speed_min",
    "wind_direction",
    "rain_accumulated",
    "rain_intensity_max",
    "air_pressure",
];

const FORECAST_PARAMETERS: &[&str] = &[
    "air_pressure",
    "temperature",
    "humidity",
    "wind_direction",
    "wind_speed",
];

/// Returns the FMI code of `name` for the given query type.
///
/// Observation codes are hourly aggregates (`TA_PT1H_AVG` and friends),
/// forecast codes are the descriptive names used by the forecast models.
///
/// # Errors
///
/// Returns [`FmiError::InvalidParameter`] if `name` is not one of
/// [`QueryType::valid_parameters`].
///
/// # Examples
///
/// ```
/// use fmi_opendata::{parameter_code, QueryType};
///
/// assert_eq!(parameter_code("temperature", QueryType::Observation).unwrap(), "TA_PT1H_AVG");
/// assert_eq!(parameter_code("wind_speed", QueryType::Forecast).unwrap(), "WindSpeedMS");
/// assert!(parameter_code("wind_speed", QueryType::Observation).is_err());
/// ```
pub fn parameter_code(name: &str, query_type: QueryType) -> Result<&'static str, FmiError> {
    let code = match query_type {
        QueryType::Observation => match name {
            "temperature" | "temperature_avg" => Some("TA_PT1H_AVG"),
            "temperature_max" => Some("TA_PT1H_MAX"),
            "temperature_min" => Some("TA_PT1H_MIN"),
            "humidity" | "relative_humidity" => Some("RH_PT1H_AVG"),
            "wind_speed_avg" => Some("WS_PT1H_AVG"),
            "wind_speed_max" => Some("WS_PT1H_MAX"),
            "wind_speed_min" => Some("WS_PT1H_MIN"),
            "wind_direction" => Some("WD_PT1H_AVG"),
            "rain_accumulated" => Some("PRA_PT1H_ACC"),
            "rain_intensity_max" => Some("PRI_PT1H_MAX"),
            "air_pressure" => Some("PA_PT1H_AVG"),
            _ => None,
        },
        QueryType::Forecast => match name {
            "air_pressure" => Some("Pressure"),
            "temperature" => Some("Temperature"),
            "humidity" => Some("Humidity"),
            "wind_direction" => Some("WindDirection"),
            "wind_speed" => Some("WindSpeedMS"),
            _ => None,
        },
    };

    code.ok_or_else(|| FmiError::InvalidParameter {
        name: name.to_string(),
        query_type,
        valid: query_type.valid_parameters(),
    })
}
