use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WfsError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // The service answered 2xx but the body is an OWS ExceptionReport
    #[error("WFS service returned an exception: {0}")]
    ServiceException(String),

    #[error("Failed to parse WFS response XML")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid timestamp '{text}' in WFS response")]
    TimestampParse {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid numeric value '{text}' in WFS response")]
    ValueParse {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("WFS response contains {times} timestamps but {values} values")]
    CountMismatch { times: usize, values: usize },
}
