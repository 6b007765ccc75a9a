//! Extraction of time/value rows from FMI "simple" stored query responses.
//!
//! A simple response is a `wfs:FeatureCollection` with one `BsWfs:BsWfsElement`
//! per row. Each element carries a `gml:pos` location, a `BsWfs:Time`, a
//! `BsWfs:ParameterName` and a `BsWfs:ParameterValue`. Only the time and value
//! texts make up the table; they are collected as two streams in document
//! order and paired up positionally.

use crate::types::weather_frame::DataPoint;
use crate::wfs::error::WfsError;
use chrono::{DateTime, Utc};
use log::debug;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

pub const GML_NAMESPACE: &[u8] = b"http://www.opengis.net/gml/3.2";
pub const FMI_WFS_NAMESPACE: &[u8] = b"http://xml.fmi.fi/schema/wfs/2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Time,
    Value,
    // gml:pos and BsWfs:ParameterName repeat per row but carry no row data
    Structural,
    Other,
}

fn classify(namespace: &ResolveResult, local_name: &[u8]) -> Tag {
    match namespace {
        ResolveResult::Bound(Namespace(ns)) if *ns == GML_NAMESPACE => match local_name {
            b"pos" => Tag::Structural,
            _ => Tag::Other,
        },
        ResolveResult::Bound(Namespace(ns)) if *ns == FMI_WFS_NAMESPACE => match local_name {
            b"ParameterName" => Tag::Structural,
            b"Time" => Tag::Time,
            b"ParameterValue" => Tag::Value,
            _ => Tag::Other,
        },
        _ => Tag::Other,
    }
}

/// Collects the raw timestamp and value texts, in document order.
fn collect_streams(xml: &str) -> Result<(Vec<String>, Vec<String>), WfsError> {
    let mut reader = NsReader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut open_tags: Vec<Tag> = Vec::new();
    let mut times = Vec::new();
    let mut values = Vec::new();

    loop {
        let text = match reader.read_resolved_event_into(&mut buf)? {
            (namespace, Event::Start(e)) => {
                open_tags.push(classify(&namespace, e.local_name().as_ref()));
                None
            }
            (_, Event::End(_)) => {
                open_tags.pop();
                None
            }
            (_, Event::Text(t)) => Some(t.unescape()?.into_owned()),
            (_, Event::CData(c)) => Some(String::from_utf8_lossy(&c.into_inner()).into_owned()),
            (_, Event::Eof) => break,
            _ => None,
        };
        buf.clear();

        let Some(text) = text else { continue };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        match open_tags.last() {
            Some(Tag::Time) => times.push(text.to_string()),
            Some(Tag::Value) => values.push(text.to_string()),
            _ => {}
        }
    }

    Ok((times, values))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, WfsError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| WfsError::TimestampParse {
            text: text.to_string(),
            source,
        })
}

fn parse_value(text: &str) -> Result<f64, WfsError> {
    text.parse::<f64>().map_err(|source| WfsError::ValueParse {
        text: text.to_string(),
        source,
    })
}

/// Extracts the `(timestamp, value)` rows of a simple stored query response.
///
/// Timestamps are converted to UTC and values parsed as `f64` (FMI reports
/// missing values as `NaN`, which is kept).
///
/// # Errors
///
/// * [`WfsError::XmlParse`] for malformed XML.
/// * [`WfsError::TimestampParse`] / [`WfsError::ValueParse`] for text that
///   isn't a RFC 3339 timestamp or a number.
/// * [`WfsError::CountMismatch`] if the number of time and value elements
///   differ, since the rows could not be paired reliably.
pub fn extract_data_points(xml: &str) -> Result<Vec<DataPoint>, WfsError> {
    let (times, values) = collect_streams(xml)?;
    if times.len() != values.len() {
        return Err(WfsError::CountMismatch {
            times: times.len(),
            values: values.len(),
        });
    }

    let points = times
        .iter()
        .zip(values.iter())
        .map(|(time, value)| Ok(DataPoint::new(parse_timestamp(time)?, parse_value(value)?)))
        .collect::<Result<Vec<_>, WfsError>>()?;
    debug!("Extracted {} data points from WFS response", points.len());
    Ok(points)
}

/// Returns the exception text if `xml` is an OWS `ExceptionReport`.
pub fn service_exception(xml: &str) -> Option<String> {
    if !xml.contains("ExceptionReport") {
        return None;
    }

    let mut reader = NsReader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut in_exception_text = false;
    let mut messages: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"ExceptionText" => {
                in_exception_text = true;
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"ExceptionText" => {
                in_exception_text = false;
            }
            Ok(Event::Text(t)) if in_exception_text => {
                if let Ok(text) = t.unescape() {
                    let text = text.trim();
                    if !text.is_empty() {
                        messages.push(text.to_string());
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    if messages.is_empty() {
        Some("unknown exception".to_string())
    } else {
        Some(messages.join(" "))
    }
}
