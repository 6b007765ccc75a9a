//! A minimal HTTP server standing in for the FMI WFS endpoint.
#![allow(dead_code)]

use chrono::{DateTime, Duration, Timelike, Utc};
use fmi_opendata::Fmi;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct MockWfs {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockWfs {
    /// A client for this server that ignores any proxy configured in the environment.
    pub fn fmi(&self) -> Fmi {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Fmi::with_client(client, &self.endpoint)
    }

    /// Query parameters of every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

fn query_params(target: &str) -> HashMap<String, String> {
    reqwest::Url::parse(&format!("http://localhost{target}"))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

/// Serves every request with `respond(params) -> (status, body)`.
pub async fn serve<F>(respond: F) -> MockWfs
where
    F: Fn(&HashMap<String, String>) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let recorded = recorded.clone();
            let respond = respond.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&request).to_string();
                let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let params = query_params(&target);
                let (status, body) = respond(&params);
                recorded.lock().unwrap().push(params);

                let reason = if status == 200 { "OK" } else { "Bad Request" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: text/xml; charset=UTF-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockWfs {
        endpoint: format!("http://{addr}/wfs"),
        requests,
    }
}

pub fn simple_response(rows: &[(String, String)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:BsWfs="http://xml.fmi.fi/schema/wfs/2.0">
"#,
    );
    for (time, value) in rows {
        xml.push_str(&format!(
            r#"  <wfs:member>
    <BsWfs:BsWfsElement>
      <BsWfs:Location><gml:Point><gml:pos>60.17523 24.94459 </gml:pos></gml:Point></BsWfs:Location>
      <BsWfs:Time>{time}</BsWfs:Time>
      <BsWfs:ParameterName>TA_PT1H_AVG</BsWfs:ParameterName>
      <BsWfs:ParameterValue>{value}</BsWfs:ParameterValue>
    </BsWfs:BsWfsElement>
  </wfs:member>
"#
        ));
    }
    xml.push_str("</wfs:FeatureCollection>\n");
    xml
}

/// One row per whole hour between the request's `starttime` and `endtime`,
/// the value being the hour of day.
pub fn hourly_observations(params: &HashMap<String, String>) -> (u16, String) {
    let parse = |key: &str| {
        params
            .get(key)
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|dt| dt.with_timezone(&Utc))
    };
    let (Some(start), Some(end)) = (parse("starttime"), parse("endtime")) else {
        return (400, exception_report("Missing starttime or endtime"));
    };

    let mut rows = Vec::new();
    let mut t = start;
    while t <= end {
        rows.push((t.to_rfc3339(), format!("{}.0", t.hour())));
        t += Duration::hours(1);
    }
    (200, simple_response(&rows))
}

pub fn exception_report(message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ExceptionReport xmlns="http://www.opengis.net/ows/1.1" version="2.0.0">
  <Exception exceptionCode="OperationParsingFailed">
    <ExceptionText>{message}</ExceptionText>
  </Exception>
</ExceptionReport>
"#
    )
}
