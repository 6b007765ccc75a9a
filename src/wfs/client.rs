use crate::types::weather_frame::DataPoint;
use crate::wfs::error::WfsError;
use crate::wfs::extractor::{extract_data_points, service_exception};
use log::{info, warn};
use reqwest::Client;

/// FMI's public open data WFS endpoint.
pub const FMI_WFS_URL: &str = "https://opendata.fmi.fi/wfs";

/// Issues WFS 2.0 `GetFeature` requests against FMI stored queries.
#[derive(Debug, Clone)]
pub struct WfsClient {
    client: Client,
    endpoint: String,
}

impl WfsClient {
    pub fn new(endpoint: impl Into<String>) -> WfsClient {
        WfsClient::with_client(Client::new(), endpoint)
    }

    /// Uses a preconfigured `reqwest::Client`, e.g. with custom timeouts or proxy settings.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> WfsClient {
        WfsClient {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs the stored query `stored_query_id` with `params` and returns the
    /// response body.
    pub async fn get_feature(
        &self,
        stored_query_id: &str,
        params: &[(String, String)],
    ) -> Result<String, WfsError> {
        let mut query: Vec<(&str, &str)> = vec![
            ("service", "WFS"),
            ("version", "2.0.0"),
            ("request", "getFeature"),
            ("storedquery_id", stored_query_id),
        ];
        query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        info!("Querying {} with {:?}", stored_query_id, params);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| WfsError::NetworkRequest(self.endpoint.clone(), e))?;

        let url = response.url().to_string();
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WfsError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WfsError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| WfsError::NetworkRequest(url.clone(), e))?;

        if let Some(message) = service_exception(&body) {
            warn!("WFS exception for {}: {}", stored_query_id, message);
            return Err(WfsError::ServiceException(message));
        }
        Ok(body)
    }

    /// Runs a simple stored query and extracts its rows.
    pub async fn query_data_points(
        &self,
        stored_query_id: &str,
        params: &[(String, String)],
    ) -> Result<Vec<DataPoint>, WfsError> {
        let xml = self.get_feature(stored_query_id, params).await?;
        extract_data_points(&xml)
    }
}

impl Default for WfsClient {
    fn default() -> Self {
        WfsClient::new(FMI_WFS_URL)
    }
}
