//! Data API response envelope and request building.
//!
//! The API returns `{ success, data: { cyclones, metadata, total_cyclones,
//! ensemble_id }, error? }`. Only the cyclone array and the status fields
//! are consumed here; metadata passes through untouched for display.

use crate::scenario::ScenarioSelection;
use crate::track::Cyclone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised on the data path (as opposed to state validation).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Network, HTTP, or parse failure fetching cyclone records.
    #[error("cyclone data fetch failed: {0}")]
    Fetch(String),
    /// The precomputed density resource is missing or malformed. The
    /// heatmap stays selected and renders nothing; there is no fallback
    /// to client-side aggregation.
    #[error("density resource unavailable: {0}")]
    DensityResourceUnavailable(String),
    /// A newer request superseded this one before it completed. Internal
    /// control flow only; never surfaced to the user.
    #[error("stale result discarded")]
    Stale,
}

/// Payload of a successful cyclone data response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycloneData {
    #[serde(default)]
    pub cyclones: Vec<Cyclone>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub total_cyclones: Option<u32>,
    #[serde(default)]
    pub ensemble_id: Option<u32>,
}

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<CycloneData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Build the cyclone data request URL for a selection.
pub fn cyclone_data_url(endpoint: &str, selection: &ScenarioSelection, use_sample: bool) -> String {
    let mut url = format!(
        "{}?action=getCycloneData&scenario={}&ensemble={}",
        endpoint,
        selection.scenario.as_str(),
        selection.ensemble
    );
    if let Some(sst) = selection.sst.filter(|_| selection.scenario.requires_sst()) {
        url.push_str(&format!("&sst={}", sst.as_str()));
    }
    if use_sample {
        url.push_str("&use_sample=1");
    }
    url
}

/// Parse a response body into cyclone data, recomputing every cyclone's
/// aggregates from its track.
pub fn parse_cyclone_response(body: &str) -> Result<CycloneData, DataError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| DataError::Fetch(format!("bad JSON: {}", e)))?;
    if !response.success {
        let message = response
            .error
            .unwrap_or_else(|| "server reported failure".to_string());
        return Err(DataError::Fetch(message));
    }
    let mut data = response.data.ok_or_else(|| {
        DataError::Fetch("success response carried no data".to_string())
    })?;
    for cyclone in &mut data.cyclones {
        cyclone.recompute_aggregates();
    }
    log::info!(
        "[TCT] api: parsed {} cyclones (reported total {:?})",
        data.cyclones.len(),
        data.total_cyclones
    );
    Ok(data)
}

/// Fetch and parse cyclone data over HTTP. Native CLI path only.
#[cfg(feature = "api")]
pub async fn fetch_cyclone_data(
    client: &reqwest::Client,
    endpoint: &str,
    selection: &ScenarioSelection,
) -> anyhow::Result<CycloneData> {
    let url = cyclone_data_url(endpoint, selection, false);
    let max_tries = 3;
    let mut backoff_millis: u64 = 1000;

    for attempt in 1..=max_tries {
        log::info!("[TCT] api: GET {} (attempt {})", url, attempt);
        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let body = response.text().await?;
                return Ok(parse_cyclone_response(&body)?);
            }
            Ok(response) => {
                log::warn!("[TCT] api: HTTP {} from {}", response.status(), url);
            }
            Err(e) => {
                log::warn!("[TCT] api: request error: {}", e);
            }
        }
        if attempt < max_tries {
            tokio::time::sleep(std::time::Duration::from_millis(backoff_millis)).await;
            backoff_millis *= 2;
        }
    }
    anyhow::bail!("giving up on {} after {} attempts", url, max_tries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Scenario, SstModel};

    #[test]
    fn test_url_for_historical_scenario() {
        let selection = ScenarioSelection {
            scenario: Scenario::Current,
            ensemble: 1,
            sst: None,
        };
        assert_eq!(
            cyclone_data_url("api/get_cyclone_data.php", &selection, false),
            "api/get_cyclone_data.php?action=getCycloneData&scenario=current&ensemble=1"
        );
    }

    #[test]
    fn test_url_includes_sst_and_sample_flag() {
        let selection = ScenarioSelection {
            scenario: Scenario::TwoK,
            ensemble: 4,
            sst: Some(SstModel::Gf),
        };
        let url = cyclone_data_url("api/get_cyclone_data.php", &selection, true);
        assert!(url.contains("scenario=2k"));
        assert!(url.contains("ensemble=4"));
        assert!(url.contains("sst=GF"));
        assert!(url.contains("use_sample=1"));
    }

    #[test]
    fn test_parse_success_response() {
        let body = r#"{
            "success": true,
            "data": {
                "cyclones": [
                    {"id": "x1", "year": 1972, "track": [
                        {"lat": 9.0, "lon": 145.0, "date": "1972-08-11",
                         "category": 3, "wind_speed": 160.0, "pressure": 950.0}
                    ]}
                ],
                "total_cyclones": 1,
                "ensemble_id": 5
            }
        }"#;
        let data = parse_cyclone_response(body).unwrap();
        assert_eq!(data.cyclones.len(), 1);
        assert_eq!(data.cyclones[0].max_category, 3);
        assert_eq!(data.total_cyclones, Some(1));
    }

    #[test]
    fn test_parse_failure_response() {
        let body = r#"{"success": false, "error": "ensemble not found"}"#;
        match parse_cyclone_response(body) {
            Err(DataError::Fetch(message)) => assert_eq!(message, "ensemble not found"),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_fetch_error() {
        assert!(matches!(
            parse_cyclone_response("<html>504</html>"),
            Err(DataError::Fetch(_))
        ));
    }
}
