//! OSRM HTTP adapter for road distance matrices.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::matrix::DistanceMatrix;
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// `table` service URL asking for distances between all locations.
    pub fn table_url(&self, locations: &[Location]) -> String {
        // OSRM takes lng,lat pairs.
        let coords = locations
            .iter()
            .map(|location| format!("{:.6},{:.6}", location.lng, location.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix> {
        if locations.is_empty() {
            return DistanceMatrix::from_rows(Vec::new());
        }

        let body = self
            .client
            .get(self.table_url(locations))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())?;

        debug!(locations = locations.len(), code = %body.code, "OSRM table response");
        table_to_matrix(body, locations.len())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

/// Convert a table response in meters to a symmetric km matrix.
///
/// Road distances differ slightly per direction; each pair is averaged so the
/// solvers see one undirected weight.
pub(crate) fn table_to_matrix(body: OsrmTableResponse, size: usize) -> Result<DistanceMatrix> {
    if body.code != "Ok" {
        return Err(Error::provider(format!(
            "OSRM returned {}: {}",
            body.code,
            body.message.unwrap_or_default()
        )));
    }

    let distances = body
        .distances
        .ok_or_else(|| Error::provider("OSRM response has no distances"))?;
    if distances.len() != size || distances.iter().any(|row| row.len() != size) {
        return Err(Error::provider(format!(
            "OSRM table is not {}x{}",
            size, size
        )));
    }

    let mut rows = vec![vec![0.0; size]; size];
    for i in 0..size {
        for j in (i + 1)..size {
            let (forward, backward) = match (distances[i][j], distances[j][i]) {
                (Some(forward), Some(backward)) => (forward, backward),
                _ => {
                    return Err(Error::DistanceComputation {
                        from: i,
                        to: j,
                        reason: "no route between locations".to_string(),
                    });
                }
            };
            let km = (forward + backward) / 2.0 / 1000.0;
            rows[i][j] = km;
            rows[j][i] = km;
        }
    }

    DistanceMatrix::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OsrmTableResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmConfig::default()).unwrap();
        let url = client.table_url(&[Location::new(36.1, -115.1), Location::new(36.2, -115.2)]);
        assert_eq!(
            url,
            "http://localhost:5000/table/v1/car/-115.100000,36.100000;-115.200000,36.200000?annotations=distance"
        );
    }

    #[test]
    fn meters_become_symmetric_kilometers() {
        let body = parse(r#"{"code":"Ok","distances":[[0,1000],[3000,0]]}"#);
        let matrix = table_to_matrix(body, 2).unwrap();
        assert_eq!(matrix.get(0, 1), 2.0);
        assert_eq!(matrix.get(1, 0), 2.0);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn unroutable_pair_is_reported() {
        let body = parse(r#"{"code":"Ok","distances":[[0,null],[null,0]]}"#);
        let err = table_to_matrix(body, 2).unwrap_err();
        assert!(matches!(err, Error::DistanceComputation { from: 0, to: 1, .. }));
    }

    #[test]
    fn error_code_is_reported() {
        let body = parse(r#"{"code":"InvalidQuery","message":"Query string malformed"}"#);
        match table_to_matrix(body, 2) {
            Err(Error::DistanceProvider(message)) => assert!(message.contains("InvalidQuery")),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_shape_is_reported() {
        let body = parse(r#"{"code":"Ok","distances":[[0,1,2],[1,0,2]]}"#);
        assert!(matches!(table_to_matrix(body, 2), Err(Error::DistanceProvider(_))));
    }
}
