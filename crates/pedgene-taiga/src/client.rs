//! Blocking Taiga HTTP client.
//!
//! A fetch is two requests: the datafile endpoint resolves a dataset file
//! to download URLs, then the first URL is downloaded as CSV and parsed
//! with Polars. Nothing is cached and failed requests are not retried.

use std::io::Cursor;

use pedgene_model::IndexedFrame;
use polars::prelude::*;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::TaigaConfig;
use crate::dataset::{DatasetRef, DatasetSource};
use crate::error::{FetchError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("pedgene/", env!("CARGO_PKG_VERSION"));

/// Datafile type reported for matrices.
const MATRIX_TYPE: &str = "HDF5";

/// Response of the datafile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
struct DatafileResponse {
    #[serde(default)]
    urls: Option<Vec<String>>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl DatafileResponse {
    fn is_matrix(&self) -> bool {
        self.kind.as_deref() == Some(MATRIX_TYPE)
    }
}

/// Client for the Taiga dataset service.
pub struct TaigaClient {
    client: Client,
    config: TaigaConfig,
    token: String,
}

impl TaigaClient {
    /// Create a client, resolving the API token up front.
    pub fn new(config: TaigaConfig) -> Result<Self> {
        let token = config.resolve_token()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            config,
            token,
        })
    }

    pub fn config(&self) -> &TaigaConfig {
        &self.config
    }

    /// URL of the datafile endpoint for `dataset`, requesting CSV.
    pub fn datafile_url(&self, dataset: &DatasetRef) -> Result<Url> {
        let mut params: Vec<(&str, String)> = vec![("dataset_permaname", dataset.name.clone())];
        if let Some(version) = dataset.version {
            params.push(("version", version.to_string()));
        }
        if let Some(file) = &dataset.file {
            params.push(("datafile_name", file.clone()));
        }
        params.push(("format", "csv".to_string()));

        let endpoint = format!("{}/api/datafile", self.config.api_root());
        Url::parse_with_params(&endpoint, &params)
            .map_err(|e| FetchError::Other(format!("invalid Taiga URL '{endpoint}': {e}")))
    }

    fn datafile_metadata(&self, dataset: &DatasetRef) -> Result<DatafileResponse> {
        let url = self.datafile_url(dataset)?;
        debug!(dataset = %dataset, %url, "Requesting Taiga datafile");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json")
            .send()?;
        let response = check_status(dataset, response)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn download(&self, dataset: &DatasetRef, url: &str) -> Result<Vec<u8>> {
        debug!(dataset = %dataset, url, "Downloading datafile");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()?;
        let response = check_status(dataset, response)?;
        Ok(response.bytes()?.to_vec())
    }
}

impl DatasetSource for TaigaClient {
    fn fetch(&self, dataset: &DatasetRef) -> Result<IndexedFrame> {
        let metadata = self.datafile_metadata(dataset)?;
        let Some(url) = metadata.urls.as_ref().and_then(|urls| urls.first()) else {
            let state = metadata
                .state
                .or(metadata.message)
                .unwrap_or_else(|| "unknown".to_string());
            return Err(FetchError::NotReady {
                dataset: dataset.to_string(),
                state,
            });
        };

        let bytes = self.download(dataset, url)?;
        let index_first = metadata.is_matrix() || self.config.matrix_index;
        let frame = read_csv_bytes(&dataset.to_string(), bytes, index_first)?;
        info!(
            dataset = %dataset,
            rows = frame.height(),
            columns = frame.data().width(),
            matrix = index_first,
            "Fetched dataset"
        );
        Ok(frame)
    }
}

fn check_status(dataset: &DatasetRef, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        401 | 403 => Err(FetchError::Unauthorized(dataset.to_string())),
        404 => Err(FetchError::NotFound(dataset.to_string())),
        code => {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::Status {
                status: code,
                message,
            })
        }
    }
}

/// Parse CSV bytes into a frame.
///
/// With `index_first`, the first column becomes the row index (the layout
/// of matrix files); otherwise rows are indexed by position.
pub fn read_csv_bytes(label: &str, bytes: Vec<u8>, index_first: bool) -> Result<IndexedFrame> {
    let csv_error = |message: String| FetchError::Csv {
        dataset: label.to_string(),
        message,
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| csv_error(e.to_string()))?;

    let first = df.get_column_names().first().map(|name| (*name).clone());
    match first {
        Some(name) if index_first => {
            IndexedFrame::with_index(df, name).map_err(|e| csv_error(e.to_string()))
        }
        _ => Ok(IndexedFrame::positional(df)),
    }
}
