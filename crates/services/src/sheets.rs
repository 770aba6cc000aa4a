use std::env;

use async_trait::async_trait;
use quiz_core::model::{Dataset, UserId};
use reqwest::Client;
use storage::{DatasetError, DatasetProvider, decode_csv};
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Location of the spreadsheet holding one worksheet per user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetsConfig {
    pub base_url: String,
    pub sheet_id: String,
}

impl SheetsConfig {
    #[must_use]
    pub fn new(sheet_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            sheet_id: sheet_id.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `QUIZ_SHEET_ID` and optional `QUIZ_SHEETS_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSheetId` when no sheet id is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None)
    }

    /// Like [`SheetsConfig::from_env`], with `sheet_id` taking precedence
    /// over `QUIZ_SHEET_ID`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSheetId` when neither names a sheet.
    pub fn from_env_with(sheet_id: Option<String>) -> Result<Self, ConfigError> {
        let sheet_id = sheet_id
            .or_else(|| env::var("QUIZ_SHEET_ID").ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSheetId)?;
        let config = Self::new(sheet_id);
        Ok(match env::var("QUIZ_SHEETS_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url.trim()),
            _ => config,
        })
    }

    /// CSV export URL of `user`'s worksheet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base url is not a valid hierarchical URL.
    pub fn csv_url(&self, user: &UserId) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ConfigError::CannotBeABase(self.base_url.clone()))?
            .pop_if_empty()
            .extend([self.sheet_id.as_str(), "gviz", "tq"]);
        url.query_pairs_mut()
            .append_pair("tqx", "out:csv")
            .append_pair("sheet", user.as_str());
        Ok(url)
    }
}

/// Loads each user's vocabulary from a worksheet's CSV export.
#[derive(Clone)]
pub struct SheetsDatasetProvider {
    client: Client,
    config: SheetsConfig,
}

impl SheetsDatasetProvider {
    #[must_use]
    pub fn new(config: SheetsConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: SheetsConfig) -> Self {
        Self { client, config }
    }
}

fn unavailable(err: impl std::fmt::Display) -> DatasetError {
    DatasetError::Unavailable(err.to_string())
}

#[async_trait]
impl DatasetProvider for SheetsDatasetProvider {
    async fn load(&self, user: &UserId) -> Result<Dataset, DatasetError> {
        let url = self.config.csv_url(user).map_err(unavailable)?;
        debug!(%user, %url, "fetching worksheet");

        let response = self.client.get(url).send().await.map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::Unavailable(format!(
                "data source responded with status {status}"
            )));
        }

        let body = response.bytes().await.map_err(unavailable)?;
        let text = std::str::from_utf8(&body)
            .map_err(|e| DatasetError::Unavailable(format!("response is not UTF-8: {e}")))?;
        decode_csv(text)
    }
}
