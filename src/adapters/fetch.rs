use crate::domain::model::CalendarSource;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Loads raw calendar bytes. The HTTP client is owned here, never global;
/// pass a clone of an existing [`Client`] to share its connection pool.
#[derive(Debug, Clone)]
pub struct CalendarFetcher {
    client: Client,
    timeout: Duration,
}

impl Default for CalendarFetcher {
    fn default() -> Self {
        Self::new(Client::new(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl CalendarFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn fetch(&self, source: &CalendarSource) -> Result<Vec<u8>> {
        match source {
            CalendarSource::File(path) => {
                tracing::debug!("Reading calendar file: {}", path);
                Ok(tokio::fs::read(path).await?)
            }
            CalendarSource::Url(url) => self.fetch_url(url).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Requesting calendar from: {}", url);
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        tracing::debug!("Calendar response status: {}", response.status());
        let body = response.error_for_status()?.bytes().await?;
        Ok(body.to_vec())
    }
}
