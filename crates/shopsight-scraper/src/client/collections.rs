//! Best-effort collections fetch for `CatalogClient`.

use crate::error::FetchError;
use crate::types::{CollectionsPage, RawCollection};

use super::CatalogClient;

impl CatalogClient {
    /// Fetches the store's named collections with a single request.
    ///
    /// Collections are supplementary: any failure (non-2xx status, network
    /// error, malformed body) yields an empty list rather than an error, so
    /// they can never block catalog analysis.
    pub async fn fetch_collections(&self, origin: &str) -> Vec<RawCollection> {
        match self.try_fetch_collections(origin).await {
            Ok(collections) => collections,
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    "collections fetch failed; continuing without collections"
                );
                Vec::new()
            }
        }
    }

    async fn try_fetch_collections(&self, origin: &str) -> Result<Vec<RawCollection>, FetchError> {
        let url = Self::collections_url(origin);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<CollectionsPage>(&body).map_err(|e| FetchError::Deserialize {
                context: format!("collections from {origin}"),
                source: e,
            })?;

        Ok(parsed.collections)
    }
}
