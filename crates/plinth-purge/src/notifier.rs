use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PurgeConfig;
use crate::error::{Error, Result};

/// Downstream-cache notification seam.
///
/// `purge` resolves to `()` no matter what: implementations log failures
/// instead of surfacing them, so callers cannot accidentally couple
/// ingestion success to cache behavior.
pub trait Notifier: Send + Sync {
    fn purge(&self, slug: &str) -> impl Future<Output = ()> + Send;
}

/// Production notifier targeting a zone-scoped purge endpoint.
pub struct CachePurger {
    config: PurgeConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PurgeRequest {
    files: Vec<String>,
}

#[derive(Deserialize)]
struct PurgeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl CachePurger {
    pub fn new(config: PurgeConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// The externally visible URL for a slug, the unit the CDN caches by.
    pub fn artifact_url(&self, slug: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            slug
        )
    }

    async fn try_purge(&self, zone: &str, token: &str, url: &str) -> Result<()> {
        let endpoint = format!(
            "{}/zones/{}/purge_cache",
            self.config.api_base.trim_end_matches('/'),
            zone
        );
        let request = PurgeRequest {
            files: vec![url.to_owned()],
        };

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status });
        }

        let body: PurgeResponse = response.json().await?;
        if !body.success {
            return Err(Error::Rejected {
                errors: serde_json::to_string(&body.errors).unwrap_or_default(),
            });
        }

        Ok(())
    }
}

impl Notifier for CachePurger {
    async fn purge(&self, slug: &str) {
        let Some((zone, token)) = self.config.credentials() else {
            info!(slug, "cache purge skipped, credentials not configured");
            return;
        };

        let url = self.artifact_url(slug);
        match self.try_purge(zone, token, &url).await {
            Ok(()) => info!(%url, "purged upstream cache"),
            Err(err) => warn!(slug, %err, "cache purge failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_url_joins_base_and_slug() {
        let purger = CachePurger::new(PurgeConfig {
            public_base_url: "https://apps.example.com/".to_owned(),
            ..PurgeConfig::default()
        });
        assert_eq!(purger.artifact_url("demo"), "https://apps.example.com/demo");
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let request = PurgeRequest {
            files: vec!["https://apps.example.com/demo".to_owned()],
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"files":["https://apps.example.com/demo"]}"#
        );
    }

    #[test]
    fn response_success_field_is_authoritative() {
        let ok: PurgeResponse = serde_json::from_str(r#"{"success": true, "errors": []}"#).unwrap();
        assert!(ok.success);

        let rejected: PurgeResponse =
            serde_json::from_str(r#"{"success": false, "errors": [{"code": 10000}]}"#).unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.errors.len(), 1);

        // A response missing the field is not a success.
        let missing: PurgeResponse = serde_json::from_str("{}").unwrap();
        assert!(!missing.success);
    }

    #[tokio::test]
    async fn unconfigured_purge_is_a_noop() {
        let purger = CachePurger::new(PurgeConfig::default());
        purger.purge("demo").await;
    }
}
