use std::time::Duration;

use reqwest::Client;

/// Reachability check against a candidate URL. Implementations collapse
/// every failure mode to `false`; probing never raises to the caller.
#[async_trait::async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> bool;
}

/// HTTP liveness probe. Issues a HEAD request so no content body is
/// transferred; the timeout bounds the whole request, including connect.
pub struct HttpProbe {
    http_client: Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        Self {
            http_client: Client::builder()
                .build()
                .expect("failed to create reqwest client"),
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn probe(&self, url: &str, timeout: Duration) -> bool {
        match self.http_client.head(url).timeout(timeout).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::debug!("gateway probe got status {} from {}", resp.status(), url);
                false
            }
            Err(err) => {
                tracing::debug!("gateway probe failed for {}: {}", url, err);
                false
            }
        }
    }
}
