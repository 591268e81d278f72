use std::sync::Arc;
use std::time::Duration;

use crate::domain::content_id::ContentId;
use crate::infrastructure::config::LocatorConfig;
use crate::infrastructure::gateway::GatewayList;
use crate::infrastructure::probe::{HttpProbe, ReachabilityProbe};

/// Resolves content references to reachable gateway URLs.
///
/// The gateway list and timeout defaults are fixed at construction; the
/// resolver holds no mutable state and can be shared freely across tasks.
pub struct GatewayResolver {
    gateways: GatewayList,
    probe_timeout: Duration,
    resolve_timeout: Duration,
    probe: Arc<dyn ReachabilityProbe>,
}

impl GatewayResolver {
    pub fn new(config: &LocatorConfig) -> Self {
        Self::with_probe(config, Arc::new(HttpProbe::new()))
    }

    /// Construct with an explicit probe implementation.
    pub fn with_probe(config: &LocatorConfig, probe: Arc<dyn ReachabilityProbe>) -> Self {
        Self {
            gateways: GatewayList::new(config.gateways.endpoints.clone()),
            probe_timeout: Duration::from_millis(config.timeouts.probe_ms),
            resolve_timeout: Duration::from_millis(config.timeouts.resolve_ms),
            probe,
        }
    }

    pub fn gateways(&self) -> &GatewayList {
        &self.gateways
    }

    /// One candidate URL per configured gateway, in priority order. Empty
    /// when no identifier can be extracted from `reference`.
    pub fn candidate_urls(&self, reference: &str) -> Vec<String> {
        match ContentId::extract(reference) {
            Some(id) => self.gateways.urls_for(&id),
            None => Vec::new(),
        }
    }

    /// The most-preferred candidate URL, without probing.
    pub fn primary_url(&self, reference: &str) -> Option<String> {
        let id = ContentId::extract(reference)?;
        self.gateways.url_for(0, &id)
    }

    /// Rewrites `reference` to a retrieval URL without any network access.
    ///
    /// References that already carry an HTTP(S) scheme pass through
    /// unchanged. When no identifier can be extracted the original string
    /// is returned as-is; the caller decides how to surface a reference it
    /// could not resolve.
    pub fn normalize(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return reference.to_owned();
        }

        self.primary_url(reference)
            .unwrap_or_else(|| reference.to_owned())
    }

    /// Probes a single URL with the configured standalone-probe timeout.
    pub async fn probe_url(&self, url: &str) -> bool {
        self.probe.probe(url, self.probe_timeout).await
    }

    pub async fn probe_url_with_timeout(&self, url: &str, timeout: Duration) -> bool {
        self.probe.probe(url, timeout).await
    }

    /// First reachable candidate URL for `reference`, using the configured
    /// per-gateway timeout.
    pub async fn resolve_working_url(&self, reference: &str) -> Option<String> {
        self.resolve_working_url_with_timeout(reference, self.resolve_timeout)
            .await
    }

    /// First reachable candidate URL for `reference`, or `None` when the
    /// reference yields no identifier or every gateway fails.
    ///
    /// Candidates are probed sequentially in gateway priority order and the
    /// first success short-circuits, so worst-case latency is
    /// `per_gateway × gateway count`.
    pub async fn resolve_working_url_with_timeout(
        &self,
        reference: &str,
        per_gateway: Duration,
    ) -> Option<String> {
        let candidates = self.candidate_urls(reference);
        if candidates.is_empty() {
            tracing::debug!("no content identifier in reference: {}", reference);
            return None;
        }

        for url in candidates {
            if self.probe.probe(&url, per_gateway).await {
                tracing::info!("resolved working gateway url: {}", url);
                return Some(url);
            }
        }

        tracing::warn!("no gateway is serving reference: {}", reference);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Probe double that records every probed URL and reports success only
    /// for a configured set.
    struct RecordingProbe {
        live: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingProbe {
        fn new(live: Vec<String>) -> Self {
            Self {
                live,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ReachabilityProbe for RecordingProbe {
        async fn probe(&self, url: &str, _timeout: Duration) -> bool {
            self.calls.lock().unwrap().push(url.to_owned());
            self.live.iter().any(|live| live == url)
        }
    }

    fn content_id() -> String {
        format!("Qm{}", "a".repeat(44))
    }

    fn test_config() -> LocatorConfig {
        LocatorConfig::from_toml_str(
            r#"
[gateways]
endpoints = [
    "https://g0.example.com/ipfs/",
    "https://g1.example.com/ipfs/",
    "https://g2.example.com/ipfs/",
    "https://g3.example.com/ipfs/",
    "https://g4.example.com/ipfs/",
]
"#,
        )
        .unwrap()
    }

    fn gateway_url(index: usize) -> String {
        format!("https://g{index}.example.com/ipfs/{}", content_id())
    }

    #[test]
    fn test_candidate_urls_cover_every_gateway_in_order() {
        let resolver = GatewayResolver::new(&test_config());
        let urls = resolver.candidate_urls(&content_id());

        assert_eq!(urls.len(), 5);
        for (i, url) in urls.iter().enumerate() {
            assert_eq!(url, &gateway_url(i));
        }
    }

    #[test]
    fn test_candidate_urls_from_scheme_prefixed_reference() {
        let resolver = GatewayResolver::new(&test_config());
        let id = format!("bafy{}", "b".repeat(55));
        let urls = resolver.candidate_urls(&format!("ipfs://{id}"));

        assert_eq!(urls.len(), 5);
        for (i, url) in urls.iter().enumerate() {
            assert_eq!(url, &format!("https://g{i}.example.com/ipfs/{id}"));
        }
    }

    #[test]
    fn test_candidate_urls_empty_for_invalid_reference() {
        let resolver = GatewayResolver::new(&test_config());
        assert!(resolver.candidate_urls("not-a-cid").is_empty());
        assert!(resolver.candidate_urls("").is_empty());
    }

    #[test]
    fn test_primary_url_uses_most_preferred_gateway() {
        let resolver = GatewayResolver::new(&test_config());
        assert_eq!(resolver.primary_url(&content_id()), Some(gateway_url(0)));

        let default_resolver = GatewayResolver::new(&LocatorConfig::default());
        assert_eq!(
            default_resolver.primary_url(&content_id()),
            Some(format!("https://ipfs.io/ipfs/{}", content_id()))
        );
    }

    #[test]
    fn test_normalize_passes_through_http_urls() {
        let resolver = GatewayResolver::new(&test_config());
        assert_eq!(
            resolver.normalize("https://example.com/cover.png"),
            "https://example.com/cover.png"
        );
        assert_eq!(
            resolver.normalize("http://example.com/cover.png"),
            "http://example.com/cover.png"
        );
    }

    #[test]
    fn test_normalize_rewrites_extractable_references() {
        let resolver = GatewayResolver::new(&test_config());
        let reference = format!("ipfs://{}", content_id());
        assert_eq!(resolver.normalize(&reference), gateway_url(0));
    }

    #[test]
    fn test_normalize_returns_original_when_extraction_fails() {
        let resolver = GatewayResolver::new(&test_config());
        assert_eq!(resolver.normalize("QmInvalid"), "QmInvalid");
        assert_eq!(resolver.normalize(""), "");
    }

    #[tokio::test]
    async fn test_resolve_returns_first_live_candidate() {
        let probe = Arc::new(RecordingProbe::new(vec![gateway_url(2), gateway_url(4)]));
        let resolver = GatewayResolver::with_probe(&test_config(), probe.clone());

        let resolved = resolver.resolve_working_url(&content_id()).await;
        assert_eq!(resolved, Some(gateway_url(2)));

        // Gateways 0-2 probed once each, in order; 3 and 4 never attempted.
        assert_eq!(
            probe.calls(),
            vec![gateway_url(0), gateway_url(1), gateway_url(2)]
        );
    }

    #[tokio::test]
    async fn test_resolve_prefers_first_gateway_when_live() {
        let probe = Arc::new(RecordingProbe::new(vec![
            gateway_url(0),
            gateway_url(1),
            gateway_url(2),
            gateway_url(3),
            gateway_url(4),
        ]));
        let resolver = GatewayResolver::with_probe(&test_config(), probe.clone());

        let resolved = resolver.resolve_working_url(&content_id()).await;
        assert_eq!(resolved, Some(gateway_url(0)));
        assert_eq!(probe.calls(), vec![gateway_url(0)]);
    }

    #[tokio::test]
    async fn test_resolve_exhausts_all_gateways_before_giving_up() {
        let probe = Arc::new(RecordingProbe::new(Vec::new()));
        let resolver = GatewayResolver::with_probe(&test_config(), probe.clone());

        let resolved = resolver.resolve_working_url(&content_id()).await;
        assert_eq!(resolved, None);

        let calls = probe.calls();
        assert_eq!(calls.len(), 5);
        for (i, url) in calls.iter().enumerate() {
            assert_eq!(url, &gateway_url(i));
        }
    }

    #[tokio::test]
    async fn test_resolve_skips_probing_for_invalid_reference() {
        let probe = Arc::new(RecordingProbe::new(vec![gateway_url(0)]));
        let resolver = GatewayResolver::with_probe(&test_config(), probe.clone());

        let resolved = resolver.resolve_working_url("not-a-cid").await;
        assert_eq!(resolved, None);
        assert!(probe.calls().is_empty());
    }
}
