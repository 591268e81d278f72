use crate::domain::content_id::ContentId;

/// Ordered, immutable list of gateway URL prefixes. Index order is fallback
/// priority: index 0 is the most preferred gateway.
#[derive(Debug, Clone)]
pub struct GatewayList {
    endpoints: Vec<String>,
}

impl GatewayList {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self { endpoints }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Retrieval URL for `id` on the gateway at `index`, or `None` when the
    /// index is out of bounds.
    pub fn url_for(&self, index: usize, id: &ContentId) -> Option<String> {
        self.endpoints
            .get(index)
            .map(|endpoint| join_endpoint(endpoint, id.as_str()))
    }

    /// One retrieval URL per gateway, in priority order.
    pub fn urls_for(&self, id: &ContentId) -> Vec<String> {
        self.endpoints
            .iter()
            .map(|endpoint| join_endpoint(endpoint, id.as_str()))
            .collect()
    }
}

// Tolerates both `…/ipfs` and `…/ipfs/` endpoint spellings.
fn join_endpoint(endpoint: &str, id: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), id)
}
