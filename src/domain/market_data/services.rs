use super::entities::AssetSummary;

/// Maximum number of suggestions shown in the search overlay
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// In-memory catalog search
#[derive(Debug, Clone)]
pub struct AssetSearchService {
    limit: usize,
}

impl Default for AssetSearchService {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl AssetSearchService {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Normalized form of a raw query, `None` when blank
    pub fn normalize(query: &str) -> Option<String> {
        let trimmed = query.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_lowercase()) }
    }

    /// Catalog-ordered matches on name or symbol, truncated to the limit.
    /// A blank query yields nothing.
    pub fn search(&self, assets: &[AssetSummary], query: &str) -> Vec<AssetSummary> {
        let Some(needle) = Self::normalize(query) else {
            return Vec::new();
        };
        assets
            .iter()
            .filter(|asset| asset.matches(&needle))
            .take(self.limit)
            .cloned()
            .collect()
    }
}
