/// Trending Service
///
/// Cached surface over the time-decay ranker. Raw rows come from the
/// injected [`ContentSource`]; ranked post responses are kept in an
/// injected [`FeedCache`] rather than any ambient module state.
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use feed_cache::FeedCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TrendingRanker;
use crate::models::{ContentItem, RankedItem, RankedUser, TagTrend, TimeWindow};
use crate::services::source::ContentSource;

const DEFAULT_CANDIDATE_LIMIT: usize = 500;

/// Trending response, ready for JSON serialization by the route layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub items: Vec<RankedItem>,
    pub count: usize,
    pub time_window: String,
    pub category: Option<String>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// Trending service
pub struct TrendingService {
    source: Arc<dyn ContentSource>,
    ranker: TrendingRanker,
    cache: Arc<FeedCache<String, TrendingResponse>>,
    candidate_limit: usize,
}

impl TrendingService {
    pub fn new(
        source: Arc<dyn ContentSource>,
        ranker: TrendingRanker,
        cache: Arc<FeedCache<String, TrendingResponse>>,
    ) -> Self {
        Self {
            source,
            ranker,
            cache,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Cap on raw rows pulled from the source per refresh.
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit;
        self
    }

    /// Get trending posts, serving from cache while the entry is fresh.
    pub async fn trending_posts(
        &self,
        window: TimeWindow,
        category: Option<&str>,
        limit: usize,
    ) -> Result<TrendingResponse> {
        let cache_key = format!(
            "trending:{}:{}:{}",
            window.as_str(),
            category.unwrap_or("all"),
            limit
        );

        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("Trending cache hit: {}", cache_key);
            return Ok(cached);
        }

        let rows = self.source.recent_items(self.candidate_limit).await?;
        let items = self.ranker.rank_posts(rows, window, limit, category);

        let response = TrendingResponse {
            count: items.len(),
            items,
            time_window: window.to_string(),
            category: category.map(String::from),
            updated_at: Utc::now(),
        };

        self.cache.insert(cache_key, response.clone());

        Ok(response)
    }

    /// Get trending tags over the window.
    pub async fn trending_tags(&self, window: TimeWindow, limit: usize) -> Result<Vec<TagTrend>> {
        let rows = self.source.recent_items(self.candidate_limit).await?;

        let cutoff = Utc::now() - window.duration();
        let windowed: Vec<ContentItem> = rows
            .into_iter()
            .filter(|item| item.created_at >= cutoff)
            .filter(ContentItem::is_visible)
            .collect();

        Ok(self.ranker.rank_tags(&windowed, limit))
    }

    /// Get trending users over the window.
    pub async fn trending_users(&self, window: TimeWindow, limit: usize) -> Result<Vec<RankedUser>> {
        let users = self.source.user_activity(window).await?;
        Ok(self.ranker.rank_users(users, limit))
    }
}
