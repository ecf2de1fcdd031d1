// ============================================
// Preference Blender (personalized feed)
// ============================================
//
// Merges two ranked candidate sets (content from followed accounts and
// globally trending content) into one deduplicated, personalized page.
//
// Hybrid candidate score:
//   + 10 per tag shared with the user's top-10 preferred tags
//   + stored engagement rate * 5 (when analytics exist)
//   + recency_decay * 20
//
// Both candidate sets are fetched from offset zero; the caller's
// offset/limit is a slice over the deduplicated, sorted blend, recomputed
// in full on every page request.

use std::collections::HashSet;

use anyhow::Result;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{ContentItem, FeedMode};
use crate::services::profile::PreferenceProfileBuilder;
use crate::services::source::ContentSource;
use crate::utils::recency_decay;

/// Configurable knobs for the hybrid blend.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Fraction of the requested limit fetched from followed accounts.
    pub following_share: f64,
    /// Fraction of the requested limit fetched from trending content.
    pub trending_share: f64,
    /// Boost per tag shared with the user's preferred tags.
    pub tag_match_boost: f64,
    /// Multiplier on the stored engagement rate.
    pub engagement_rate_boost: f64,
    /// Multiplier on the recency decay term.
    pub recency_boost: f64,
    /// Decay scale in hours for the recency term.
    pub decay_hours: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            following_share: 0.6,
            trending_share: 0.4,
            tag_match_boost: 10.0,
            engagement_rate_boost: 5.0,
            recency_boost: 20.0,
            decay_hours: 24.0,
        }
    }
}

/// Assembles the personalized feed from externally-supplied accessors.
pub struct PreferenceBlender {
    source: Arc<dyn ContentSource>,
    profile_builder: PreferenceProfileBuilder,
    config: FeedConfig,
}

impl PreferenceBlender {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            profile_builder: PreferenceProfileBuilder::new(),
            config: FeedConfig::default(),
        }
    }

    pub fn with_config(source: Arc<dyn ContentSource>, config: FeedConfig) -> Self {
        Self {
            source,
            profile_builder: PreferenceProfileBuilder::new(),
            config,
        }
    }

    /// One page of the user's feed, ordered and deduplicated.
    ///
    /// The caller validates the user identifier before invoking; source
    /// failures propagate unmodified.
    pub async fn feed(
        &self,
        user_id: Uuid,
        mode: FeedMode,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ContentItem>> {
        match mode {
            FeedMode::Following => self.following_feed(user_id, limit, offset).await,
            FeedMode::Trending => self.trending_feed(limit, offset).await,
            FeedMode::Hybrid => self.hybrid_feed(user_id, limit, offset).await,
        }
    }

    /// Newest-first items from followed accounts. A user who follows no one
    /// falls back entirely to the trending feed.
    async fn following_feed(
        &self,
        user_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ContentItem>> {
        if self.source.following_count(user_id).await? == 0 {
            warn!(%user_id, "User follows no accounts, serving trending feed");
            return self.trending_feed(limit, offset).await;
        }

        let items = self.source.following_items(user_id, offset + limit).await?;
        let items: Vec<ContentItem> = items.into_iter().filter(ContentItem::is_visible).collect();

        Ok(page(items, limit, offset))
    }

    /// Last-7-days items in the source's like-count-then-recency order.
    async fn trending_feed(&self, limit: usize, offset: usize) -> Result<Vec<ContentItem>> {
        let items = self.source.engaged_items(offset + limit).await?;
        Ok(page(items, limit, offset))
    }

    /// The hybrid blend: profile-boosted union of followed and trending
    /// candidates, sorted, deduplicated, then sliced.
    async fn hybrid_feed(
        &self,
        user_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ContentItem>> {
        let profile = self.profile_builder.build(self.source.as_ref(), user_id).await?;

        let following_limit = (limit as f64 * self.config.following_share).ceil() as usize;
        let trending_limit = (limit as f64 * self.config.trending_share).ceil() as usize;

        let mut candidates = self.source.following_items(user_id, following_limit).await?;
        let following_count = candidates.len();
        candidates.extend(self.source.engaged_items(trending_limit).await?);
        let trending_count = candidates.len() - following_count;

        let preferred: HashSet<&str> = profile.top_tags.iter().map(String::as_str).collect();
        let now = Utc::now();

        let mut scored: Vec<(ContentItem, f64)> = candidates
            .into_iter()
            .map(|item| {
                let score = self.personalization_score(&item, &preferred, now);
                (item, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Keep the first (highest-scored) occurrence of each item
        let mut seen: HashSet<Uuid> = HashSet::new();
        let deduped: Vec<ContentItem> = scored
            .into_iter()
            .filter(|(item, _)| seen.insert(item.id))
            .map(|(item, _)| item)
            .collect();

        info!(
            %user_id,
            following_count = following_count,
            trending_count = trending_count,
            blended_count = deduped.len(),
            "Hybrid feed blended"
        );

        Ok(page(deduped, limit, offset))
    }

    fn personalization_score(
        &self,
        item: &ContentItem,
        preferred: &HashSet<&str>,
        now: chrono::DateTime<Utc>,
    ) -> f64 {
        let tag_matches = item
            .tags
            .iter()
            .filter(|tag| preferred.contains(tag.as_str()))
            .count() as f64;

        let mut score = tag_matches * self.config.tag_match_boost;

        if let Some(analytics) = &item.analytics {
            score += analytics.engagement_rate * self.config.engagement_rate_boost;
        }

        score + recency_decay(item.created_at, now, self.config.decay_hours) * self.config.recency_boost
    }
}

/// Offset/limit as a pure slice over an already-ordered list.
fn page(items: Vec<ContentItem>, limit: usize, offset: usize) -> Vec<ContentItem> {
    items.into_iter().skip(offset).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngagementCounts, PreferenceProfile, Visibility};
    use chrono::Duration;

    fn item(hours_ago: i64, tags: &[&str], rate: f64) -> ContentItem {
        ContentItem {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            created_at: Utc::now() - Duration::hours(hours_ago),
            visibility: Visibility::Public,
            hidden: false,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            analytics: Some(EngagementCounts {
                engagement_rate: rate,
                ..Default::default()
            }),
        }
    }

    fn blender() -> PreferenceBlender {
        struct NoSource;

        #[async_trait::async_trait]
        impl ContentSource for NoSource {
            async fn following_items(&self, _: Uuid, _: usize) -> Result<Vec<ContentItem>> {
                Ok(vec![])
            }
            async fn engaged_items(&self, _: usize) -> Result<Vec<ContentItem>> {
                Ok(vec![])
            }
            async fn recent_items(&self, _: usize) -> Result<Vec<ContentItem>> {
                Ok(vec![])
            }
            async fn liked_items(&self, _: Uuid) -> Result<Vec<ContentItem>> {
                Ok(vec![])
            }
            async fn commented_items(&self, _: Uuid) -> Result<Vec<ContentItem>> {
                Ok(vec![])
            }
            async fn authored_items(&self, _: Uuid) -> Result<Vec<ContentItem>> {
                Ok(vec![])
            }
            async fn following_count(&self, _: Uuid) -> Result<usize> {
                Ok(0)
            }
            async fn user_activity(
                &self,
                _: crate::models::TimeWindow,
            ) -> Result<Vec<crate::models::UserActivity>> {
                Ok(vec![])
            }
        }

        PreferenceBlender::new(Arc::new(NoSource))
    }

    #[test]
    fn test_tag_overlap_boost() {
        let blender = blender();
        let profile = PreferenceProfile {
            top_tags: vec!["defi".to_string(), "base".to_string()],
            ..Default::default()
        };
        let preferred: HashSet<&str> = profile.top_tags.iter().map(String::as_str).collect();
        let now = Utc::now();

        let matching = item(0, &["defi", "base", "art"], 0.0);
        let disjoint = item(0, &["art"], 0.0);

        let matched = blender.personalization_score(&matching, &preferred, now);
        let unmatched = blender.personalization_score(&disjoint, &preferred, now);

        // Two overlapping tags at +10 each
        assert!((matched - unmatched - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_engagement_rate_boost() {
        let blender = blender();
        let preferred = HashSet::new();
        let now = Utc::now();

        let rated = item(0, &[], 2.0);
        let mut unrated = item(0, &[], 0.0);
        unrated.analytics = None;
        unrated.created_at = rated.created_at;

        let with_rate = blender.personalization_score(&rated, &preferred, now);
        let without = blender.personalization_score(&unrated, &preferred, now);

        assert!((with_rate - without - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_recency_bonus_favors_fresh_items() {
        let blender = blender();
        let preferred = HashSet::new();
        let now = Utc::now();

        let fresh = item(1, &[], 0.0);
        let old = item(40, &[], 0.0);

        let fresh_score = blender.personalization_score(&fresh, &preferred, now);
        let old_score = blender.personalization_score(&old, &preferred, now);

        assert!(fresh_score > old_score);
        // Bonus is capped at the recency weight itself
        assert!(fresh_score <= 20.0);
    }

    #[test]
    fn test_page_is_a_slice() {
        let items: Vec<ContentItem> = (0..5).map(|i| item(i, &[], 0.0)).collect();
        let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();

        let first = page(items.clone(), 2, 0);
        let second = page(items.clone(), 2, 2);
        let rest = page(items, 10, 4);

        assert_eq!(first.iter().map(|i| i.id).collect::<Vec<_>>(), &ids[0..2]);
        assert_eq!(second.iter().map(|i| i.id).collect::<Vec<_>>(), &ids[2..4]);
        assert_eq!(rest.iter().map(|i| i.id).collect::<Vec<_>>(), &ids[4..5]);
    }

    #[test]
    fn test_default_shares_cover_the_limit() {
        let config = FeedConfig::default();
        assert!((config.following_share + config.trending_share - 1.0).abs() < 1e-9);
    }
}
