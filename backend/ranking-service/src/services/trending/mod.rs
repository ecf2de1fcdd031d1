// ============================================
// Time-Decay Ranker
// ============================================
//
// Orders posts, tags and users inside a rolling time window.
//
// Post score: recency_decay * engagement_score
//   - decay: exp(-age_hours / 24), fresh = 1.0, 24h = 0.37, 48h = 0.14
//   - the window is a hard filter, not a soft decay: items older than the
//     requested period are never scored at all
// Tag score: running total of each owning post's engagement score
// User score: activity (posts*10 + likes + comments*2 + reposts*3)
//             + ln(followers + 1) * 10 + stored engagement rate

mod service;

pub use service::{TrendingResponse, TrendingService};

use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::models::{ContentItem, RankedItem, RankedUser, TagTrend, TimeWindow, UserActivity};
use crate::services::engagement::EngagementScorer;
use crate::utils::recency_decay;

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingConfig {
    /// Decay scale in hours; an item keeps 1/e of its weight after this age.
    pub decay_hours: f64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self { decay_hours: 24.0 }
    }
}

/// Weights for user trending.
///
/// The follower term is logarithmic so a single mega-followed account
/// cannot dominate the ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRankWeights {
    pub posts: f64,
    pub likes: f64,
    pub comments: f64,
    pub reposts: f64,
    pub follower_log_scale: f64,
}

impl Default for UserRankWeights {
    fn default() -> Self {
        Self {
            posts: 10.0,
            likes: 1.0,
            comments: 2.0,
            reposts: 3.0,
            follower_log_scale: 10.0,
        }
    }
}

/// Ranks windowed candidates by decayed engagement.
#[derive(Debug, Clone, Default)]
pub struct TrendingRanker {
    scorer: EngagementScorer,
    config: TrendingConfig,
    user_weights: UserRankWeights,
}

impl TrendingRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scorer(scorer: EngagementScorer) -> Self {
        Self {
            scorer,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: TrendingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_user_weights(mut self, weights: UserRankWeights) -> Self {
        self.user_weights = weights;
        self
    }

    /// Rank posts inside the window, highest trending score first.
    ///
    /// Items outside the window, non-public items and items missing the tag
    /// filter are dropped before scoring. Equal scores keep input order.
    /// Truncation to `limit` happens only after the full candidate set is
    /// sorted.
    pub fn rank_posts(
        &self,
        items: Vec<ContentItem>,
        window: TimeWindow,
        limit: usize,
        tag_filter: Option<&str>,
    ) -> Vec<RankedItem> {
        let now = Utc::now();
        let cutoff = now - window.duration();
        let input_count = items.len();

        let mut ranked: Vec<RankedItem> = items
            .into_iter()
            .filter(|item| item.created_at >= cutoff)
            .filter(ContentItem::is_visible)
            .filter(|item| {
                tag_filter.map_or(true, |tag| item.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            })
            .map(|item| {
                let engagement = self.scorer.score(item.analytics.as_ref());
                let decay = recency_decay(item.created_at, now, self.config.decay_hours);
                RankedItem {
                    trending_score: decay * engagement,
                    item,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.trending_score
                .partial_cmp(&a.trending_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);

        info!(
            window = %window,
            input_count = input_count,
            output_count = ranked.len(),
            "Trending post ranking completed"
        );

        ranked
    }

    /// Accumulate each co-occurring tag's owning-post engagement score
    /// across the candidate set, highest total first.
    pub fn rank_tags(&self, items: &[ContentItem], limit: usize) -> Vec<TagTrend> {
        let mut totals: HashMap<&str, (f64, u32)> = HashMap::new();

        for item in items {
            let engagement = self.scorer.score(item.analytics.as_ref());
            for tag in &item.tags {
                let entry = totals.entry(tag.as_str()).or_insert((0.0, 0));
                entry.0 += engagement;
                entry.1 += 1;
            }
        }

        let mut trends: Vec<TagTrend> = totals
            .into_iter()
            .map(|(tag, (score, count))| TagTrend {
                tag: tag.to_string(),
                score,
                count,
            })
            .collect();

        trends.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        trends.truncate(limit);

        trends
    }

    /// Rank users by windowed activity, follower reach and stored
    /// engagement rate, highest first.
    pub fn rank_users(&self, users: Vec<UserActivity>, limit: usize) -> Vec<RankedUser> {
        let w = &self.user_weights;

        let mut ranked: Vec<RankedUser> = users
            .into_iter()
            .map(|user| {
                let activity = user.posts as f64 * w.posts
                    + user.likes as f64 * w.likes
                    + user.comments as f64 * w.comments
                    + user.reposts as f64 * w.reposts;
                let follower = (user.followers as f64 + 1.0).ln() * w.follower_log_scale;
                RankedUser {
                    trending_score: activity + follower + user.engagement_rate,
                    user,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.trending_score
                .partial_cmp(&a.trending_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);

        info!(output_count = ranked.len(), "User trending ranking completed");

        ranked
    }
}
