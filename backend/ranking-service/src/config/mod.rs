use serde::Deserialize;
use std::env;

use crate::services::engagement::EngagementWeights;
use crate::services::feed::FeedConfig;
use crate::services::trending::{TrendingConfig, UserRankWeights};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub engagement: EngagementWeights,
    pub trending: TrendingConfig,
    pub user_rank: UserRankWeights,
    pub feed: FeedConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub trending_ttl_secs: u64,
    pub candidate_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            trending_ttl_secs: 300, // 5 minutes
            candidate_limit: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        let decay_hours: f64 = env::var("TRENDING_DECAY_HOURS")
            .unwrap_or_else(|_| "24.0".to_string())
            .parse()
            .expect("TRENDING_DECAY_HOURS must be a valid f64");

        Ok(Config {
            engagement: EngagementWeights {
                likes: env::var("ENGAGEMENT_LIKE_WEIGHT")
                    .unwrap_or_else(|_| "1.0".to_string())
                    .parse()
                    .expect("ENGAGEMENT_LIKE_WEIGHT must be a valid f64"),
                comments: env::var("ENGAGEMENT_COMMENT_WEIGHT")
                    .unwrap_or_else(|_| "2.0".to_string())
                    .parse()
                    .expect("ENGAGEMENT_COMMENT_WEIGHT must be a valid f64"),
                reposts: env::var("ENGAGEMENT_REPOST_WEIGHT")
                    .unwrap_or_else(|_| "3.0".to_string())
                    .parse()
                    .expect("ENGAGEMENT_REPOST_WEIGHT must be a valid f64"),
                shares: env::var("ENGAGEMENT_SHARE_WEIGHT")
                    .unwrap_or_else(|_| "2.0".to_string())
                    .parse()
                    .expect("ENGAGEMENT_SHARE_WEIGHT must be a valid f64"),
            },
            trending: TrendingConfig { decay_hours },
            user_rank: UserRankWeights::default(),
            feed: FeedConfig {
                following_share: env::var("FEED_FOLLOWING_SHARE")
                    .unwrap_or_else(|_| "0.6".to_string())
                    .parse()
                    .expect("FEED_FOLLOWING_SHARE must be a valid f64"),
                trending_share: env::var("FEED_TRENDING_SHARE")
                    .unwrap_or_else(|_| "0.4".to_string())
                    .parse()
                    .expect("FEED_TRENDING_SHARE must be a valid f64"),
                tag_match_boost: env::var("FEED_TAG_MATCH_BOOST")
                    .unwrap_or_else(|_| "10.0".to_string())
                    .parse()
                    .expect("FEED_TAG_MATCH_BOOST must be a valid f64"),
                engagement_rate_boost: env::var("FEED_ENGAGEMENT_RATE_BOOST")
                    .unwrap_or_else(|_| "5.0".to_string())
                    .parse()
                    .expect("FEED_ENGAGEMENT_RATE_BOOST must be a valid f64"),
                recency_boost: env::var("FEED_RECENCY_BOOST")
                    .unwrap_or_else(|_| "20.0".to_string())
                    .parse()
                    .expect("FEED_RECENCY_BOOST must be a valid f64"),
                decay_hours,
            },
            cache: CacheConfig {
                trending_ttl_secs: env::var("TRENDING_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .expect("TRENDING_CACHE_TTL_SECS must be a valid u64"),
                candidate_limit: env::var("TRENDING_CANDIDATE_LIMIT")
                    .unwrap_or_else(|_| "500".to_string())
                    .parse()
                    .expect("TRENDING_CANDIDATE_LIMIT must be a valid usize"),
            },
        })
    }
}
