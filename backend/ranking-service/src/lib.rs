//! DailyBase ranking core
//!
//! Pure scoring and ranking logic behind the trending and personalized-feed
//! surfaces: an engagement scorer, a time-decay ranker for posts, tags and
//! users, and a preference blender that merges followed and trending content
//! into one deduplicated feed. All I/O lives behind the [`ContentSource`]
//! trait; every ranking call is a pure function of its inputs and the clock.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::RankingError;
pub use services::{
    ContentSource, EngagementScorer, EngagementWeights, FeedConfig, PreferenceBlender,
    PreferenceProfileBuilder, TrendingConfig, TrendingRanker, TrendingResponse, TrendingService,
    UserRankWeights,
};
