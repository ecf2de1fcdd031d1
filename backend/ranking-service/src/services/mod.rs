pub mod engagement;
pub mod feed;
pub mod profile;
pub mod source;
pub mod trending;

pub use engagement::{EngagementScorer, EngagementWeights};
pub use feed::{FeedConfig, PreferenceBlender};
pub use profile::PreferenceProfileBuilder;
pub use source::ContentSource;
pub use trending::{TrendingConfig, TrendingRanker, TrendingResponse, TrendingService, UserRankWeights};
