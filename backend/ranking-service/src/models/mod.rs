use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::RankingError;

/// Who can see a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Friends,
}

impl Visibility {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Friends => "friends",
        }
    }
}

/// Raw interaction counts for one content item, plus the engagement rate
/// stored by the analytics pipeline (may be stale).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub views: u32,
    pub likes: u32,
    pub comments: u32,
    pub reposts: u32,
    pub shares: u32,
    pub engagement_rate: f64,
}

/// A journal entry as fetched by the persistence layer.
///
/// Read-only input to the ranking core; nothing here is created or mutated
/// by scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub visibility: Visibility,
    pub hidden: bool,
    pub tags: Vec<String>,
    pub analytics: Option<EngagementCounts>,
}

impl ContentItem {
    /// Whether the item may appear in any public ranking.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Public && !self.hidden
    }
}

/// Time window for trending calculation. Items older than the window are
/// excluded from ranking entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "24h")]
    TwentyFourHours,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl TimeWindow {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OneHour => "1h",
            Self::TwentyFourHours => "24h",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }

    pub fn hours(&self) -> i64 {
        match self {
            Self::OneHour => 1,
            Self::TwentyFourHours => 24,
            Self::SevenDays => 168,
            Self::ThirtyDays => 720,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(self.hours())
    }
}

impl FromStr for TimeWindow {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Self::OneHour),
            "24h" => Ok(Self::TwentyFourHours),
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            other => Err(RankingError::InvalidTimeWindow(other.to_string())),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feed assembly strategy for the personalized feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    Following,
    Trending,
    #[default]
    Hybrid,
}

impl FeedMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Following => "following",
            Self::Trending => "trending",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for FeedMode {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "following" => Ok(Self::Following),
            "trending" => Ok(Self::Trending),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(RankingError::InvalidFeedMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for FeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A content item annotated with its trending score.
///
/// The annotation is ephemeral: computed fresh per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub trending_score: f64,
}

/// Aggregated engagement for one tag across a candidate set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagTrend {
    pub tag: String,
    pub score: f64,
    pub count: u32,
}

/// Per-user activity counts inside a lookback window, as supplied by the
/// persistence layer for user trending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserActivity {
    pub user_id: Uuid,
    pub posts: u32,
    pub likes: u32,
    pub comments: u32,
    pub reposts: u32,
    pub followers: u32,
    pub engagement_rate: f64,
}

/// A user annotated with a trending score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUser {
    #[serde(flatten)]
    pub user: UserActivity,
    pub trending_score: f64,
}

/// Derived tag preferences for one user. Never stored; rebuilt per request
/// from the user's liked, commented-on and authored items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Up to ten tags, ranked by historical frequency.
    pub top_tags: Vec<String>,
    /// Raw interaction totals, for diagnostic display only.
    pub like_count: u32,
    pub comment_count: u32,
    pub post_count: u32,
}

impl PreferenceProfile {
    pub fn is_empty(&self) -> bool {
        self.top_tags.is_empty()
    }
}
