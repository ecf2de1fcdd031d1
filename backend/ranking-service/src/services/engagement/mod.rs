use serde::Deserialize;
use tracing::debug;

use crate::models::EngagementCounts;

/// Configurable weights for the engagement score.
///
/// Comments and shares signal more effort than passive likes; a repost is
/// the strongest endorsement and carries the highest multiplier.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementWeights {
    pub likes: f64,
    pub comments: f64,
    pub reposts: f64,
    pub shares: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            likes: 1.0,
            comments: 2.0,
            reposts: 3.0,
            shares: 2.0,
        }
    }
}

/// Converts raw interaction counts into a single view-normalized score.
#[derive(Debug, Clone, Default)]
pub struct EngagementScorer {
    weights: EngagementWeights,
}

impl EngagementScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: EngagementWeights) -> Self {
        Self { weights }
    }

    /// Weighted interaction sum per hundred views.
    ///
    /// Absent counts score zero rather than erroring; the view divisor is
    /// floored at one. Always total and finite.
    pub fn score(&self, counts: Option<&EngagementCounts>) -> f64 {
        let Some(counts) = counts else {
            return 0.0;
        };

        let weighted = counts.likes as f64 * self.weights.likes
            + counts.comments as f64 * self.weights.comments
            + counts.reposts as f64 * self.weights.reposts
            + counts.shares as f64 * self.weights.shares;
        let views = counts.views.max(1) as f64;

        let score = weighted / views * 100.0;

        debug!(
            likes = counts.likes,
            comments = counts.comments,
            reposts = counts.reposts,
            shares = counts.shares,
            views = counts.views,
            score = score,
            "Engagement score computed"
        );

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(views: u32, likes: u32, comments: u32, reposts: u32, shares: u32) -> EngagementCounts {
        EngagementCounts {
            views,
            likes,
            comments,
            reposts,
            shares,
            engagement_rate: 0.0,
        }
    }

    #[test]
    fn test_absent_counts_score_zero() {
        let scorer = EngagementScorer::new();
        assert_eq!(scorer.score(None), 0.0);
    }

    #[test]
    fn test_weighted_sum_per_hundred_views() {
        let scorer = EngagementScorer::new();

        // (2*1 + 1*2 + 1*3 + 1*2) / 10 * 100 = 90
        let score = scorer.score(Some(&counts(10, 2, 1, 1, 1)));
        assert!((score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_monotonic_in_reposts() {
        let scorer = EngagementScorer::new();

        let base = scorer.score(Some(&counts(100, 5, 0, 0, 0)));
        let with_repost = scorer.score(Some(&counts(100, 5, 0, 1, 0)));
        assert!(with_repost > base);

        // A repost moves the score three times as far as a like
        let one_like = scorer.score(Some(&counts(100, 6, 0, 0, 0)));
        let repost_delta = with_repost - base;
        let like_delta = one_like - base;
        assert!((repost_delta - 3.0 * like_delta).abs() < 1e-9);
        assert!(with_repost > one_like);
    }

    #[test]
    fn test_zero_views_floored_to_one() {
        let scorer = EngagementScorer::new();

        let zero_views = scorer.score(Some(&counts(0, 3, 2, 1, 0)));
        let one_view = scorer.score(Some(&counts(1, 3, 2, 1, 0)));
        assert_eq!(zero_views, one_view);
        assert!(zero_views.is_finite());
    }

    #[test]
    fn test_zero_interactions_score_zero() {
        let scorer = EngagementScorer::new();
        assert_eq!(scorer.score(Some(&counts(500, 0, 0, 0, 0))), 0.0);
    }
}
