// Utility functions for ranking-service

use chrono::{DateTime, Utc};

/// Exponential recency decay: 1.0 at age zero, `1/e` after `decay_hours`.
///
/// Both the trending ranker and the preference blender multiply this by
/// their own weight; the decay shape itself lives only here. Timestamps in
/// the future are clamped to age zero.
pub fn recency_decay(created_at: DateTime<Utc>, now: DateTime<Utc>, decay_hours: f64) -> f64 {
    let age_seconds = (now - created_at).num_seconds().max(0) as f64;
    let age_hours = age_seconds / 3600.0;
    (-age_hours / decay_hours).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_item_has_full_weight() {
        let now = Utc::now();
        let decay = recency_decay(now, now, 24.0);
        assert!((decay - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_decay_after_one_scale() {
        let now = Utc::now();
        let decay = recency_decay(now - Duration::hours(24), now, 24.0);
        // exp(-1) ≈ 0.3679
        assert!((decay - 0.3679).abs() < 0.001);
    }

    #[test]
    fn test_decay_is_strictly_decreasing_in_age() {
        let now = Utc::now();
        let newer = recency_decay(now - Duration::hours(1), now, 24.0);
        let older = recency_decay(now - Duration::hours(23), now, 24.0);
        assert!(newer > older);
        assert!(older > 0.0);
    }

    #[test]
    fn test_future_timestamp_is_clamped() {
        let now = Utc::now();
        let decay = recency_decay(now + Duration::hours(2), now, 24.0);
        assert!((decay - 1.0).abs() < 0.001);
    }
}
