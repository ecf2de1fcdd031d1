// ============================================
// Preference Profile Builder
// ============================================
//
// Derives a user's tag preferences from engagement history:
// tag frequency across liked, commented-on and authored items,
// top N kept. The profile is rebuilt per request and never stored.

use std::collections::HashMap;

use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use crate::models::{ContentItem, PreferenceProfile};
use crate::services::source::ContentSource;

const DEFAULT_MAX_TAGS: usize = 10;

pub struct PreferenceProfileBuilder {
    max_tags: usize,
}

impl Default for PreferenceProfileBuilder {
    fn default() -> Self {
        Self {
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}

impl PreferenceProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tags(max_tags: usize) -> Self {
        Self { max_tags }
    }

    /// Fetch the user's history through the source and derive the profile.
    ///
    /// A user with no history yields an empty profile; that is not an error.
    pub async fn build(
        &self,
        source: &dyn ContentSource,
        user_id: Uuid,
    ) -> Result<PreferenceProfile> {
        let liked = source.liked_items(user_id).await?;
        let commented = source.commented_items(user_id).await?;
        let authored = source.authored_items(user_id).await?;

        Ok(self.build_from_history(&liked, &commented, &authored))
    }

    /// Derive the profile from already-fetched history.
    ///
    /// Tags are ranked by raw frequency across all three lists; ties keep
    /// the order produced by the count sort. Raw totals ride along for
    /// diagnostic display.
    pub fn build_from_history(
        &self,
        liked: &[ContentItem],
        commented: &[ContentItem],
        authored: &[ContentItem],
    ) -> PreferenceProfile {
        let mut frequency: HashMap<&str, u32> = HashMap::new();

        for item in liked.iter().chain(commented).chain(authored) {
            for tag in &item.tags {
                *frequency.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u32)> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_tags);

        let profile = PreferenceProfile {
            top_tags: ranked.into_iter().map(|(tag, _)| tag.to_string()).collect(),
            like_count: liked.len() as u32,
            comment_count: commented.len() as u32,
            post_count: authored.len() as u32,
        };

        info!(
            tag_count = profile.top_tags.len(),
            like_count = profile.like_count,
            comment_count = profile.comment_count,
            post_count = profile.post_count,
            "Built preference profile"
        );

        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Visibility;
    use chrono::Utc;

    fn item_with_tags(tags: &[&str]) -> ContentItem {
        ContentItem {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            visibility: Visibility::Public,
            hidden: false,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            analytics: None,
        }
    }

    #[test]
    fn test_tags_ranked_by_frequency() {
        let builder = PreferenceProfileBuilder::new();

        let liked = vec![item_with_tags(&["defi", "base"]), item_with_tags(&["defi"])];
        let commented = vec![item_with_tags(&["defi", "nft"])];
        let authored = vec![item_with_tags(&["base"])];

        let profile = builder.build_from_history(&liked, &commented, &authored);

        assert_eq!(profile.top_tags[0], "defi"); // 3 occurrences
        assert_eq!(profile.top_tags[1], "base"); // 2 occurrences
        assert_eq!(profile.top_tags.len(), 3);
        assert_eq!(profile.like_count, 2);
        assert_eq!(profile.comment_count, 1);
        assert_eq!(profile.post_count, 1);
    }

    #[test]
    fn test_profile_keeps_at_most_ten_tags() {
        let builder = PreferenceProfileBuilder::new();

        let tags: Vec<String> = (0..15).map(|i| format!("tag{}", i)).collect();
        let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
        let liked = vec![item_with_tags(&refs)];

        let profile = builder.build_from_history(&liked, &[], &[]);
        assert_eq!(profile.top_tags.len(), 10);
    }

    #[test]
    fn test_empty_history_yields_empty_profile() {
        let builder = PreferenceProfileBuilder::new();

        let profile = builder.build_from_history(&[], &[], &[]);
        assert!(profile.is_empty());
        assert_eq!(profile.like_count, 0);
    }
}
