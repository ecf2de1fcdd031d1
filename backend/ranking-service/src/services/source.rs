use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{ContentItem, TimeWindow, UserActivity};

/// The persistence-layer boundary of the ranking core.
///
/// Implementations own all I/O: the core never queries storage itself, it
/// only scores and orders the rows these accessors return. Accessor errors
/// propagate to the caller unmodified; the core does not catch, log or
/// mask them.
///
/// All item accessors return public, non-hidden rows only.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Items authored by accounts the user follows, newest first.
    async fn following_items(&self, user_id: Uuid, limit: usize) -> Result<Vec<ContentItem>>;

    /// Items from the last seven days, ordered by like count then recency.
    async fn engaged_items(&self, limit: usize) -> Result<Vec<ContentItem>>;

    /// Most recently created items, newest first.
    async fn recent_items(&self, limit: usize) -> Result<Vec<ContentItem>>;

    /// Items the user has liked.
    async fn liked_items(&self, user_id: Uuid) -> Result<Vec<ContentItem>>;

    /// Items the user has commented on.
    async fn commented_items(&self, user_id: Uuid) -> Result<Vec<ContentItem>>;

    /// Items the user authored.
    async fn authored_items(&self, user_id: Uuid) -> Result<Vec<ContentItem>>;

    /// Number of accounts the user follows.
    async fn following_count(&self, user_id: Uuid) -> Result<usize>;

    /// Per-user activity counts inside the window, for user trending.
    async fn user_activity(&self, window: TimeWindow) -> Result<Vec<UserActivity>>;
}
