//! Feed loading - article list plus a concurrent like-count fan-out

use std::collections::{BTreeSet, HashMap};

use futures_util::future::join_all;

use crate::models::{Article, ArticleId};
use crate::network::client::ApiClient;
use crate::network::error::ApiError;

/// Outcome of the per-article like-count fan-out
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LikeTally {
    pub likes: HashMap<ArticleId, String>,
    pub failed: BTreeSet<ArticleId>,
}

/// Everything the feed view needs after one load
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedSnapshot {
    pub articles: Vec<Article>,
    pub tally: LikeTally,
}

/// Fetch like counts for every id concurrently.
///
/// A failed fetch never fails the join; its id ends up in `failed`.
pub async fn fetch_like_counts(client: &ApiClient, token: &str, ids: &[ArticleId]) -> LikeTally {
    let fetches = ids.iter().map(|&id| async move {
        (id, client.article_likes(token, id).await)
    });

    let mut tally = LikeTally::default();
    for (id, result) in join_all(fetches).await {
        match result {
            Ok(count) => {
                tally.likes.insert(id, count);
            }
            Err(e) => {
                tracing::debug!(id, error = %e, "like count unavailable");
                tally.failed.insert(id);
            }
        }
    }
    tally
}

/// Load the article list, then enrich it with like counts.
///
/// Only the list fetch can fail the load; its error (including 401/403)
/// is returned as-is. Article order is the backend's.
pub async fn load_feed(client: &ApiClient, token: &str) -> Result<FeedSnapshot, ApiError> {
    let articles = client.list_articles(token).await?;
    let ids: Vec<ArticleId> = articles.iter().map(|a| a.id).collect();
    let tally = fetch_like_counts(client, token, &ids).await;

    tracing::info!(
        articles = articles.len(),
        likes = tally.likes.len(),
        failed = tally.failed.len(),
        "feed loaded"
    );
    Ok(FeedSnapshot { articles, tally })
}
