//! Network messages - communication between App and Network layers

use crate::models::{Article, ArticleDraft, ArticleId, AuthMode, Credentials, ExchangeRate};
use crate::network::{ApiError, FeedSnapshot};

/// Commands sent from App layer to Network layer.
///
/// Authenticated commands carry no token; the network actor reads the
/// current one from the session channel.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Login or register
    Authenticate {
        id: u64,
        mode: AuthMode,
        credentials: Credentials,
    },
    /// Article list plus like counts
    LoadFeed { id: u64 },
    /// Exchange rate list (no auth)
    LoadRates { id: u64 },
    /// Post a new article
    CreateArticle { id: u64, draft: ArticleDraft },
    /// Like an article, then re-fetch its count
    LikeArticle { id: u64, article_id: ArticleId },
    /// Backend health probe
    Ping { id: u64 },

    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Whether the command needs a session token
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            NetworkCommand::LoadFeed { .. }
                | NetworkCommand::CreateArticle { .. }
                | NetworkCommand::LikeArticle { .. }
        )
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Authenticated {
        id: u64,
        result: Result<String, ApiError>,
    },
    FeedLoaded {
        id: u64,
        result: Result<FeedSnapshot, ApiError>,
    },
    RatesLoaded {
        id: u64,
        result: Result<Vec<ExchangeRate>, ApiError>,
    },
    ArticleCreated {
        id: u64,
        result: Result<Article, ApiError>,
    },
    /// Carries the refreshed like count on success
    ArticleLiked {
        id: u64,
        article_id: ArticleId,
        result: Result<String, ApiError>,
    },
    Pong {
        id: u64,
        result: Result<String, ApiError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Authenticated { id, .. } => *id,
            NetworkResponse::FeedLoaded { id, .. } => *id,
            NetworkResponse::RatesLoaded { id, .. } => *id,
            NetworkResponse::ArticleCreated { id, .. } => *id,
            NetworkResponse::ArticleLiked { id, .. } => *id,
            NetworkResponse::Pong { id, .. } => *id,
        }
    }

    /// Whether the call behind this response failed
    pub fn is_error(&self) -> bool {
        match self {
            NetworkResponse::Authenticated { result, .. } => result.is_err(),
            NetworkResponse::FeedLoaded { result, .. } => result.is_err(),
            NetworkResponse::RatesLoaded { result, .. } => result.is_err(),
            NetworkResponse::ArticleCreated { result, .. } => result.is_err(),
            NetworkResponse::ArticleLiked { result, .. } => result.is_err(),
            NetworkResponse::Pong { result, .. } => result.is_err(),
        }
    }

    /// The response a command gets when it cannot run at all
    pub fn failed(command: &NetworkCommand, error: ApiError) -> Option<NetworkResponse> {
        Some(match command {
            NetworkCommand::Authenticate { id, .. } => NetworkResponse::Authenticated {
                id: *id,
                result: Err(error),
            },
            NetworkCommand::LoadFeed { id } => NetworkResponse::FeedLoaded {
                id: *id,
                result: Err(error),
            },
            NetworkCommand::LoadRates { id } => NetworkResponse::RatesLoaded {
                id: *id,
                result: Err(error),
            },
            NetworkCommand::CreateArticle { id, .. } => NetworkResponse::ArticleCreated {
                id: *id,
                result: Err(error),
            },
            NetworkCommand::LikeArticle { id, article_id } => NetworkResponse::ArticleLiked {
                id: *id,
                article_id: *article_id,
                result: Err(error),
            },
            NetworkCommand::Ping { id } => NetworkResponse::Pong {
                id: *id,
                result: Err(error),
            },
            NetworkCommand::Shutdown => return None,
        })
    }
}
