//! Network actor - runs API calls in the Tokio async runtime

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;
use crate::network::error::ApiError;
use crate::network::feed::load_feed;

/// Network actor that turns commands into API calls.
///
/// Each command runs as its own task; nothing is cancelled or retried.
pub struct NetworkActor {
    client: ApiClient,
    session: watch::Receiver<Option<String>>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        client: ApiClient,
        session: watch::Receiver<Option<String>>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            client,
            session,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.dispatch(cmd),
                    }
                }

                // Reap finished tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
        tracing::info!(in_flight = self.active_requests.len(), "network actor stopped");
    }

    fn dispatch(&mut self, cmd: NetworkCommand) {
        let token = self.session.borrow().clone();

        if cmd.requires_session() && token.is_none() {
            tracing::warn!(?cmd, "dropping authenticated command without a session");
            if let Some(resp) = NetworkResponse::failed(&cmd, ApiError::MissingToken) {
                let _ = self.response_tx.send(resp);
            }
            return;
        }

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        self.active_requests.spawn(async move {
            let resp = execute(&client, cmd, token.unwrap_or_default()).await;
            if let Some(resp) = resp {
                if resp.is_error() {
                    tracing::warn!(id = resp.id(), "request failed");
                } else {
                    tracing::info!(id = resp.id(), "request completed");
                }
                let _ = response_tx.send(resp);
            }
        });
    }
}

/// Run one command to completion
async fn execute(client: &ApiClient, cmd: NetworkCommand, token: String) -> Option<NetworkResponse> {
    let resp = match cmd {
        NetworkCommand::Authenticate { id, mode, credentials } => {
            tracing::info!(id, mode = mode.as_str(), user = %credentials.username, "authenticating");
            NetworkResponse::Authenticated {
                id,
                result: client.authenticate(mode, &credentials).await,
            }
        }
        NetworkCommand::LoadFeed { id } => {
            tracing::info!(id, "loading feed");
            NetworkResponse::FeedLoaded {
                id,
                result: load_feed(client, &token).await,
            }
        }
        NetworkCommand::LoadRates { id } => {
            tracing::info!(id, "loading exchange rates");
            NetworkResponse::RatesLoaded {
                id,
                result: client.list_exchange_rates().await,
            }
        }
        NetworkCommand::CreateArticle { id, draft } => {
            tracing::info!(id, title = %draft.title, "posting article");
            NetworkResponse::ArticleCreated {
                id,
                result: client.create_article(&token, &draft).await,
            }
        }
        NetworkCommand::LikeArticle { id, article_id } => {
            tracing::info!(id, article_id, "liking article");
            let result = match client.like_article(&token, article_id).await {
                Ok(_) => client.article_likes(&token, article_id).await,
                Err(e) => Err(e),
            };
            NetworkResponse::ArticleLiked {
                id,
                article_id,
                result,
            }
        }
        NetworkCommand::Ping { id } => NetworkResponse::Pong {
            id,
            result: client.ping().await,
        },
        NetworkCommand::Shutdown => return None,
    };
    Some(resp)
}
