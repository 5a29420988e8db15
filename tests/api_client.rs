mod common;

use common::{spawn_backend, GOOD_TOKEN};
use timeline_tui::models::{ArticleDraft, AuthMode, Credentials};
use timeline_tui::{ApiClient, ApiError};

#[tokio::test]
async fn test_login_token_is_sent_raw_on_articles() {
    let (base, backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let token = client.login(&Credentials::new("a", "b")).await.unwrap();
    assert_eq!(token, "T1");

    let articles = client.list_articles(&token).await.unwrap();
    assert_eq!(articles.len(), 3);

    assert_eq!(backend.auth_for("/api/auth/login"), vec![None]);
    assert_eq!(backend.auth_for("/api/articles"), vec![Some("T1".to_string())]);
}

#[tokio::test]
async fn test_rejected_login_carries_body_text() {
    let (base, _backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let err = client
        .authenticate(AuthMode::Login, &Credentials::new("a", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "invalid credentials");
}

#[tokio::test]
async fn test_register_returns_token() {
    let (base, backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let token = client.register(&Credentials::new("new", "pw")).await.unwrap();
    assert_eq!(token, GOOD_TOKEN);
    assert_eq!(backend.auth_for("/api/auth/register").len(), 1);
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_status_line() {
    let (base, _backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let err = client.list_articles("stale").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "401 Unauthorized");
}

#[tokio::test]
async fn test_create_like_and_count() {
    let (base, _backend) = spawn_backend().await;
    let client = ApiClient::new(format!("{}/", base));

    let draft = ArticleDraft::from_input("Hi", "first post", "ann").unwrap();
    let created = client.create_article(GOOD_TOKEN, &draft).await.unwrap();
    assert_eq!(created.id, 10);
    assert_eq!(created.title, "Hi");
    assert_eq!(created.author.as_deref(), Some("ann"));

    assert_eq!(client.article_likes(GOOD_TOKEN, 1).await.unwrap(), "1");
    assert_eq!(client.like_article(GOOD_TOKEN, 1).await.unwrap(), "liked");
    assert_eq!(client.article_likes(GOOD_TOKEN, 1).await.unwrap(), "2");
}

#[tokio::test]
async fn test_rates_and_ping_need_no_token() {
    let (base, backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let rates = client.list_exchange_rates().await.unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[1].pair(), "USD/JPY");
    assert_eq!(backend.auth_for("/api/exchangeRates"), vec![None]);

    assert_eq!(client.ping().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = ApiClient::new("http://127.0.0.1:1");
    let err = client.list_exchange_rates().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
