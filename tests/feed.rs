mod common;

use common::{spawn_backend, BROKEN_LIKES_ID, GOOD_TOKEN};
use timeline_tui::network::feed::fetch_like_counts;
use timeline_tui::network::load_feed;
use timeline_tui::ApiClient;

#[tokio::test]
async fn test_feed_preserves_order_and_isolates_like_failures() {
    let (base, _backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let snapshot = load_feed(&client, GOOD_TOKEN).await.unwrap();

    let ids: Vec<u64> = snapshot.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    assert_eq!(snapshot.tally.likes.get(&3).map(String::as_str), Some("4"));
    assert_eq!(snapshot.tally.likes.get(&1).map(String::as_str), Some("1"));
    assert!(!snapshot.tally.likes.contains_key(&BROKEN_LIKES_ID));
    assert_eq!(snapshot.tally.failed.iter().copied().collect::<Vec<_>>(), vec![BROKEN_LIKES_ID]);
}

#[tokio::test]
async fn test_feed_unauthorized_propagates() {
    let (base, backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let err = load_feed(&client, "nope").await.unwrap_err();
    assert!(err.is_unauthorized());
    // No fan-out after the list itself failed
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn test_fan_out_with_no_ids_is_empty() {
    let (base, backend) = spawn_backend().await;
    let client = ApiClient::new(base);

    let tally = fetch_like_counts(&client, GOOD_TOKEN, &[]).await;
    assert!(tally.likes.is_empty());
    assert!(tally.failed.is_empty());
    assert_eq!(backend.request_count(), 0);
}
