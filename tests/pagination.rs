//! End-to-end pagination tests against the mock brewery API.
//!
//! These drive `BreweryClient` over real HTTP: request building, status
//! handling, body decoding, and the counter's terminal conditions.

use brewcount::client::{BreweryClient, PageSource, StateQuery};
use brewcount::counter::{BreweryCountResult, StopReason, count_breweries, count_breweries_paged};
use brewcount_testkit::{MockBreweryApi, PageRequest, PseudoGenerator};
use std::time::Duration;

fn client_for(api: &MockBreweryApi) -> BreweryClient {
    BreweryClient::new(&api.base_url()).unwrap()
}

#[tokio::test]
async fn district_of_columbia_single_page() {
    let api = MockBreweryApi::start().await;
    api.mount_pages("district_of_columbia", &[5]).await;

    let count = count_breweries(&client_for(&api), &"district_of_columbia".into()).await;

    assert_eq!(
        count.into_result(),
        BreweryCountResult {
            state: "district_of_columbia".to_string(),
            brewery_count: 5,
        }
    );
}

#[tokio::test]
async fn maryland_two_pages() {
    let api = MockBreweryApi::start().await;
    api.mount_pages("maryland", &[200, 30]).await;

    let count = count_breweries(&client_for(&api), &"maryland".into()).await;

    assert_eq!(count.brewery_count(), 230);
    assert_eq!(count.stop, StopReason::EmptyPage);
    assert_eq!(
        api.page_requests().await,
        vec![
            PageRequest {
                state: "maryland".into(),
                page: 1,
                per_page: 200,
            },
            PageRequest {
                state: "maryland".into(),
                page: 2,
                per_page: 200,
            },
            PageRequest {
                state: "maryland".into(),
                page: 3,
                per_page: 200,
            },
        ]
    );
}

#[tokio::test]
async fn zero_breweries() {
    let api = MockBreweryApi::start().await;
    api.mount_pages("atlantis", &[]).await;

    let count = count_breweries(&client_for(&api), &"atlantis".into()).await;

    assert_eq!(count.brewery_count(), 0);
    assert_eq!(count.pages_fetched, 0);
    assert_eq!(api.pages_requested("atlantis").await, vec![1]);
}

#[tokio::test]
async fn server_error_on_first_page() {
    let api = MockBreweryApi::start().await;
    api.mount_status("maryland", 1, 500).await;

    let count = count_breweries(&client_for(&api), &"maryland".into()).await;

    assert_eq!(count.brewery_count(), 0);
    assert_eq!(count.stop, StopReason::Status { code: 500 });
}

#[tokio::test]
async fn status_after_pages_stops_pagination() {
    let api = MockBreweryApi::start().await;
    api.mount_page("new_york", 1, 200).await;
    api.mount_status("new_york", 2, 429).await;

    let count = count_breweries(&client_for(&api), &"new_york".into()).await;

    assert_eq!(count.brewery_count(), 200);
    assert_eq!(count.stop, StopReason::Status { code: 429 });
    assert_eq!(api.pages_requested("new_york").await, vec![1, 2]);
}

#[tokio::test]
async fn no_content_ends_listing_cleanly() {
    let api = MockBreweryApi::start().await;
    api.mount_page("delaware", 1, 7).await;
    api.mount_status("delaware", 2, 204).await;

    let count = count_breweries(&client_for(&api), &"delaware".into()).await;

    assert_eq!(count.brewery_count(), 7);
    assert_eq!(count.stop, StopReason::Status { code: 204 });
    assert!(count.is_complete());
    assert_eq!(api.pages_requested("delaware").await, vec![1, 2]);
}

#[tokio::test]
async fn malformed_body_keeps_partial_count() {
    let api = MockBreweryApi::start().await;
    api.mount_page("virginia", 1, 200).await;
    api.mount_malformed("virginia", 2).await;

    let count = count_breweries(&client_for(&api), &"virginia".into()).await;

    assert_eq!(count.brewery_count(), 200);
    assert!(!count.is_complete());
}

#[tokio::test]
async fn timeout_keeps_partial_count() {
    let api = MockBreweryApi::start().await;
    api.mount_page("ohio", 1, 12).await;
    api.mount_stalled("ohio", 2, Duration::from_secs(2)).await;

    let client = BreweryClient::with_timeout(&api.base_url(), Duration::from_millis(200)).unwrap();
    let count = count_breweries(&client, &"ohio".into()).await;

    assert_eq!(count.brewery_count(), 12);
    assert!(matches!(count.stop, StopReason::Failed { .. }));
}

#[tokio::test]
async fn unreachable_server_counts_zero() {
    // Nothing listens on port 9 (discard) on a test machine
    let client = BreweryClient::with_timeout(
        "http://127.0.0.1:9/v1/breweries",
        Duration::from_millis(500),
    )
    .unwrap();

    let count = count_breweries(&client, &"maryland".into()).await;

    assert_eq!(count.brewery_count(), 0);
    assert!(!count.is_complete());
}

#[tokio::test]
async fn count_equals_sum_of_served_pages() {
    let mut rng = PseudoGenerator::new(2024);

    for (i, state) in ["colorado", "oregon", "texas"].iter().enumerate() {
        let api = MockBreweryApi::start_with_seed(i as u64).await;
        let pages = rng.random_pages(1000, 200);
        api.mount_pages(state, &pages).await;

        let count = count_breweries(&client_for(&api), &StateQuery::from(*state)).await;

        assert_eq!(count.brewery_count(), pages.iter().sum::<usize>() as u64);
        assert_eq!(count.pages_fetched as usize, pages.len());
    }
}

#[tokio::test]
async fn smaller_page_size() {
    let api = MockBreweryApi::start().await;
    api.mount_pages("maine", &[50, 50, 7]).await;

    let count = count_breweries_paged(&client_for(&api), &"maine".into(), 50).await;

    assert_eq!(count.brewery_count(), 107);
    assert!(api.page_requests().await.iter().all(|r| r.per_page == 50));
}

#[tokio::test]
async fn fetch_page_decodes_records() {
    let api = MockBreweryApi::start().await;
    api.mount_page("maryland", 1, 3).await;

    let page = client_for(&api)
        .fetch_page(&"maryland".into(), 1, 200)
        .await
        .unwrap();

    assert!(page.is_success());
    assert_eq!(page.len(), 3);
    assert!(page.breweries.iter().all(|b| b.state.as_deref() == Some("maryland")));
}
