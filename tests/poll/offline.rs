use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use coinfeed::{
    CfError, DashboardPoller, DashboardUpdate, EnrichmentCache, EnrichmentPipeline, FixedClock,
    PollConfig, RetryConfig,
};
use httpmock::{Method::GET, MockServer};
use tokio::time::timeout;
use url::Url;

use crate::common::{FakeService, fixture, setup_server, utc};

fn mock_all(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/bitcoin/market_chart");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("market_chart", "bitcoin", "json"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("markets", "bitcoin", "json"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_everything", "bitcoin", "json"));
    });
}

fn quick_client(server: &MockServer) -> coinfeed::CfClient {
    coinfeed::CfClient::builder()
        .base_coingecko(Url::parse(&format!("{}/api/v3/", server.base_url())).unwrap())
        .base_news(Url::parse(&format!("{}/", server.base_url())).unwrap())
        .news_api_key("test-key")
        .retry_config(RetryConfig {
            enabled: false,
            ..RetryConfig::default()
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn first_cycle_delivers_every_feed() {
    let server = setup_server();
    mock_all(&server);

    let client = quick_client(&server);
    let service = Arc::new(FakeService::new());
    let clock = Arc::new(FixedClock::new(utc(2025, 10, 19, 13, 5)));
    let pipeline = EnrichmentPipeline::new(service.clone(), EnrichmentCache::in_memory())
        .with_clock(clock.clone());

    let (handle, mut rx) = DashboardPoller::new(&client, "bitcoin")
        .news(pipeline, "bitcoin")
        .clock(clock)
        .timezone(Tz::UTC)
        .interval(Duration::from_secs(60))
        .start()
        .unwrap();

    let (mut chart, mut market, mut news) = (None, None, None);
    while chart.is_none() || market.is_none() || news.is_none() {
        let update = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for updates")
            .expect("channel closed");
        match update {
            DashboardUpdate::Chart(a) => chart = Some(a),
            DashboardUpdate::Market(m) => market = Some(m),
            DashboardUpdate::News(e) => news = Some(e),
            other => panic!("unexpected failure: {other:?}"),
        }
    }
    handle.stop().await;

    let chart = chart.unwrap();
    assert_eq!(chart.dataset.len(), 5);
    assert!(chart.baseline.is_some());
    assert_eq!(market.unwrap().id, "bitcoin");
    let news = news.unwrap();
    assert_eq!(news.articles.len(), 2);
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn feeds_refresh_on_their_interval() {
    let server = setup_server();
    let chart_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/bitcoin/market_chart");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("market_chart", "bitcoin", "json"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("markets", "bitcoin", "json"));
    });

    let client = quick_client(&server);
    let (handle, mut rx) = DashboardPoller::new(&client, "bitcoin")
        .config(PollConfig {
            chart_interval: Duration::from_millis(50),
            market_interval: Duration::from_secs(3600),
            news_interval: Duration::from_secs(3600),
            buffer: 16,
        })
        .start()
        .unwrap();

    let mut charts = 0;
    while charts < 3 {
        let update = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for updates")
            .expect("channel closed");
        if matches!(update, DashboardUpdate::Chart(_)) {
            charts += 1;
        }
    }
    handle.stop().await;

    assert!(chart_mock.calls() >= 3);
}

#[tokio::test]
async fn failed_feed_reports_and_keeps_polling() {
    let server = setup_server();
    let chart_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/bitcoin/market_chart");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("markets", "bitcoin", "json"));
    });

    let client = quick_client(&server);
    let (handle, mut rx) = DashboardPoller::new(&client, "bitcoin")
        .interval(Duration::from_millis(40))
        .start()
        .unwrap();

    let mut failures = 0;
    let mut markets = 0;
    while failures < 2 || markets < 1 {
        let update = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for updates")
            .expect("channel closed");
        match update {
            DashboardUpdate::ChartFailed(e) => {
                assert!(matches!(e, CfError::Status { status: 503, .. }));
                failures += 1;
            }
            DashboardUpdate::Market(_) => markets += 1,
            other => panic!("unexpected update: {other:?}"),
        }
    }
    handle.stop().await;

    assert!(chart_mock.calls() >= 2);
}

#[tokio::test]
async fn stop_closes_the_channel() {
    let server = setup_server();
    mock_all(&server);

    let client = quick_client(&server);
    let (handle, mut rx) = DashboardPoller::new(&client, "bitcoin")
        .interval(Duration::from_millis(20))
        .start()
        .unwrap();

    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for first update")
        .expect("channel closed early");
    handle.stop().await;

    // drain whatever was already queued; then every sender is gone
    let closed = timeout(Duration::from_secs(5), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok(), "channel still open after stop");
}

#[test]
fn empty_coin_is_rejected() {
    let client = coinfeed::CfClient::default();
    let err = DashboardPoller::new(&client, "  ").start().err().unwrap();
    assert!(matches!(err, CfError::Data(_)));
}

#[tokio::test]
async fn abort_ends_feeds_without_waiting() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/bitcoin/market_chart");
        then.status(200)
            .delay(Duration::from_secs(10))
            .header("content-type", "application/json")
            .body(fixture("market_chart", "bitcoin", "json"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/coins/markets");
        then.status(200)
            .delay(Duration::from_secs(10))
            .header("content-type", "application/json")
            .body(fixture("markets", "bitcoin", "json"));
    });

    let client = quick_client(&server);
    let (handle, mut rx) = DashboardPoller::new(&client, "bitcoin").start().unwrap();

    // both feeds are parked on slow responses
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    let next = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("aborted feeds still hold the channel open");
    assert!(next.is_none());
}
