use std::{sync::Arc, time::Duration};

use refetch_chain::{PublicPaths, RetryDelay, RewritePolicy};
use refetch_chunk::{ChunkLoader, Error, MockChunkFetcher, RetryPolicy};

/// Policy with no delay so most tests run instantly.
fn instant_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        delay: RetryDelay::Fixed(Duration::ZERO),
        rewrite: RewritePolicy::default(),
    }
}

#[tokio::test]
async fn first_attempt_fetches_origin_unrewritten() {
    let fetcher = MockChunkFetcher::new();
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec!["https://cdn.b.com/".into()]),
        instant_policy(3),
    );

    loader.load("app").await.expect("loads first try");
    assert_eq!(fetcher.calls(), vec!["/app.js"]);
}

#[tokio::test]
async fn retries_rotate_to_clamped_fallback_paths_and_rewrite_urls() {
    let fetcher = MockChunkFetcher::new();
    fetcher.fail_times("app", 3);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec!["https://cdn.b.com/".into()]),
        instant_policy(3),
    );

    loader.load("app").await.expect("fourth attempt succeeds");
    assert_eq!(
        fetcher.calls(),
        vec![
            "/app.js",
            "https://cdn.b.com/app.js?reload=1",
            "https://cdn.b.com/app.js?reload=2",
            "https://cdn.b.com/app.js?reload=3",
        ]
    );
}

#[tokio::test]
async fn budget_spent_propagates_final_failure_without_extra_attempts() {
    let fetcher = MockChunkFetcher::new();
    fetcher.fail_times("app", 10);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec!["https://cdn.b.com/".into()]),
        instant_policy(3),
    );

    let err = loader.load("app").await.expect_err("budget spent");
    match err {
        Error::RetryExhausted { chunk, attempts, .. } => {
            assert_eq!(chunk, "app");
            assert_eq!(attempts, 3);
        }
    }
    // Attempts 0 through 3, no fifth fetch.
    assert_eq!(fetcher.calls().len(), 4);
}

#[tokio::test]
async fn zero_max_retries_disables_retry() {
    let fetcher = MockChunkFetcher::new();
    fetcher.fail_times("app", 1);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec![]),
        instant_policy(0),
    );

    assert!(loader.load("app").await.is_err());
    assert_eq!(fetcher.calls().len(), 1);
}

#[tokio::test]
async fn stylesheet_chunks_count_attempts_under_their_own_extension() {
    let fetcher = MockChunkFetcher::new();
    fetcher.set_suffix("theme", ".css");
    fetcher.fail_times("theme", 1);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec!["https://cdn.b.com/".into()]),
        instant_policy(3),
    );

    loader.load("theme").await.expect("retry succeeds");
    assert_eq!(
        fetcher.calls(),
        vec!["/theme.css", "https://cdn.b.com/theme.css?reload=1"]
    );
}

#[tokio::test]
async fn custom_rewrite_policy_is_applied_per_attempt() {
    let fetcher = MockChunkFetcher::new();
    fetcher.fail_times("app", 1);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec![]),
        RetryPolicy {
            max_retries: 1,
            delay: RetryDelay::Fixed(Duration::ZERO),
            rewrite: RewritePolicy::Custom(Arc::new(|url, n| format!("{url}#attempt-{n}"))),
        },
    );

    loader.load("app").await.expect("retry succeeds");
    assert_eq!(fetcher.calls(), vec!["/app.js#attempt-0", "/app.js#attempt-1"]);
}

#[tokio::test(start_paused = true)]
async fn delay_runs_before_every_retry_but_not_the_first_attempt() {
    let fetcher = MockChunkFetcher::new();
    fetcher.fail_times("app", 2);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec![]),
        RetryPolicy {
            max_retries: 3,
            delay: RetryDelay::Fixed(Duration::from_millis(3000)),
            rewrite: RewritePolicy::default(),
        },
    );

    let start = tokio::time::Instant::now();
    loader.load("app").await.expect("third attempt succeeds");
    // Two retries, 3000 ms each; attempt 0 was immediate.
    assert_eq!(start.elapsed(), Duration::from_millis(6000));
}

#[tokio::test(start_paused = true)]
async fn per_attempt_delay_function_sees_the_attempt_count() {
    let fetcher = MockChunkFetcher::new();
    fetcher.fail_times("app", 2);
    let loader = ChunkLoader::new(
        fetcher.clone(),
        PublicPaths::new("/", vec![]),
        RetryPolicy {
            max_retries: 3,
            delay: RetryDelay::PerAttempt(Arc::new(|n| Duration::from_millis(1000 * u64::from(n)))),
            rewrite: RewritePolicy::default(),
        },
    );

    let start = tokio::time::Instant::now();
    loader.load("app").await.expect("third attempt succeeds");
    // 1000 ms before attempt 1, 2000 ms before attempt 2.
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
}
