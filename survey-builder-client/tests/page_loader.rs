//! Integration tests for the page loader

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use survey_builder::{Page, PageSource};
use survey_builder_client::{LoadOutcome, PageLoader};

/// Serves the numbers `0..total`, optionally slowly.
struct Numbers {
    total: u64,
    delay: Duration,
    requests: AtomicU32,
}

impl Numbers {
    fn new(total: u64) -> Self {
        Self {
            total,
            delay: Duration::ZERO,
            requests: AtomicU32::new(0),
        }
    }

    fn slow(total: u64) -> Self {
        Self {
            delay: Duration::from_millis(100),
            ..Self::new(total)
        }
    }
}

#[derive(Debug, PartialEq)]
struct Unavailable;

impl PageSource<u64> for Numbers {
    type Error = Unavailable;

    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page<u64>, Unavailable> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let start = u64::from(page - 1) * u64::from(page_size);
        let end = (start + u64::from(page_size)).min(self.total);
        Ok(Page::new((start..end).collect(), page, page_size, self.total))
    }
}

struct Broken;

impl PageSource<u64> for Broken {
    type Error = Unavailable;

    async fn fetch_page(&self, _page: u32, _page_size: u32) -> Result<Page<u64>, Unavailable> {
        Err(Unavailable)
    }
}

#[tokio::test]
async fn test_loads_pages_in_order_until_exhausted() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::new(7), 3);

    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(3)));
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(3)));
    assert!(loader.has_more());
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(1)));
    assert!(!loader.has_more());
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Exhausted));

    assert_eq!(loader.items(), (0..7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_empty_listing_is_exhausted_after_first_page() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::new(0), 10);
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(0)));
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Exhausted));
    assert!(loader.is_empty());
}

#[tokio::test]
async fn test_only_one_page_in_flight() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::slow(20), 5);

    let (first, second) = tokio::join!(loader.load_more(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(loader.is_loading());
        loader.load_more().await
    });

    assert_eq!(first, Ok(LoadOutcome::Loaded(5)));
    assert_eq!(second, Ok(LoadOutcome::Busy));
    assert_eq!(loader.len(), 5);
}

#[tokio::test]
async fn test_dropped_request_frees_the_loader() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::slow(20), 5);

    let timed_out = tokio::time::timeout(Duration::from_millis(10), loader.load_more()).await;
    assert!(timed_out.is_err());
    assert!(!loader.is_loading());
    assert!(loader.is_empty());

    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(5)));
    assert_eq!(loader.items(), (0..5).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_cancel_abandons_the_request() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::slow(20), 5);

    let (outcome, ()) = tokio::join!(loader.load_more(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        loader.cancel();
    });

    assert_eq!(outcome, Ok(LoadOutcome::Cancelled));
    assert!(loader.is_empty());
    assert!(!loader.is_loading());
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Cancelled));
}

#[tokio::test]
async fn test_token_handle_cancels_from_elsewhere() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::slow(20), 5);
    let token = loader.cancellation_token();

    let (outcome, ()) = tokio::join!(loader.load_more(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
    });

    assert_eq!(outcome, Ok(LoadOutcome::Cancelled));
    assert!(loader.is_cancelled());
}

#[tokio::test]
async fn test_reset_drops_stale_page_and_starts_over() {
    let loader: PageLoader<_, u64> = PageLoader::new(Numbers::slow(20), 5);

    let (stale, ()) = tokio::join!(loader.load_more(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        loader.reset();
    });
    assert_eq!(stale, Ok(LoadOutcome::Cancelled));
    assert!(loader.is_empty());
    assert!(!loader.is_cancelled());

    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(5)));
    assert_eq!(loader.items(), (0..5).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_replace_source_switches_listing() {
    let mut loader: PageLoader<_, u64> = PageLoader::new(Numbers::new(3), 10);
    loader.load_more().await.unwrap();
    assert_eq!(loader.len(), 3);

    loader.replace_source(Numbers::new(12));
    assert!(loader.is_empty());
    assert_eq!(loader.load_more().await, Ok(LoadOutcome::Loaded(10)));
}

#[tokio::test]
async fn test_errors_leave_loader_usable() {
    let loader: PageLoader<_, u64> = PageLoader::new(Broken, 10);
    assert_eq!(loader.load_more().await, Err(Unavailable));
    assert!(!loader.is_loading());
    assert_eq!(loader.load_more().await, Err(Unavailable));
}
