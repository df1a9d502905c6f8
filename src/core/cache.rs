use crate::core::currency::ExchangeQuote;
use crate::core::error::{Error, Result};
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::debug;

/// Holds at most one exchange quote snapshot for its whole lifetime.
///
/// The first successful fetch is retained and never replaced. Callers racing
/// on an empty cache share a single fetch, and a failed fetch leaves the cache
/// empty so the next caller tries again.
#[derive(Debug, Default)]
pub struct QuoteCache {
    snapshot: OnceCell<ExchangeQuote>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self {
            snapshot: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Option<&ExchangeQuote> {
        let value = self.snapshot.get();
        if value.is_some() {
            debug!("Quote cache HIT");
        } else {
            debug!("Quote cache MISS");
        }
        value
    }

    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<&ExchangeQuote>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ExchangeQuote>>,
    {
        if let Some(snapshot) = self.get() {
            return Ok(snapshot);
        }
        self.snapshot
            .get_or_try_init(move || async move {
                let snapshot = fetch().await?;
                debug!(base = %snapshot.base, "Quote cache PUT");
                Ok::<_, Error>(snapshot)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn quote(base: &str) -> ExchangeQuote {
        ExchangeQuote {
            base: base.to_string(),
            quotes: HashMap::from([(format!("{base}EUR"), Decimal::new(85, 2))]),
        }
    }

    #[tokio::test]
    async fn test_cache_keeps_first_snapshot() {
        let cache = QuoteCache::new();
        assert!(cache.get().is_none());

        let first = cache.get_or_fetch(|| async { Ok(quote("USD")) }).await;
        assert_eq!(first.unwrap().base, "USD");

        // A later fetch for a different base is never run
        let second = cache.get_or_fetch(|| async { Ok(quote("GBP")) }).await;
        assert_eq!(second.unwrap().base, "USD");
        assert_eq!(cache.get().unwrap().base, "USD");
    }

    #[tokio::test]
    async fn test_cache_does_not_retain_failures() {
        let cache = QuoteCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result = cache
            .get_or_fetch(move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::Service {
                    code: 101,
                    info: "invalid access key".to_string(),
                })
            })
            .await;
        assert!(result.is_err());
        assert!(cache.get().is_none());

        let result = cache
            .get_or_fetch(move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(quote("USD"))
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_callers_share_one_fetch() {
        let cache = QuoteCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let fetch = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(quote("USD"))
        };

        let (a, b) = tokio::join!(cache.get_or_fetch(fetch), cache.get_or_fetch(fetch));
        assert_eq!(a.unwrap().base, "USD");
        assert_eq!(b.unwrap().base, "USD");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
