//! In-memory menu cache with calendar-day staleness
//!
//! Owns the last-fetched menu, its fetch timestamp, and a usage counter.
//! The menu is considered stale once the local calendar date moves past the
//! date of the last fetch attempt; a refresh then runs on the next trigger.
//! Refreshes are single-flight: the state lock is held across the upstream
//! call, so concurrent triggers queue behind it and the late ones observe
//! the fresh result instead of issuing duplicate requests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use tokio::sync::Mutex;

use crate::data::{FetchError, FetchReason, MenuItem, MenuSource};

/// Cache state shared by all command handlers
///
/// Created once at startup and injected where needed; there is no global
/// instance. The fetch timestamp advances on every attempt, including
/// failures and quota exhaustion, so a bad day never turns into a refetch
/// storm.
pub struct MenuCache {
    /// Menu and fetch timestamp, guarded by the single-flight lock
    inner: Mutex<CacheInner>,
    /// Number of menu queries served since startup
    queries: AtomicU64,
}

/// State guarded by the refresh lock
struct CacheInner {
    /// Most recently fetched menu; empty until the first successful fetch
    menu: Vec<MenuItem>,
    /// When the last fetch was attempted; None until the first attempt
    last_fetched_at: Option<DateTime<Local>>,
}

/// Point-in-time copy of the cache for rendering
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    /// Current menu contents
    pub menu: Vec<MenuItem>,
    /// When the last fetch was attempted
    pub last_fetched_at: Option<DateTime<Local>>,
    /// Menu queries served since startup
    pub usage_count: u64,
}

/// What a refresh call did
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Fetched a menu and replaced the cached one
    Refreshed {
        /// Number of items in the new menu
        items: usize,
    },
    /// The service reported quota exhaustion; cached menu is now empty
    QuotaExceeded,
    /// Another caller refreshed while this one waited for the lock
    AlreadyFresh,
    /// The fetch failed; the previously cached menu was kept
    Failed(FetchError),
}

impl MenuCache {
    /// Creates an empty cache that has never fetched
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                menu: Vec::new(),
                last_fetched_at: None,
            }),
            queries: AtomicU64::new(0),
        }
    }

    /// Returns true if the menu should be refreshed before serving
    ///
    /// Stale means never fetched, or last fetched on an earlier local
    /// calendar date than `now`.
    pub async fn needs_refresh(&self, now: DateTime<Local>) -> bool {
        let inner = self.inner.lock().await;
        is_stale(&inner, now)
    }

    /// Refreshes the menu from `source` if it is still stale
    ///
    /// Holds the state lock for the duration of the upstream call. A caller
    /// that queued behind an in-flight refresh re-checks staleness once it
    /// gets the lock and returns `AlreadyFresh` without another fetch.
    ///
    /// The fetch timestamp is set to `now` on every attempt. On success or
    /// quota exhaustion the cached menu is replaced; on failure it is kept,
    /// since stale data beats no data, and the error is returned to the
    /// caller for logging.
    pub async fn refresh(&self, now: DateTime<Local>, source: &dyn MenuSource) -> RefreshOutcome {
        let mut inner = self.inner.lock().await;

        if !is_stale(&inner, now) {
            return RefreshOutcome::AlreadyFresh;
        }

        inner.last_fetched_at = Some(now);

        match source.fetch_menu().await {
            Ok(result) => match result.reason {
                FetchReason::Success => {
                    let items = result.items.len();
                    inner.menu = result.items;
                    RefreshOutcome::Refreshed { items }
                }
                FetchReason::QuotaExceeded => {
                    inner.menu = result.items;
                    RefreshOutcome::QuotaExceeded
                }
            },
            Err(err) => RefreshOutcome::Failed(err),
        }
    }

    /// Counts one served menu query
    ///
    /// Independent of whether the query triggered a fetch.
    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Menu queries served since startup
    pub fn usage_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    /// When the last fetch was attempted, if ever
    pub async fn last_fetched_at(&self) -> Option<DateTime<Local>> {
        self.inner.lock().await.last_fetched_at
    }

    /// Takes a consistent snapshot of the cache for rendering
    pub async fn snapshot(&self) -> CacheSnapshot {
        let inner = self.inner.lock().await;
        CacheSnapshot {
            menu: inner.menu.clone(),
            last_fetched_at: inner.last_fetched_at,
            usage_count: self.usage_count(),
        }
    }
}

impl Default for MenuCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Staleness check shared by `needs_refresh` and `refresh`
fn is_stale(inner: &CacheInner, now: DateTime<Local>) -> bool {
    match inner.last_fetched_at {
        None => true,
        Some(last) => last.date_naive() != now.date_naive(),
    }
}
