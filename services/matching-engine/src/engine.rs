//! Matching engine core
//!
//! `MatchingEngine` wraps the single-writer `Book` behind one exclusion
//! lock, owns the day-order reaper thread and coordinates shutdown. Any
//! number of caller threads may submit; they serialize through the lock, and
//! the trades returned by one submission happened entirely before the lock
//! was released.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use types::ids::OrderId;
use types::order::{Order, OrderModify};
use types::trade::Trades;

use crate::book::{Book, BookSnapshot};
use crate::clock::{until_next_close, Clock, SystemClock};

struct Shared {
    book: Mutex<Book>,
    close_signal: Condvar,
    shutdown: AtomicBool,
}

/// Thread-safe price-time priority matching engine for one instrument
///
/// Dropping the engine signals the reaper and joins it; shutdown is final.
pub struct MatchingEngine {
    shared: Arc<Shared>,
    reaper: Option<JoinHandle<()>>,
}

impl MatchingEngine {
    /// Engine on the system wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Engine on an injected clock; the reaper computes its session-close
    /// wake-ups from it.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let shared = Arc::new(Shared {
            book: Mutex::new(Book::new()),
            close_signal: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });
        let reaper = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("day-order-reaper".into())
                .spawn(move || reaper_loop(&shared, clock.as_ref()))
                .expect("failed to spawn reaper thread")
        };
        Self {
            shared,
            reaper: Some(reaper),
        }
    }

    /// Submit an order; returns the trades its match run produced.
    /// Rejections (duplicate id, unfillable FAK/FOK, market order against an
    /// empty book) are silent and return an empty list.
    pub fn add_order(&self, order: Order) -> Trades {
        self.shared.book.lock().unwrap().add_order(order)
    }

    /// Cancel a resting order; unknown ids are a no-op.
    pub fn cancel_order(&self, order_id: OrderId) {
        self.shared.book.lock().unwrap().cancel(order_id);
    }

    /// Cancel-then-new replacement; time priority is not preserved.
    pub fn modify_order(&self, modify: OrderModify) -> Trades {
        self.shared.book.lock().unwrap().modify(modify)
    }

    /// Number of resting orders across both sides
    pub fn size(&self) -> usize {
        self.shared.book.lock().unwrap().size()
    }

    /// Aggregated depth, bids and asks each best-first
    pub fn snapshot(&self) -> BookSnapshot {
        self.shared.book.lock().unwrap().snapshot()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MatchingEngine {
    fn drop(&mut self) {
        // The flag must be stored while holding the lock: the reaper checks
        // it under the same lock before and after waiting, so the wake-up
        // cannot fall between its check and its wait.
        let guard = self.shared.book.lock();
        self.shared.shutdown.store(true, Ordering::Release);
        drop(guard);
        self.shared.close_signal.notify_all();
        if let Some(handle) = self.reaper.take() {
            let _ = handle.join();
        }
    }
}

/// Background loop: sleep until 16:00 local + 100 ms, then cancel every
/// resting GoodForDay order, daily, until shutdown.
fn reaper_loop(shared: &Shared, clock: &dyn Clock) {
    loop {
        let wait = until_next_close(clock.local_now());
        let expired = {
            let Ok(guard) = shared.book.lock() else {
                return;
            };
            if shared.shutdown.load(Ordering::Acquire) {
                return;
            }
            let Ok((guard, timeout)) = shared.close_signal.wait_timeout_while(
                guard,
                wait,
                |_| !shared.shutdown.load(Ordering::Acquire),
            ) else {
                return;
            };
            if shared.shutdown.load(Ordering::Acquire) || !timeout.timed_out() {
                return;
            }
            guard.day_order_ids()
        };
        if expired.is_empty() {
            continue;
        }
        tracing::info!(count = expired.len(), "session close, cancelling day orders");
        if let Ok(mut book) = shared.book.lock() {
            for order_id in expired {
                book.cancel(order_id);
            }
        }
    }
}
