//! Single-shot tick responder
//!
//! Watches a stream of ticks and places exactly one buy order the first
//! time a price comes in strictly below the threshold.
//!
//! ```text
//!            price < threshold, buy ok
//!   Pending ──────────────────────────▶ Placed
//!      │  ▲
//!      │  └── price >= threshold (no-op)
//!      │
//!      └─────────────────────────────▶ Errored
//!            price < threshold, buy fails
//! ```
//!
//! Placed and Errored are terminal. Every later tick is a no-op.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use super::observers::{ObserverList, SubscriptionId};
use crate::common::errors::{ExecutionError, Result, TradeError};
use crate::common::traits::{OrderService, TickHandler};
use crate::common::types::{ErroredNotification, OrderState, PlacedNotification};

/// Quantity bought when the threshold is crossed
pub const DEFAULT_QUANTITY: u32 = 100;

/// Places one buy order when price first drops below a threshold
///
/// Safe to share across threads. The state check before locking is a
/// plain atomic load; the compare, buy and transition happen under a
/// per-instance mutex with the state re-checked once inside.
pub struct TickResponder {
    executor: Arc<dyn OrderService>,
    threshold: Decimal,
    state: AtomicU8,
    transition: Mutex<()>,
    placed: ObserverList<PlacedNotification>,
    errored: ObserverList<ErroredNotification>,
}

impl TickResponder {
    /// Create a responder in the Pending state
    pub fn new(executor: Arc<dyn OrderService>, threshold: Decimal) -> Self {
        Self {
            executor,
            threshold,
            state: AtomicU8::new(OrderState::Pending as u8),
            transition: Mutex::new(()),
            placed: ObserverList::new(),
            errored: ObserverList::new(),
        }
    }

    /// Create a responder from an optional executor
    ///
    /// # Errors
    /// Returns `TradeError::InvalidArgument` when `executor` is `None`.
    pub fn try_new(executor: Option<Arc<dyn OrderService>>, threshold: Decimal) -> Result<Self> {
        let executor = executor
            .ok_or_else(|| TradeError::InvalidArgument("executor must be provided".to_string()))?;
        Ok(Self::new(executor, threshold))
    }

    /// Threshold below which a buy is placed
    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Current lifecycle state
    pub fn state(&self) -> OrderState {
        OrderState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Register a callback for the placed notification
    pub fn on_placed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PlacedNotification) + Send + Sync + 'static,
    {
        self.placed.subscribe(callback)
    }

    /// Register a callback for the errored notification
    pub fn on_errored<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ErroredNotification) + Send + Sync + 'static,
    {
        self.errored.subscribe(callback)
    }

    /// Remove a placed observer. Returns false if it was not registered.
    pub fn remove_placed_observer(&self, id: SubscriptionId) -> bool {
        self.placed.unsubscribe(id)
    }

    /// Remove an errored observer. Returns false if it was not registered.
    pub fn remove_errored_observer(&self, id: SubscriptionId) -> bool {
        self.errored.unsubscribe(id)
    }

    /// React to a tick whose code may be absent
    pub fn respond_to_tick_opt(&self, code: Option<&str>, price: Decimal) {
        if let Some(code) = code {
            self.respond_to_tick(code, price);
        }
    }

    /// React to a price tick
    ///
    /// Blank codes, ticks at or above the threshold, and any tick after
    /// the responder has left Pending are ignored. Executor failures,
    /// panics included, are reported through the errored notification
    /// and never returned.
    pub fn respond_to_tick(&self, code: &str, price: Decimal) {
        if code.trim().is_empty() {
            debug!(price = %price, "Ignoring tick with blank code");
            return;
        }
        if self.state().is_terminal() {
            trace!(code, state = %self.state(), "Responder already finished");
            return;
        }

        let _guard = self.transition.lock();

        // another caller may have finished while we waited
        if self.state().is_terminal() {
            return;
        }

        if price >= self.threshold {
            debug!(code, price = %price, threshold = %self.threshold, "Price not below threshold");
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.executor.buy(code, DEFAULT_QUANTITY, price)
        }))
        .unwrap_or_else(|payload| Err(ExecutionError::msg(panic_message(payload.as_ref()))));

        match outcome {
            Ok(()) => {
                self.state.store(OrderState::Placed as u8, Ordering::Release);
                info!(
                    code,
                    price = %price,
                    threshold = %self.threshold,
                    quantity = DEFAULT_QUANTITY,
                    "Buy order placed"
                );
                self.placed.notify(&PlacedNotification::new(code, price));
            }
            Err(cause) => {
                self.state.store(OrderState::Errored as u8, Ordering::Release);
                warn!(code, price = %price, error = %cause, "Buy order failed");
                self.errored
                    .notify(&ErroredNotification::new(code, price, cause));
            }
        }
    }
}

/// Text of a panic raised by an order service
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("order service panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("order service panicked: {}", message)
    } else {
        "order service panicked".to_string()
    }
}

impl TickHandler for TickResponder {
    fn respond_to_tick(&self, code: &str, price: Decimal) {
        TickResponder::respond_to_tick(self, code, price);
    }

    fn state(&self) -> OrderState {
        TickResponder::state(self)
    }
}

impl fmt::Debug for TickResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickResponder")
            .field("threshold", &self.threshold)
            .field("state", &self.state())
            .field("placed_observers", &self.placed.len())
            .field("errored_observers", &self.errored.len())
            .finish()
    }
}
