//! Common test utilities and fixtures

#![allow(dead_code)]

use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use trade_capture::{ErroredNotification, ExecutionError, OrderService, PlacedNotification, TickResponder};

/// Failure raised by [`FailingOrderService`]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidOperation(pub String);

/// Order service that counts calls and remembers their arguments
#[derive(Debug, Default)]
pub struct CountingOrderService {
    calls: AtomicUsize,
    orders: Mutex<Vec<(String, u32, Decimal)>>,
}

impl CountingOrderService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn orders(&self) -> Vec<(String, u32, Decimal)> {
        self.orders.lock().clone()
    }
}

impl OrderService for CountingOrderService {
    fn buy(&self, code: &str, quantity: u32, price: Decimal) -> Result<(), ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().push((code.to_string(), quantity, price));
        Ok(())
    }
}

/// Order service whose every buy fails
#[derive(Debug)]
pub struct FailingOrderService {
    message: String,
    calls: AtomicUsize,
}

impl FailingOrderService {
    pub fn new(message: &str) -> Arc<Self> {
        Arc::new(Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OrderService for FailingOrderService {
    fn buy(&self, _code: &str, _quantity: u32, _price: Decimal) -> Result<(), ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExecutionError::new(InvalidOperation(self.message.clone())))
    }
}

/// Notifications captured from a responder
#[derive(Default)]
pub struct Recorded {
    pub placed: Mutex<Vec<PlacedNotification>>,
    pub errored: Mutex<Vec<ErroredNotification>>,
}

/// Subscribe to both notifications of `responder`
pub fn record(responder: &TickResponder) -> Arc<Recorded> {
    let recorded = Arc::new(Recorded::default());

    let sink = Arc::clone(&recorded);
    responder.on_placed(move |n| sink.placed.lock().push(n.clone()));
    let sink = Arc::clone(&recorded);
    responder.on_errored(move |n| sink.errored.lock().push(n.clone()));

    recorded
}
