//! Paper order service
//!
//! Records buy orders in memory instead of sending them anywhere. Used by
//! the replay binary and handy as a stand-in executor in tests.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::common::errors::ExecutionError;
use crate::common::traits::OrderService;

/// A buy order accepted by the paper service
#[derive(Debug, Clone, PartialEq)]
pub struct PaperOrder {
    pub code: String,
    pub quantity: u32,
    pub price: Decimal,
    pub placed_at: DateTime<Utc>,
}

/// Order service that keeps orders in memory
#[derive(Debug, Default)]
pub struct PaperOrderService {
    orders: Mutex<Vec<PaperOrder>>,
    /// When set, every order is rejected with this reason
    rejection: Option<String>,
}

impl PaperOrderService {
    /// Create a service that accepts every order
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every order with the given reason
    pub fn with_rejection(mut self, reason: impl Into<String>) -> Self {
        self.rejection = Some(reason.into());
        self
    }

    /// Orders accepted so far
    pub fn orders(&self) -> Vec<PaperOrder> {
        self.orders.lock().clone()
    }
}

impl OrderService for PaperOrderService {
    fn buy(&self, code: &str, quantity: u32, price: Decimal) -> Result<(), ExecutionError> {
        if let Some(reason) = &self.rejection {
            warn!(code, quantity, price = %price, reason = %reason, "Paper order rejected");
            return Err(ExecutionError::msg(reason.clone()));
        }

        let order = PaperOrder {
            code: code.to_string(),
            quantity,
            price,
            placed_at: Utc::now(),
        };
        info!(code, quantity, price = %price, "Paper order filled");
        self.orders.lock().push(order);
        Ok(())
    }
}
