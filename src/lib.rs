//! TradeCapture Library
//!
//! A single-shot, thread-safe tick responder: it watches price ticks for a
//! security and places exactly one buy order the first time the price
//! drops strictly below a configured threshold.

pub mod common;
pub mod config;
pub mod order;

// Re-export commonly used types
pub use common::errors::{ExecutionError, Result, TradeError};
pub use common::traits::{OrderService, TickHandler};
pub use common::types::{
    parse_ticks, ErroredNotification, OrderState, PlacedNotification, Tick,
};
pub use config::types::AppConfig;
pub use order::{
    ObserverList, PaperOrder, PaperOrderService, SubscriptionId, TickResponder, DEFAULT_QUANTITY,
};
