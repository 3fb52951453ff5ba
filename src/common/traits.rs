//! Trait definitions at the edges of the responder

use rust_decimal::Decimal;

use super::errors::ExecutionError;
use super::types::{OrderState, Tick};

/// Capability that executes buy orders
///
/// The responder treats implementations as a black box. It calls `buy`
/// at most once over its lifetime and never assumes the service is
/// safe for concurrent calls beyond the `Send + Sync` bound needed to
/// share it.
#[cfg_attr(test, mockall::automock)]
pub trait OrderService: Send + Sync {
    /// Place a buy order
    ///
    /// # Arguments
    /// * `code` - Security code (e.g. stock symbol)
    /// * `quantity` - Number of units to buy
    /// * `price` - Price of the tick that triggered the order
    fn buy(&self, code: &str, quantity: u32, price: Decimal) -> Result<(), ExecutionError>;
}

/// Trait for anything that consumes price ticks
pub trait TickHandler: Send + Sync {
    /// React to a single price observation
    ///
    /// Never fails; outcomes are reported through notifications.
    fn respond_to_tick(&self, code: &str, price: Decimal);

    /// Current lifecycle state
    fn state(&self) -> OrderState;

    /// Dispatch a parsed tick
    fn handle(&self, tick: &Tick) {
        self.respond_to_tick(&tick.code, tick.price);
    }
}
