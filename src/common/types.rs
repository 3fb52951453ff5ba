//! Value types shared by the responder, its observers and the tick feed

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::errors::{ExecutionError, Result, TradeError};

/// Lifecycle of a tick responder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OrderState {
    /// Waiting for a qualifying tick
    Pending = 0,
    /// The buy went through
    Placed = 1,
    /// The buy failed
    Errored = 2,
}

impl OrderState {
    /// Placed and Errored are final
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderState::Pending)
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => OrderState::Placed,
            2 => OrderState::Errored,
            _ => OrderState::Pending,
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderState::Pending => write!(f, "pending"),
            OrderState::Placed => write!(f, "placed"),
            OrderState::Errored => write!(f, "errored"),
        }
    }
}

/// One price observation for a security code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Security code (e.g. stock symbol)
    pub code: String,
    /// Observed price
    pub price: Decimal,
}

impl Tick {
    pub fn new(code: impl Into<String>, price: Decimal) -> Self {
        Self {
            code: code.into(),
            price,
        }
    }
}

/// Parses `CODE PRICE` or `CODE,PRICE`
impl FromStr for Tick {
    type Err = TradeError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (code, price) = line
            .split_once(',')
            .or_else(|| line.split_once(char::is_whitespace))
            .ok_or_else(|| TradeError::TickParse(format!("expected CODE PRICE, got {:?}", line)))?;

        let code = code.trim();
        if code.is_empty() {
            return Err(TradeError::TickParse(format!("missing code in {:?}", line)));
        }

        let price = Decimal::from_str(price.trim())
            .map_err(|e| TradeError::TickParse(format!("bad price in {:?}: {}", line, e)))?;

        Ok(Tick::new(code, price))
    }
}

/// Parse a block of tick lines, skipping blanks and `#` comments
pub fn parse_ticks(input: &str) -> Result<Vec<Tick>> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Tick::from_str)
        .collect()
}

/// Emitted once a buy order has been placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedNotification {
    pub code: String,
    pub price: Decimal,
}

impl PlacedNotification {
    pub fn new(code: impl Into<String>, price: Decimal) -> Self {
        Self {
            code: code.into(),
            price,
        }
    }
}

/// Emitted once placing a buy order has failed
#[derive(Debug, Clone)]
pub struct ErroredNotification {
    pub code: String,
    pub price: Decimal,
    /// Failure returned by the order service
    pub cause: Arc<ExecutionError>,
}

impl ErroredNotification {
    pub fn new(code: impl Into<String>, price: Decimal, cause: ExecutionError) -> Self {
        Self {
            code: code.into(),
            price,
            cause: Arc::new(cause),
        }
    }
}
