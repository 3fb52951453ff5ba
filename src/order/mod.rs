//! Order module - the single-shot tick responder and its collaborators

pub mod observers;
pub mod paper;
pub mod responder;

pub use observers::{ObserverList, SubscriptionId};
pub use paper::{PaperOrder, PaperOrderService};
pub use responder::{TickResponder, DEFAULT_QUANTITY};
