pub mod clock;
pub mod confirm;
pub mod expiry;
pub mod link_service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use confirm::{ConfirmationGate, GateDecision, RandomTokenGenerator, TokenGenerator};
pub use expiry::{ExpiryDirective, ExpiryParams, InvalidExpiry};
pub use link_service::{CreateOutcome, CreateRequest, LinkService};
