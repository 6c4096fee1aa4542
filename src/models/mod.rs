//! Request and user models
//!
//! Dates are kept as the strings they were stored with and parsed on use, so a
//! malformed date survives loading and is handled by the status calculator.

pub mod request;
pub mod user;

pub use request::{
    ApprovalStatus, NewRequest, Priority, Purchase, Rental, Request, RequestBase, RequestDetails, RequestKind,
    RequestUpdate, Service,
};
pub use user::{Role, User};
