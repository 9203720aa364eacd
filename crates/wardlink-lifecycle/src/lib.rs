//! # wardlink-lifecycle — Band Lifecycle
//!
//! The heart of the core: anti-counterfeiting token validation
//! (`token.rs`) and the atomic lifecycle state machine (`service.rs`).
//!
//! Every mutation is one read-check-write transaction against the store
//! seam. Two concurrent `link` calls racing for the same INACTIVE band
//! serialize at the store: at most one observes INACTIVE at commit time;
//! the rest receive the "already activated" rejection. There is no torn
//! state to reconcile.
//!
//! Status reports trigger the lost/found owner notification after commit,
//! behind a best-effort boundary.

pub mod service;
pub mod token;

pub use service::Lifecycle;
pub use token::{check_token, validate_token, TokenValidation};
