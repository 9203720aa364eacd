//! # wardlink-guard — Brute-Force Protection
//!
//! Two pieces, one concern:
//!
//! - **Limiter** (`limiter.rs`): fixed-window per-key attempt counter.
//!   15 minutes, 5 attempts by default; expiry computed on read.
//! - **Gate** (`gate.rs`): PIN verification built on the limiter, with
//!   argon2id hashing, constant-time legacy-plaintext comparison, and
//!   transparent migration of matched legacy credentials (`pin.rs`).
//!
//! Failed lookups record attempts too, so the shape of a failure never
//! reveals whether a profile exists or has a PIN configured.

pub mod gate;
pub mod limiter;
pub mod pin;

pub use gate::CredentialGate;
pub use limiter::{RateLimitConfig, RateLimiter};
