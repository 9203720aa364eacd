//! # wardlink-store — Transactional Store Seam
//!
//! The persistence boundary of the Wardlink core:
//!
//! - **Transactions** (`tx.rs`): the [`TxStore`] trait. Lifecycle and
//!   credential mutations run as read-check-write closures returning
//!   `Result<R, Reject>`; staged writes commit atomically or not at all.
//! - **Memory** (`memory.rs`): the serializable in-memory implementation
//!   (one mutex over all documents), used in development and as the fake
//!   the domain crates unit-test against.
//! - **Scan log** (`scan_log.rs`): the append-only [`ScanLog`] trait and
//!   its in-memory implementation. Scan events sit outside the band and
//!   profile transaction boundary on purpose.

pub mod memory;
pub mod scan_log;
pub mod tx;

pub use memory::MemoryStore;
pub use scan_log::{MemoryScanLog, ScanLog};
pub use tx::{Transaction, TxStore};
