//! History subsystem.
//!
//! # Data Flow
//! ```text
//! AuditRecord
//!     → ledger.rs (key = history:<clientId>, prepend, cap at 20)
//!     → store.rs (KvStore: memory or JSON file)
//! ```

pub mod ledger;
pub mod store;

pub use ledger::{history_key, HistoryLedger, LedgerError, HISTORY_CAPACITY};
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
