//! # nuts-store — Region Store, Query & Index
//!
//! Holds the loaded region table and answers field filters over it.
//!
//! ```text
//!   RowSource ──▶ Loader ──▶ RegionStore { data, index } ◀── Query
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Queries are data.** A [`Query`] is a list of `(field, value)`
//!    filters validated when it runs. Unknown fields and malformed values
//!    are errors; an empty match is not.
//!
//! 2. **Index and scan agree.** The index is an optimization only. An
//!    indexed store and an unindexed store over the same records return
//!    identical sets for every query.
//!
//! 3. **No globals.** Every store owns its records and index. Callers
//!    that want a process-wide table hold one store themselves.
//!
//! ## Crate Policy
//!
//! - Depends on `nuts-core` and `nuts-loader` internally.
//! - The store is immutable between reloads and is `Send + Sync`.

pub mod index;
pub mod query;
pub mod store;

pub use index::SearchIndex;
pub use query::{Criterion, FilterValue, Query};
pub use store::RegionStore;
