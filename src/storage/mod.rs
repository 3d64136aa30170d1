//! Storage Module
//!
//! The only state shared between connections. One [`Store`] is built at
//! startup and passed by `Arc` to every command dispatcher.
//!
//! ```text
//! ┌───────────┐  ┌───────────┐  ┌───────────┐
//! │ Session 1 │  │ Session 2 │  │ Session N │
//! └─────┬─────┘  └─────┬─────┘  └─────┬─────┘
//!       │ SET (write)  │ GET (read)   │
//!       ▼              ▼              ▼
//! ┌─────────────────────────────────────────┐
//! │   Store: RwLock<HashMap<Bytes, Bytes>>  │
//! └─────────────────────────────────────────┘
//! ```

pub mod store;

pub use store::{Store, StoreStats};
