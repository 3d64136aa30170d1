//! Connection Module
//!
//! Every accepted client gets its own async task running a [`Session`].
//! Sessions share nothing with each other except the store behind the
//! dispatcher and the process-wide [`ConnectionStats`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                    (server.rs)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ accept() + spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Session                               │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │ Decode frame│───>│ Dispatch    │───>│ Write reply │──┐   │
//! │  └─────────────┘    └─────────────┘    └─────────────┘  │   │
//! │         ▲                                               │   │
//! │         └───────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod session;

pub use session::{handle_connection, ConnectionError, ConnectionStats, Session};
