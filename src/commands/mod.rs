//! Command Module
//!
//! Receives decoded commands, executes them against the store and returns
//! the reply to write back.
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  FrameDecoder   │  (protocol module)
//! └────────┬────────┘
//!          │ Command
//!          ▼
//! ┌─────────────────┐
//! │   Dispatcher    │  (this module)
//! │  - match verb   │
//! │  - check arity  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │      Store      │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `PING [...]`
//! - `ECHO message`
//! - `SET key value`
//! - `GET key`

pub mod dispatcher;
pub mod error;

pub use dispatcher::Dispatcher;
pub use error::CommandError;
