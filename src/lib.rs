//! # respkv - A Small RESP Key-Value Server
//!
//! respkv speaks the request/response framing used by Redis clients and keeps
//! its data in one in-process map shared by every connection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                              respkv                              │
//! │                                                                  │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐           │
//! │  │ TCP Server  │───>│  Session    │───>│ Dispatcher  │           │
//! │  │ (accept)    │    │ (per conn)  │    │             │           │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘           │
//! │                            │                  │                  │
//! │                            ▼                  ▼                  │
//! │                     ┌─────────────┐    ┌──────────────────────┐  │
//! │                     │FrameDecoder │    │ Store                │  │
//! │                     │             │    │ RwLock<HashMap>      │  │
//! │                     └─────────────┘    └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use respkv::connection::ConnectionStats;
//! use respkv::storage::Store;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = Arc::new(Store::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:6379").await?;
//!     respkv::serve(listener, store, stats).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `PING` - replies `PONG`, whatever the arguments
//! - `ECHO message`
//! - `SET key value`
//! - `GET key`
//!
//! ## Module Overview
//!
//! - [`protocol`]: Frame decoder, commands and replies
//! - [`commands`]: Verb dispatch and arity checks
//! - [`storage`]: The shared store
//! - [`connection`]: Per-client session loop
//! - [`server`]: Accept loop
//! - [`config`]: Command-line configuration

pub mod commands;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

pub use commands::{CommandError, Dispatcher};
pub use config::Config;
pub use connection::{handle_connection, ConnectionError, ConnectionStats, Session};
pub use protocol::{Command, DecodeError, FrameDecoder, Reply};
pub use server::serve;
pub use storage::{Store, StoreStats};

/// The default port respkv listens on (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default host respkv binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Version of respkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
