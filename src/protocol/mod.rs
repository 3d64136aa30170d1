//! RESP Protocol Implementation
//!
//! The request side of the protocol is an array of bulk strings; the reply
//! side is one of four simple encodings.
//!
//! ## Modules
//!
//! - `decoder`: Streaming decoder turning a byte stream into commands
//! - `command`: The decoded argument vector (and its wire encoding)
//! - `reply`: Reply values and their serialization
//!
//! ## Example
//!
//! ```
//! use respkv::protocol::{Command, Reply};
//!
//! let request = Command::from_parts(["GET", "name"]).encode();
//! assert_eq!(request, b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n");
//!
//! let reply = Reply::bulk("Ariz").serialize();
//! assert_eq!(reply, b"$4\r\nAriz\r\n");
//! ```

pub mod command;
pub mod decoder;
pub mod reply;

pub use command::Command;
pub use decoder::{DecodeError, DecodeResult, FrameDecoder, MAX_BULK_LEN};
pub use reply::Reply;
