//! RESP Reply Types
//!
//! Every command produces exactly one reply. The server only ever emits four
//! kinds of reply, each with a fixed wire encoding:
//!
//! - `+` Simple status: `+OK\r\n`
//! - `-` Error: `-ERR unknown command\r\n`
//! - `$` Bulk string: `$5\r\nhello\r\n`
//! - `$-1` Null bulk string: `$-1\r\n`
//!
//! All replies are terminated with CRLF (`\r\n`).

use bytes::Bytes;
use std::fmt;

/// The CRLF terminator used in RESP protocol
pub const CRLF: &[u8] = b"\r\n";

/// RESP protocol type prefixes
pub mod prefix {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// A reply sent back to the client.
///
/// Replies carry no state between each other; each one is fully determined
/// by the outcome of the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Simple status line. Must not contain CRLF.
    /// Format: `+<string>\r\n`
    Status(String),

    /// Error line, conventionally prefixed with an error kind such as `ERR`.
    /// Format: `-<error message>\r\n`
    Error(String),

    /// Binary-safe, length-prefixed payload.
    /// Format: `$<length>\r\n<data>\r\n`
    Bulk(Bytes),

    /// Absent value.
    /// Format: `$-1\r\n`
    Null,
}

impl Reply {
    /// Creates a simple status reply.
    ///
    /// # Example
    /// ```
    /// use respkv::protocol::Reply;
    /// assert_eq!(Reply::status("OK").serialize(), b"+OK\r\n");
    /// ```
    pub fn status(s: impl Into<String>) -> Self {
        Reply::Status(s.into())
    }

    /// Creates an error reply.
    ///
    /// # Example
    /// ```
    /// use respkv::protocol::Reply;
    /// let err = Reply::error("ERR unknown command");
    /// assert_eq!(err.serialize(), b"-ERR unknown command\r\n");
    /// ```
    pub fn error(s: impl Into<String>) -> Self {
        Reply::Error(s.into())
    }

    /// Creates a bulk string reply.
    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Reply::Bulk(data.into())
    }

    /// Creates a null bulk string reply.
    pub fn null() -> Self {
        Reply::Null
    }

    pub fn ok() -> Self {
        Reply::Status("OK".to_string())
    }

    pub fn pong() -> Self {
        Reply::Status("PONG".to_string())
    }

    /// Serializes the reply into its wire format.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Status(s) => {
                buf.push(prefix::SIMPLE_STRING);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Error(s) => {
                buf.push(prefix::ERROR);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Bulk(data) => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(data.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            Reply::Null => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(b"-1");
                buf.extend_from_slice(CRLF);
            }
        }
    }

    /// Rough size of the encoded reply, used to size the output buffer.
    fn encoded_len(&self) -> usize {
        match self {
            Reply::Status(s) | Reply::Error(s) => s.len() + 3,
            Reply::Bulk(data) => data.len() + 25,
            Reply::Null => 5,
        }
    }

    /// Returns true if this reply is the null bulk string.
    pub fn is_null(&self) -> bool {
        matches!(self, Reply::Null)
    }

    /// Returns true if this reply is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Status(s) => write!(f, "{}", s),
            Reply::Error(s) => write!(f, "(error) {}", s),
            Reply::Bulk(data) => match std::str::from_utf8(data) {
                Ok(s) => write!(f, "\"{}\"", s),
                Err(_) => write!(f, "(binary data, {} bytes)", data.len()),
            },
            Reply::Null => write!(f, "(nil)"),
        }
    }
}
