//! Streaming RESP Frame Decoder
//!
//! Requests arrive as arrays of bulk strings:
//!
//! ```text
//! *<N>\r\n
//! $<len_1>\r\n
//! <arg_1 bytes>\r\n
//! ...
//! $<len_N>\r\n
//! <arg_N bytes>\r\n
//! ```
//!
//! The decoder pulls exactly one such frame per call from a buffered async
//! reader, suspending only the calling task while bytes are in flight.
//!
//! ## Leniency
//!
//! Header lines only need a trailing `\n`; surrounding whitespace (including
//! the `\r`) is trimmed before the prefix is checked. The line that follows a
//! bulk payload is consumed but its content is not checked, so clients that
//! send a bare `\n` after the payload are accepted.
//!
//! ## Errors
//!
//! Every failure is fatal to the connection; the decoder never tries to
//! resynchronize. End of stream before the first byte of a frame is reported
//! as [`DecodeError::Closed`] so that callers can tell a client hanging up
//! apart from a broken frame.

use crate::protocol::command::Command;
use crate::protocol::reply::prefix;
use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Maximum size for a single bulk string (512 MB, same as Redis)
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Upper bound on up-front allocation driven by a declared length.
/// Larger frames grow their buffers as the bytes actually arrive.
const MAX_PREALLOC: usize = 64 * 1024;

/// Errors that can occur while decoding a frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The peer closed the stream between frames.
    #[error("connection closed by peer")]
    Closed,

    /// The first line of a frame did not start with `*`.
    #[error("invalid array header")]
    InvalidArrayHeader,

    /// An element header did not start with `$`.
    #[error("invalid bulk header")]
    InvalidBulkHeader,

    /// A header carried something other than a non-negative integer.
    #[error("invalid length: {0:?}")]
    InvalidLength(String),

    #[error("bulk string too large: {len} bytes (max: {max})")]
    TooLarge { len: usize, max: usize },

    /// The stream ended in the middle of a frame.
    #[error("unexpected end of stream")]
    Truncated,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// True when the peer simply went away between frames.
    pub fn is_closed(&self) -> bool {
        matches!(self, DecodeError::Closed)
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decodes one command per call from a buffered byte stream.
///
/// # Example
///
/// ```
/// # tokio_test::block_on(async {
/// use respkv::protocol::FrameDecoder;
///
/// let mut decoder = FrameDecoder::new(&b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n"[..]);
/// let command = decoder.decode().await.unwrap();
/// assert_eq!(command.args().len(), 1);
/// assert!(decoder.decode().await.unwrap_err().is_closed());
/// # });
/// ```
#[derive(Debug)]
pub struct FrameDecoder<R> {
    reader: R,
    /// Scratch space for the current header line
    line: Vec<u8>,
}

impl<R> FrameDecoder<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(64),
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads exactly one frame from the stream.
    pub async fn decode(&mut self) -> DecodeResult<Command> {
        if !self.read_line().await? {
            return Err(DecodeError::Closed);
        }
        let count = parse_length(header_digits(&self.line, prefix::ARRAY)?)?;

        let mut parts = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            parts.push(self.decode_bulk().await?);
        }

        Ok(Command::new(parts))
    }

    /// Reads one `$<len>` header, its payload, and the line after it.
    async fn decode_bulk(&mut self) -> DecodeResult<Bytes> {
        if !self.read_line().await? {
            return Err(DecodeError::Truncated);
        }
        let len = parse_length(header_digits(&self.line, prefix::BULK_STRING)?)?;
        if len > MAX_BULK_LEN {
            return Err(DecodeError::TooLarge {
                len,
                max: MAX_BULK_LEN,
            });
        }

        // The payload is raw bytes, not a line: it may contain `\r\n`.
        let mut payload = Vec::with_capacity(len.min(MAX_PREALLOC));
        let read = (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut payload)
            .await?;
        if read < len {
            return Err(DecodeError::Truncated);
        }

        // Terminator after the payload; content is not validated.
        self.line.clear();
        self.reader.read_until(b'\n', &mut self.line).await?;

        Ok(Bytes::from(payload))
    }

    /// Reads one `\n`-terminated line into the scratch buffer.
    ///
    /// Returns `Ok(false)` on a clean end of stream. A partial line followed
    /// by end of stream is a truncated frame.
    async fn read_line(&mut self) -> DecodeResult<bool> {
        self.line.clear();
        let n = self.reader.read_until(b'\n', &mut self.line).await?;
        if n == 0 {
            return Ok(false);
        }
        if self.line.last() != Some(&b'\n') {
            return Err(DecodeError::Truncated);
        }
        Ok(true)
    }
}

/// Trims a header line and strips its type prefix, returning the digits.
fn header_digits(line: &[u8], expected: u8) -> DecodeResult<&[u8]> {
    match line.trim_ascii() {
        [first, rest @ ..] if *first == expected => Ok(rest),
        _ if expected == prefix::ARRAY => Err(DecodeError::InvalidArrayHeader),
        _ => Err(DecodeError::InvalidBulkHeader),
    }
}

fn parse_length(digits: &[u8]) -> DecodeResult<usize> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| DecodeError::InvalidLength(String::from_utf8_lossy(digits).into_owned()))
}
