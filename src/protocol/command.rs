//! Decoded command invocations.

use crate::protocol::reply::{prefix, CRLF};
use bytes::Bytes;

/// One decoded request: an ordered list of binary-safe byte strings.
///
/// Element 0 is the verb, the rest are its arguments. A command decoded
/// from `*0\r\n` is empty and is never dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    parts: Vec<Bytes>,
}

impl Command {
    pub fn new(parts: Vec<Bytes>) -> Self {
        Self { parts }
    }

    /// Builds a command from anything byte-like. Handy for clients and tests.
    ///
    /// ```
    /// use respkv::protocol::Command;
    /// let cmd = Command::from_parts(["SET", "name", "Ariz"]);
    /// assert_eq!(cmd.args().len(), 2);
    /// ```
    pub fn from_parts<I, T>(parts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The verb, if the command is non-empty.
    pub fn verb(&self) -> Option<&Bytes> {
        self.parts.first()
    }

    /// Everything after the verb.
    pub fn args(&self) -> &[Bytes] {
        self.parts.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<Bytes> {
        self.parts
    }

    /// Encodes the command as a RESP array of bulk strings.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(prefix::ARRAY);
        buf.extend_from_slice(self.parts.len().to_string().as_bytes());
        buf.extend_from_slice(CRLF);
        for part in &self.parts {
            buf.push(prefix::BULK_STRING);
            buf.extend_from_slice(part.len().to_string().as_bytes());
            buf.extend_from_slice(CRLF);
            buf.extend_from_slice(part);
            buf.extend_from_slice(CRLF);
        }
        buf
    }
}

impl From<Vec<Bytes>> for Command {
    fn from(parts: Vec<Bytes>) -> Self {
        Self::new(parts)
    }
}
