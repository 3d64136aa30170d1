//! Connection Session
//!
//! One session owns one client stream and runs a strict
//! request-at-a-time loop over it:
//!
//! ```text
//!   ┌──────────────────┐  frame   ┌──────────────┐
//!   │  Awaiting-Frame  │─────────>│ Dispatching  │
//!   └──────────────────┘<─────────└──────────────┘
//!            │            reply written
//!            │ decode error / EOF / write error
//!            ▼
//!   ┌──────────────────┐
//!   │      Closed      │  stream dropped
//!   └──────────────────┘
//! ```
//!
//! Sessions are generic over the stream so the same loop runs over TCP in
//! production and over in-memory pipes in tests.

use crate::commands::Dispatcher;
use crate::protocol::{DecodeError, FrameDecoder, Reply};
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, trace, warn};

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Connections dropped because of a malformed frame
    pub protocol_errors: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn protocol_error(&self) {
        self.protocol_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The client sent something that is not a valid frame
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Writing a reply failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConnectionError {
    /// True for errors that just mean the client went away.
    pub fn is_disconnect(&self) -> bool {
        let io_err = match self {
            ConnectionError::Io(e) | ConnectionError::Decode(DecodeError::Io(e)) => e,
            ConnectionError::Decode(_) => return false,
        };
        matches!(
            io_err.kind(),
            io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
        )
    }
}

/// Drives decode → dispatch → reply for a single client.
pub struct Session<S> {
    decoder: FrameDecoder<BufReader<ReadHalf<S>>>,
    writer: BufWriter<WriteHalf<S>>,

    /// Peer label (for logging)
    client: String,

    dispatcher: Dispatcher,

    /// Reused serialization buffer for replies
    out: Vec<u8>,

    stats: Arc<ConnectionStats>,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite,
{
    pub fn new(
        stream: S,
        client: impl Into<String>,
        dispatcher: Dispatcher,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        let (reader, writer) = tokio::io::split(stream);
        Self {
            decoder: FrameDecoder::new(BufReader::new(reader)),
            writer: BufWriter::new(writer),
            client: client.into(),
            dispatcher,
            out: Vec::with_capacity(512),
            stats,
        }
    }

    /// Runs the session until the client disconnects or misbehaves.
    ///
    /// A clean hang-up between frames returns `Ok(())`. The stream is
    /// released when this returns, whatever the outcome.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        debug!(client = %self.client, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => debug!(client = %self.client, "Client disconnected"),
            Err(e) if e.is_disconnect() => {
                debug!(client = %self.client, error = %e, "Connection dropped by client")
            }
            Err(ConnectionError::Decode(e)) => {
                self.stats.protocol_error();
                warn!(client = %self.client, error = %e, "Protocol error, closing connection");
            }
            Err(e) => warn!(client = %self.client, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            let command = match self.decoder.decode().await {
                Ok(command) => command,
                Err(DecodeError::Closed) => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            // `*0` carries no verb; nothing to answer.
            if command.is_empty() {
                trace!(client = %self.client, "Ignoring empty command");
                continue;
            }

            trace!(
                client = %self.client,
                verb = ?command.verb(),
                args = command.args().len(),
                "Dispatching command"
            );

            let reply = self.dispatcher.execute(&command);
            self.stats.command_processed();
            self.send_reply(&reply).await?;
        }
    }

    async fn send_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        self.out.clear();
        reply.serialize_into(&mut self.out);
        self.writer.write_all(&self.out).await?;
        self.writer.flush().await?;
        self.stats.bytes_written(self.out.len());
        trace!(client = %self.client, bytes = self.out.len(), "Sent reply");
        Ok(())
    }
}

/// Runs a session over an accepted TCP connection.
///
/// Errors are logged by the session itself and not propagated; the socket is
/// closed when this returns.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    dispatcher: Dispatcher,
    stats: Arc<ConnectionStats>,
) {
    if let Err(e) = stream.set_nodelay(true) {
        debug!(client = %addr, error = %e, "Failed to set TCP_NODELAY");
    }

    let _ = Session::new(stream, addr.to_string(), dispatcher, stats)
        .run()
        .await;
}
