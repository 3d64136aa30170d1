//! TCP accept loop.

use crate::commands::Dispatcher;
use crate::connection::{handle_connection, ConnectionStats};
use crate::storage::Store;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::error;

/// Accepts connections forever, spawning one task per client.
///
/// The loop never waits on a session; accept failures are logged and the
/// loop keeps going. Stop it by dropping the future (e.g. from
/// `tokio::select!`).
pub async fn serve(listener: TcpListener, store: Arc<Store>, stats: Arc<ConnectionStats>) {
    let dispatcher = Dispatcher::new(store);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let dispatcher = dispatcher.clone();
                let stats = Arc::clone(&stats);

                tokio::spawn(async move {
                    handle_connection(stream, addr, dispatcher, stats).await;
                });
            }
            Err(e) => {
                error!(error = %e, "Failed to accept connection");
            }
        }
    }
}
