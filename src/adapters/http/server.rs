use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;

use super::handler::CalendarHandler;
use crate::application::{AppError, AppResult};

/// Accept loop. Every connection gets its own task and serves one request.
pub struct CalendarServer {
    listener: TcpListener,
    handler: Arc<CalendarHandler>,
}

impl CalendarServer {
    pub async fn bind(addr: SocketAddr, handler: CalendarHandler) -> AppResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;

        Ok(Self {
            listener,
            handler: Arc::new(handler),
        })
    }

    pub fn local_addr(&self) -> AppResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `shutdown` resolves. Connections already accepted keep
    /// running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down, no longer accepting connections");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let handler = Arc::clone(&self.handler);
                        let span = tracing::info_span!("connection", %peer);
                        tokio::spawn(serve_connection(stream, handler).instrument(span));
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                },
            }
        }
    }
}

async fn serve_connection(stream: TcpStream, handler: Arc<CalendarHandler>) {
    let service = service_fn(move |request| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(request).await }
    });

    let result = http1::Builder::new()
        .keep_alive(false)
        .serve_connection(TokioIo::new(stream), service)
        .await;

    if let Err(e) = result {
        tracing::warn!("Connection dropped: {}", e);
    }
}
