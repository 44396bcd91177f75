//! The hyper/tokio accept loop.
//!
//! Each accepted connection is served on its own task with hyper's HTTP/1
//! builder. The only state shared between connections is immutable.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::{self, Reply};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(200);

/// Handle to a running server.
#[derive(Debug)]
pub struct ServerHandle {
    bound_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// The address actually bound (useful with port 0).
    pub fn bound_addr(&self) -> SocketAddr {
        self.bound_addr
    }

    /// Stops accepting connections and waits for the accept loop to exit.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.await.map_err(|e| ServerError::Io(std::io::Error::other(e)))
    }
}

fn into_response(reply: Reply, head: bool) -> Response<Full<Bytes>> {
    let body = if head { Bytes::new() } else { Bytes::from(reply.body) };
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = reply.status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(reply.content_type));
    if let Some(allow) = reply.allow {
        headers.insert(ALLOW, HeaderValue::from_static(allow));
    }
    response
}

fn respond(request: &Request<Incoming>) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let method = request.method();
    let path = request.uri().path();
    let reply = routes::handle(method, path, request.uri().query());
    info!(
        method = %method,
        path,
        status = reply.status.as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request"
    );
    into_response(reply, *method == Method::HEAD)
}

async fn accept_loop(listener: TcpListener, mut shutdown_rx: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                info!("shutting down");
                break;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        debug!(%peer, "connection accepted");
                        tokio::spawn(async move {
                            let service = service_fn(|request: Request<Incoming>| async move {
                                Ok::<_, Infallible>(respond(&request))
                            });
                            if let Err(err) = http1::Builder::new()
                                .serve_connection(TokioIo::new(stream), service)
                                .await
                            {
                                warn!(%peer, "connection error: {err}");
                            }
                        });
                    }
                    Err(err) => {
                        warn!("accept error: {err}");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                }
            }
        }
    }
}

/// Binds the listener and spawns the accept loop on the current runtime.
pub async fn start(config: ServerConfig) -> Result<ServerHandle, ServerError> {
    config.validate()?;
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let bound_addr = listener.local_addr()?;
    info!(%bound_addr, "listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(accept_loop(listener, shutdown_rx));
    Ok(ServerHandle {
        bound_addr,
        shutdown: Some(shutdown_tx),
        task,
    })
}

/// Runs the server until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let handle = start(config).await?;
    tokio::signal::ctrl_c().await?;
    handle.shutdown().await
}
