//! Error types for the hexrgb server.

use thiserror::Error;

/// Errors produced while configuring or running the server.
///
/// Client input errors never show up here; those are answered with a 400
/// inside the request handler.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured host is not a loopback address and public binding
    /// was not explicitly allowed.
    #[error("refusing to bind non-localhost address '{host}' without --public")]
    PublicBindRefused { host: String },

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The global tracing subscriber could not be installed.
    #[error("logging init failed: {0}")]
    Logging(String),

    /// Any other I/O failure (signal handling, socket address lookup).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_bind_refused_names_host() {
        let err = ServerError::PublicBindRefused {
            host: "0.0.0.0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0.0.0"), "missing host in: {msg}");
        assert!(msg.contains("--public"), "missing hint in: {msg}");
    }

    #[test]
    fn bind_includes_address_and_cause() {
        let err = ServerError::Bind {
            addr: "127.0.0.1:80".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:80"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn io_error_converts_transparently() {
        let err: ServerError = std::io::Error::other("boom").into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn server_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
