//! Listener configuration.

use crate::error::ServerError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;

/// Where the server listens.
///
/// Binding to anything other than a loopback address must be opted into
/// with [`ServerConfig::with_public_bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
    allow_public_bind: bool,
}

impl ServerConfig {
    /// Config on the default loopback host.
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port,
            allow_public_bind: false,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Allow binding on a non-loopback address.
    #[must_use]
    pub fn with_public_bind(mut self, allow: bool) -> Self {
        self.allow_public_bind = allow;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn is_localhost(&self) -> bool {
        matches!(
            self.host.as_str(),
            "127.0.0.1" | "::1" | "[::1]" | "localhost"
        )
    }

    /// Fails if the host is public and public binding was not allowed.
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.is_localhost() && !self.allow_public_bind {
            return Err(ServerError::PublicBindRefused {
                host: self.host.clone(),
            });
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}
