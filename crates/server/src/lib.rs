#![deny(unsafe_code)]
//! HTTP surface for the hexrgb color converter.
//!
//! Wires the core validator to four endpoints (`/`, `/hex-to-rgb`,
//! `/rgb-to-hex`, `/preview`), renders the HTML pages, sets up logging, and
//! runs the hyper/tokio server loop.

pub mod config;
pub mod error;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::ServerError;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use server::{serve, start, ServerHandle};
