#![deny(unsafe_code)]
//! CLI binary for the hexrgb color converter.
//!
//! Subcommands:
//! - `serve` — run the HTTP server until Ctrl-C
//! - `hex-to-rgb <HEX>` — print the channels of a HEX color
//! - `rgb-to-hex <R> <G> <B>` — print the canonical HEX of a triplet

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use hexrgb_core::{Color, InputMode, QueryParams};
use hexrgb_server::{LogConfig, LogFormat, ServerConfig};
use std::process;

#[derive(Parser)]
#[command(name = "hexrgb", version, about = "HEX <-> RGB color converter")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the conversion endpoints over HTTP.
    Serve {
        /// Address to bind.
        #[arg(long, env = "HEXRGB_HOST", default_value = hexrgb_server::config::DEFAULT_HOST)]
        host: String,

        /// Port to bind (0 picks a free port).
        #[arg(short, long, env = "HEXRGB_PORT", default_value_t = hexrgb_server::config::DEFAULT_PORT)]
        port: u16,

        /// Allow binding to a non-loopback address.
        #[arg(long)]
        public: bool,

        /// Log filter used when RUST_LOG is unset (e.g. info, debug).
        #[arg(long, env = "HEXRGB_LOG", default_value = "info")]
        log_level: String,

        /// Log line format (pretty or json).
        #[arg(long, env = "HEXRGB_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
        log_format: LogFormat,
    },
    /// Convert a HEX color (with or without '#') to RGB channels.
    HexToRgb {
        /// Color such as "#C0FFEE" or "c0ffee".
        hex: String,
    },
    /// Convert an RGB triplet to its canonical HEX form.
    RgbToHex {
        /// Red channel, 0-255.
        #[arg(allow_hyphen_values = true)]
        r: String,
        /// Green channel, 0-255.
        #[arg(allow_hyphen_values = true)]
        g: String,
        /// Blue channel, 0-255.
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
}

fn print_color(color: Color, json: bool, hex_only: bool) -> Result<(), CliError> {
    match (json, hex_only) {
        (true, true) => {
            let info = serde_json::json!({ "hex": color.to_hex() });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        (true, false) => println!("{}", serde_json::to_string_pretty(&color)?),
        (false, true) => println!("{color}"),
        (false, false) => {
            let c = color.to_channels();
            println!("r={} g={} b={}", c.r, c.g, c.b);
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve {
            host,
            port,
            public,
            log_level,
            log_format,
        } => {
            hexrgb_server::init_logging(&LogConfig {
                level: log_level,
                format: log_format,
            })?;
            let config = ServerConfig::new(port)
                .with_host(host)
                .with_public_bind(public);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(hexrgb_server::serve(config))?;
            tracing::info!("server stopped");
        }
        Command::HexToRgb { hex } => {
            let params: QueryParams = [("hex", hex)].into_iter().collect();
            let color = InputMode::Hex.validate(&params)?;
            print_color(color, cli.json, false)?;
        }
        Command::RgbToHex { r, g, b } => {
            let params: QueryParams = [("r", r), ("g", g), ("b", b)].into_iter().collect();
            let color = InputMode::Rgb.validate(&params)?;
            print_color(color, cli.json, true)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
