//! Route table and request handlers.
//!
//! [`handle`] is a pure function of method, path and raw query string, so the
//! whole HTTP surface can be exercised without a socket. The server loop only
//! converts the resulting [`Reply`] into a hyper response.

use crate::pages;
use hexrgb_core::{Color, InputMode, QueryParams, ValidationError};
use hyper::{Method, StatusCode};
use serde::Serialize;
use tracing::{error, warn};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Value of the `Allow` header sent with 405 responses.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Error code carried by the generic 500 body.
const INTERNAL_ERROR_CODE: u32 = 7000;

/// The known endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    HexToRgb,
    RgbToHex,
    Preview,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Index),
            "/hex-to-rgb" => Some(Route::HexToRgb),
            "/rgb-to-hex" => Some(Route::RgbToHex),
            "/preview" => Some(Route::Preview),
            _ => None,
        }
    }

    /// Which color inputs the endpoint accepts, if it takes a color at all.
    pub fn input_mode(self) -> Option<InputMode> {
        match self {
            Route::Index => None,
            Route::HexToRgb => Some(InputMode::Hex),
            Route::RgbToHex => Some(InputMode::Rgb),
            Route::Preview => Some(InputMode::Any),
        }
    }
}

/// A fully composed response, independent of the HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
    /// Set on 405 responses so the server emits an `Allow` header.
    pub allow: Option<&'static str>,
}

impl Reply {
    fn new(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
            allow: None,
        }
    }

    fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, CONTENT_TYPE_TEXT, body)
    }

    fn html(body: String) -> Self {
        Self::new(StatusCode::OK, CONTENT_TYPE_HTML, body)
    }

    fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            StatusCode::OK,
            CONTENT_TYPE_JSON,
            serde_json::to_string(value)?,
        ))
    }

    fn not_found() -> Self {
        Self::text(StatusCode::NOT_FOUND, "Not Found")
    }

    fn method_not_allowed() -> Self {
        Self {
            allow: Some(ALLOWED_METHODS),
            ..Self::text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
        }
    }

    fn bad_request(err: &ValidationError) -> Self {
        Self::text(StatusCode::BAD_REQUEST, err.to_string())
    }

    /// Generic 500; never carries internal detail.
    pub fn internal_error() -> Self {
        let body = serde_json::json!({
            "success": false,
            "errors": [{ "code": INTERNAL_ERROR_CODE, "message": "Internal Server Error" }],
        });
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            CONTENT_TYPE_JSON,
            body.to_string(),
        )
    }
}

#[derive(Serialize)]
struct HexBody {
    hex: String,
}

/// Failures while composing a successful response.
#[derive(Debug, thiserror::Error)]
enum HandlerError {
    #[error("rejected input: {0}")]
    Rejected(#[from] ValidationError),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("route {route:?} reached rendering without a color")]
    MissingColor { route: Route },
}

fn log_rejection(route: Route, err: &ValidationError) {
    let reason = match std::error::Error::source(err) {
        Some(source) => source.to_string(),
        None => err.to_string(),
    };
    warn!(
        route = ?route,
        kind = err.kind(),
        fields = ?err.fields(),
        reason = %reason,
        "rejected color input"
    );
}

fn render(route: Route, color: Option<Color>) -> Result<Reply, HandlerError> {
    match (route, color) {
        (Route::HexToRgb, Some(color)) => Ok(Reply::json(&color)?),
        (Route::RgbToHex, Some(color)) => Ok(Reply::json(&HexBody {
            hex: color.to_hex(),
        })?),
        (Route::Preview, Some(color)) => {
            let channels = serde_json::to_string(&color)?;
            Ok(Reply::html(pages::preview_page(color, &channels)))
        }
        (Route::Index, _) => Ok(Reply::html(pages::front_page())),
        (route, None) => Err(HandlerError::MissingColor { route }),
    }
}

fn dispatch(route: Route, query: &str) -> Result<Reply, HandlerError> {
    let color = match route.input_mode() {
        Some(mode) => Some(mode.validate(&QueryParams::parse(query))?),
        None => None,
    };
    render(route, color)
}

/// Answers one request. `HEAD` is routed like `GET`; the caller drops the body.
pub fn handle(method: &Method, path: &str, query: Option<&str>) -> Reply {
    let Some(route) = Route::from_path(path) else {
        return Reply::not_found();
    };
    if *method != Method::GET && *method != Method::HEAD {
        return Reply::method_not_allowed();
    }
    match dispatch(route, query.unwrap_or("")) {
        Ok(reply) => reply,
        Err(HandlerError::Rejected(err)) => {
            log_rejection(route, &err);
            Reply::bad_request(&err)
        }
        Err(err) => {
            error!(route = ?route, error = %err, "failed to compose response");
            Reply::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str, query: &str) -> Reply {
        handle(&Method::GET, path, Some(query))
    }

    fn json(reply: &Reply) -> serde_json::Value {
        serde_json::from_str(&reply.body).unwrap()
    }

    #[test]
    fn hex_to_rgb_returns_channels() {
        let reply = get("/hex-to-rgb", "hex=%23C0FFEE");
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type, CONTENT_TYPE_JSON);
        assert_eq!(json(&reply), serde_json::json!({"r": 192, "g": 255, "b": 238}));
    }

    #[test]
    fn hex_to_rgb_missing_hex_is_400() {
        let reply = handle(&Method::GET, "/hex-to-rgb", None);
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.content_type, CONTENT_TYPE_TEXT);
        assert_eq!(reply.body, "HEX value not given");
    }

    #[test]
    fn hex_to_rgb_invalid_hex_is_400() {
        let reply = get("/hex-to-rgb", "hex=xyz123");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body, "Invalid HEX value");
    }

    #[test]
    fn rgb_to_hex_returns_canonical_hex() {
        let reply = get("/rgb-to-hex", "r=176&g=0&b=181");
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(json(&reply), serde_json::json!({"hex": "#B000B5"}));
    }

    #[test]
    fn rgb_to_hex_out_of_range_is_400() {
        let reply = get("/rgb-to-hex", "r=300&g=0&b=0");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body, "Invalid RGB values");
    }

    #[test]
    fn rgb_to_hex_fractional_is_400() {
        let reply = get("/rgb-to-hex", "r=12.5&g=0&b=0");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn preview_renders_hex_background() {
        let reply = get("/preview", "hex=%23BADA55");
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type, CONTENT_TYPE_HTML);
        assert!(reply.body.contains("background-color: #BADA55;"));
    }

    #[test]
    fn preview_prefers_hex_over_rgb() {
        let reply = get("/preview", "hex=%23BADA55&r=1&g=2&b=3");
        assert!(reply.body.contains("#BADA55"));
        assert!(!reply.body.contains("#010203"));
    }

    #[test]
    fn preview_accepts_rgb() {
        let reply = get("/preview", "r=1&g=2&b=3");
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("background-color: #010203;"));
    }

    #[test]
    fn preview_malformed_hex_is_400_even_with_valid_rgb() {
        let reply = get("/preview", "hex=xyz123&r=1&g=2&b=3");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body, "Invalid color values");
    }

    #[test]
    fn preview_empty_hex_uses_rgb() {
        let reply = get("/preview", "hex=&r=1&g=2&b=3");
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("background-color: #010203;"));
    }

    #[test]
    fn render_without_color_fails_instead_of_serving_front_page() {
        for route in [Route::HexToRgb, Route::RgbToHex, Route::Preview] {
            assert!(matches!(
                render(route, None),
                Err(HandlerError::MissingColor { .. })
            ));
        }
        assert!(render(Route::Index, None).is_ok());
    }

    #[test]
    fn preview_without_color_is_400() {
        let reply = get("/preview", "");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body, "Invalid color values");
    }

    #[test]
    fn index_serves_front_page() {
        let reply = get("/", "");
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("Color Converter app"));
    }

    #[test]
    fn unknown_path_is_404() {
        let reply = get("/nope", "");
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn non_get_method_is_405_with_allow() {
        let reply = handle(&Method::POST, "/rgb-to-hex", Some("r=1&g=2&b=3"));
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(reply.allow, Some(ALLOWED_METHODS));
    }

    #[test]
    fn head_is_routed_like_get() {
        let head = handle(&Method::HEAD, "/hex-to-rgb", Some("hex=C0FFEE"));
        assert_eq!(head, get("/hex-to-rgb", "hex=C0FFEE"));
    }

    #[test]
    fn internal_error_hides_detail() {
        let reply = Reply::internal_error();
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json(&reply),
            serde_json::json!({
                "success": false,
                "errors": [{"code": 7000, "message": "Internal Server Error"}],
            })
        );
    }

    #[test]
    fn route_modes() {
        assert_eq!(Route::from_path("/preview"), Some(Route::Preview));
        assert_eq!(Route::Preview.input_mode(), Some(InputMode::Any));
        assert_eq!(Route::Index.input_mode(), None);
        assert_eq!(Route::from_path("/preview/"), None);
    }
}
