//! HTTP front end for the matching engine.
//!
//! Form-encoded trading endpoints against named books, which are created
//! implicitly on first reference, plus a whole-registry status snapshot.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use matchbook::{Order, OrderId, Side, TimeInForce};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

mod registry;
mod types;

use registry::Registry;
use types::{CancelForm, TradeForm};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = router(Arc::new(Registry::new()));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:6060").await.unwrap();

    info!("book-service listening on http://0.0.0.0:6060");
    info!("  POST /trade  - submit an order");
    info!("  POST /cancel - cancel a resting order");
    info!("  GET  /status - snapshot of all books");
    info!("  GET  /health - liveness probe");

    axum::serve(listener, app).await.unwrap();
}

fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/trade", post(trade))
        .route("/cancel", post(cancel))
        .route("/status", get(status))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(registry)
}

async fn trade(
    State(registry): State<Arc<Registry>>,
    Form(form): Form<TradeForm>,
) -> Result<impl IntoResponse, ApiError> {
    let book = require(form.book)?;
    let orderid = require(form.orderid)?;
    let tradetype = require(form.tradetype)?;
    let side = require(form.side)?;
    let price = require(form.price)?;
    let quantity = require(form.quantity)?;

    let id = parse_number::<u64>(&orderid)?;
    let tif = parse_tif(&tradetype)?;
    let side = parse_side(&side)?;
    let price = parse_number::<i32>(&price)?;
    let quantity = parse_number::<u32>(&quantity)?;
    if quantity == 0 {
        return Err(ApiError::BadRequest("quantity must be positive".into()));
    }

    let trades = registry
        .place(&book, Order::new(OrderId(id), side, tif, price, quantity))
        .await;
    info!("order {} placed on {}: {} fill(s)", id, book, trades.len());

    Ok(Json(json!({ "message": "Order placed successfully" })))
}

async fn cancel(
    State(registry): State<Arc<Registry>>,
    Form(form): Form<CancelForm>,
) -> Result<Response, ApiError> {
    let book = require(form.book)?;
    let orderid = require(form.orderid)?;
    let id = parse_number::<u64>(&orderid)?;

    if registry.cancel(&book, OrderId(id)).await {
        info!("order {} cancelled on {}", id, book);
        Ok(Json(json!({ "message": "Order Info Received" })).into_response())
    } else {
        warn!("cancel for unknown order {} on {}", id, book);
        Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Order ID not found" })),
        )
            .into_response())
    }
}

async fn status(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    Json(registry.status().await)
}

async fn health(State(registry): State<Arc<Registry>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "book-service",
        "version": env!("CARGO_PKG_VERSION"),
        "books": registry.book_count(),
    }))
}

/// Accepts a form field only when it is present and non-empty.
fn require(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::MissingParameters),
    }
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, ApiError>
where
    T::Err: std::fmt::Display,
{
    text.parse()
        .map_err(|err: T::Err| ApiError::ParseFailure(err.to_string()))
}

/// Unrecognized side tokens are rejected rather than silently defaulted.
fn parse_side(token: &str) -> Result<Side, ApiError> {
    match token {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        _ => Err(ApiError::BadRequest(format!("unknown side: {token}"))),
    }
}

/// Unrecognized time-in-force tokens are rejected rather than silently
/// defaulted.
fn parse_tif(token: &str) -> Result<TimeInForce, ApiError> {
    match token {
        "GTC" => Ok(TimeInForce::GoodTillCancel),
        "FAK" => Ok(TimeInForce::FillAndKill),
        _ => Err(ApiError::BadRequest(format!("unknown trade type: {token}"))),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ApiError {
    /// A required form field was absent or empty.
    MissingParameters,
    /// A field held an unusable value.
    BadRequest(String),
    /// A numeric field failed to parse.
    ParseFailure(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingParameters => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required parameters" }),
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::ParseFailure(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Engine error during processing: {message}") }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_empty() {
        assert_eq!(require(Some("ACME".into())).unwrap(), "ACME");
        assert_eq!(require(None), Err(ApiError::MissingParameters));
        assert_eq!(require(Some(String::new())), Err(ApiError::MissingParameters));
    }

    #[test]
    fn side_tokens_are_strict() {
        assert_eq!(parse_side("BUY").unwrap(), Side::Buy);
        assert_eq!(parse_side("SELL").unwrap(), Side::Sell);
        assert!(parse_side("buy").is_err());
        assert!(parse_side("HOLD").is_err());
    }

    #[test]
    fn tif_tokens_are_strict() {
        assert_eq!(parse_tif("GTC").unwrap(), TimeInForce::GoodTillCancel);
        assert_eq!(parse_tif("FAK").unwrap(), TimeInForce::FillAndKill);
        assert!(parse_tif("IOC").is_err());
        assert!(parse_tif("gtc").is_err());
    }

    #[test]
    fn numbers_parse_with_range_checks() {
        assert_eq!(parse_number::<u64>("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(parse_number::<i32>("-42").unwrap(), -42);
        assert!(parse_number::<u32>("-1").is_err());
        assert!(parse_number::<u32>("4294967296").is_err());
        assert!(matches!(
            parse_number::<u64>("twelve"),
            Err(ApiError::ParseFailure(_))
        ));
    }
}
