//! Maps [`AuctionError`] onto the wire contract of spec.md §6/§7: every
//! error is an HTTP 500 with a plain-text body holding the error's
//! `Display` message. The error kind itself is never transported.

use auction_types::AuctionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub struct ApiError(AuctionError);

impl From<AuctionError> for ApiError {
    fn from(value: AuctionError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}
